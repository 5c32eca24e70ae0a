//! Text rendering for terminal output

use std::fmt::Write;

use catalyst_config::Currency;
use catalyst_core::{CalculationResult, ScenarioComparison, ScenarioDefinition};

/// Group an amount with thousands separators, no decimals
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn money(value: f64, currency: &str, label: Option<&Currency>) -> String {
    match label {
        Some(c) => format!("{}{}", c.symbol, format_amount(value)),
        None => format!("{} {}", format_amount(value), currency),
    }
}

fn payback(months: Option<u32>) -> String {
    match months {
        Some(1) => "1 month".to_string(),
        Some(m) => format!("{} months", m),
        None => "not recoverable".to_string(),
    }
}

pub fn render_result(
    scenario: Option<&ScenarioDefinition>,
    result: &CalculationResult,
    label: Option<&Currency>,
) -> String {
    let f = &result.financial;
    let q = &result.qualitative;
    let currency = result.currency.as_str();
    let mut out = String::new();

    let title = scenario.map(|s| s.name.as_str()).unwrap_or(&result.scenario_id);
    let _ = writeln!(out, "{} ({} months)", title, result.timeframe_months);
    let _ = writeln!(out, "  Investment:       {}", money(f.investment, currency, label));
    let _ = writeln!(out, "  Expected returns: {}", money(f.expected_returns, currency, label));
    let _ = writeln!(out, "  Total value:      {}", money(f.total_value, currency, label));
    let _ = writeln!(out, "  Monthly return:   {}", money(f.monthly_return, currency, label));
    let _ = writeln!(out, "  ROI:              {:.2}%", f.roi_percentage);
    let _ = writeln!(out, "  Annualized ROI:   {:.2}%", f.annualized_roi);
    let _ = writeln!(out, "  Payback period:   {}", payback(f.payback_period_months));
    let _ = writeln!(
        out,
        "  Success rate:     {}% (confidence {}%, risk {})",
        q.success_rate_percent, q.confidence_percent, q.risk_level
    );

    let a = &result.adjustments;
    let _ = writeln!(
        out,
        "  Adjustments:      industry {}{} x{}, size {}{} x{}, risk x{}",
        a.industry,
        if a.industry_fallback { " (default)" } else { "" },
        a.industry_multiplier,
        a.company_size,
        if a.size_fallback { " (default)" } else { "" },
        a.size_multiplier,
        a.risk_multiplier
    );

    let n = &result.narrative;
    for (heading, items) in [
        ("Benefits", &n.benefits),
        ("Success factors", &n.success_factors),
        ("Risk mitigations", &n.risk_mitigations),
        ("Implementation insights", &n.implementation_insights),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}:", heading);
        for item in items {
            let _ = writeln!(out, "  - {}", item);
        }
    }

    out
}

pub fn render_comparison(comparisons: &[ScenarioComparison], label: Option<&Currency>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<28} {:>10} {:>16} {:>16}",
        "Rank", "Scenario", "ROI", "Returns", "Payback"
    );
    for c in comparisons {
        let f = &c.result.financial;
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:>9.2}% {:>16} {:>16}",
            c.rank,
            c.scenario_id,
            f.roi_percentage,
            money(f.expected_returns, &c.result.currency, label),
            payback(f.payback_period_months)
        );
    }
    out
}

pub fn render_scenarios(scenarios: &[&ScenarioDefinition]) -> String {
    let mut out = String::new();
    for s in scenarios {
        let _ = writeln!(
            out,
            "{:<26} {:<20} ROI {:>4}-{:<4}% risk {:<6} {}",
            s.id, s.category, s.expected_roi.min, s.expected_roi.max, s.risk_level, s.name
        );
    }
    if scenarios.is_empty() {
        out.push_str("No scenarios found\n");
    }
    out
}
