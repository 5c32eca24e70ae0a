//! Catalog validator
//!
//! Checks a freshly loaded catalog before it is published:
//! - Required content (at least one scenario, industry and company size)
//! - Value ranges (ROI and cost bounds, multipliers, percentages)
//! - References (default table keys, lookup-reachable keys)
//! - Duplicates (currency codes)
//!
//! Critical findings reject the catalog. Errors and warnings are logged and
//! the catalog is still served, since the engine stays total for any data
//! that passes the critical checks.

use std::collections::HashSet;

use catalyst_core::{AdjustmentTables, RiskAdjustment, ScenarioCatalog};

use super::files::Currency;
use crate::constants::{catalog_limits, files};

/// One problem found in the catalog
#[derive(Debug, Clone)]
pub struct ValidationFinding {
    pub category: ValidationCategory,
    /// Catalog file the finding refers to
    pub source: String,
    /// Entry key or field, if any
    pub field: Option<String>,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl std::fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field_str = self.field.as_deref().unwrap_or("(root)");
        write!(
            f,
            "[{:?}] {}/{}: {}",
            self.severity, self.source, field_str, self.message
        )
    }
}

/// Category of finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCategory {
    /// Missing required configuration
    MissingRequired,
    /// Reference to a key that does not exist or cannot be reached
    InvalidReference,
    /// Value out of expected range
    ValueOutOfRange,
    /// Duplicate definition
    Duplicate,
    /// Optional content left empty
    Incomplete,
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Informational warning
    Warning,
    /// Potential issue
    Error,
    /// Prevents the catalog from being published
    Critical,
}

/// Outcome of validating one catalog
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        severity: ValidationSeverity,
        category: ValidationCategory,
        source: &str,
        field: Option<&str>,
        message: impl Into<String>,
    ) {
        self.findings.push(ValidationFinding {
            category,
            source: source.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
            severity,
        });
    }

    /// Add a critical finding
    pub fn add_critical(
        &mut self,
        category: ValidationCategory,
        source: &str,
        field: Option<&str>,
        message: impl Into<String>,
    ) {
        self.push(ValidationSeverity::Critical, category, source, field, message);
    }

    /// Add an error
    pub fn add_error(
        &mut self,
        category: ValidationCategory,
        source: &str,
        field: &str,
        message: impl Into<String>,
    ) {
        self.push(ValidationSeverity::Error, category, source, Some(field), message);
    }

    /// Add a warning
    pub fn add_warning(
        &mut self,
        category: ValidationCategory,
        source: &str,
        field: &str,
        message: impl Into<String>,
    ) {
        self.push(ValidationSeverity::Warning, category, source, Some(field), message);
    }

    /// Check if validation passed (no critical findings)
    pub fn is_ok(&self) -> bool {
        !self
            .findings
            .iter()
            .any(|f| f.severity == ValidationSeverity::Critical)
    }

    /// Get only critical findings
    pub fn critical(&self) -> Vec<&ValidationFinding> {
        self.with_severity(ValidationSeverity::Critical)
    }

    /// Get findings of exactly one severity
    pub fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Summary string
    pub fn summary(&self) -> String {
        if self.findings.is_empty() {
            return "Catalog: all validations passed".to_string();
        }
        format!(
            "Catalog: {} critical, {} errors, {} warnings",
            self.with_severity(ValidationSeverity::Critical).len(),
            self.with_severity(ValidationSeverity::Error).len(),
            self.with_severity(ValidationSeverity::Warning).len()
        )
    }
}

/// Catalog validator
pub struct CatalogValidator {
    /// Whether to include warnings
    include_warnings: bool,
}

impl Default for CatalogValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogValidator {
    pub fn new() -> Self {
        Self {
            include_warnings: true,
        }
    }

    /// Set whether to include warnings
    pub fn with_warnings(mut self, include: bool) -> Self {
        self.include_warnings = include;
        self
    }

    /// Validate all catalog parts
    pub fn validate(
        &self,
        catalog: &ScenarioCatalog,
        tables: &AdjustmentTables,
        currencies: &[Currency],
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.validate_scenarios(catalog, &mut report);
        self.validate_industries(tables, &mut report);
        self.validate_company_sizes(tables, &mut report);
        self.validate_risk_levels(tables, &mut report);
        self.validate_currencies(currencies, &mut report);

        if !self.include_warnings {
            report
                .findings
                .retain(|f| f.severity != ValidationSeverity::Warning);
        }

        report
    }

    fn validate_scenarios(&self, catalog: &ScenarioCatalog, report: &mut ValidationReport) {
        let source = files::SCENARIOS;

        if catalog.is_empty() {
            report.add_critical(
                ValidationCategory::MissingRequired,
                source,
                None,
                "No scenarios defined",
            );
            return;
        }

        for scenario in catalog.iter() {
            let id = scenario.id.as_str();

            if !scenario.expected_roi.is_well_formed() {
                report.add_critical(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    Some(id),
                    format!(
                        "expectedROI must be finite with min < max, got {}..{}",
                        scenario.expected_roi.min, scenario.expected_roi.max
                    ),
                );
            }

            if !scenario.cost_range.is_well_formed() {
                report.add_critical(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    Some(id),
                    format!(
                        "costRange must be finite with min < max, got {}..{}",
                        scenario.cost_range.min, scenario.cost_range.max
                    ),
                );
            }

            if let Some(months) = scenario.timeframe_months {
                if !(1..=catalog_limits::MAX_SCENARIO_TIMEFRAME_MONTHS).contains(&months) {
                    report.add_critical(
                        ValidationCategory::ValueOutOfRange,
                        source,
                        Some(id),
                        format!(
                            "timeframeMonths must be between 1 and {}, got {}",
                            catalog_limits::MAX_SCENARIO_TIMEFRAME_MONTHS,
                            months
                        ),
                    );
                }
            }

            if scenario.name.trim().is_empty() {
                report.add_warning(
                    ValidationCategory::Incomplete,
                    source,
                    id,
                    "Scenario has no display name",
                );
            }

            if scenario.category.trim().is_empty() {
                report.add_warning(
                    ValidationCategory::Incomplete,
                    source,
                    id,
                    "Scenario has no category and will not appear in category listings",
                );
            }

            if scenario.benefits.is_empty() {
                report.add_warning(
                    ValidationCategory::Incomplete,
                    source,
                    id,
                    "Scenario lists no benefits",
                );
            }
        }
    }

    fn validate_industries(&self, tables: &AdjustmentTables, report: &mut ValidationReport) {
        let source = files::ADJUSTMENTS;

        if tables.industries.is_empty() {
            report.add_critical(
                ValidationCategory::MissingRequired,
                source,
                Some("industries"),
                "No industries defined",
            );
            return;
        }

        for (key, industry) in &tables.industries {
            let field = format!("industries.{}", key);
            check_lookup_key(key, source, &field, report);
            check_multiplier(industry.multiplier, source, &field, report);
            check_percent(industry.adoption_rate, "adoptionRate", source, &field, report);

            if !industry.avg_roi.is_finite() {
                report.add_critical(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    Some(&field),
                    "avgROI must be finite",
                );
            }
        }

        if !tables.industries.contains_key(&tables.default_industry) {
            report.add_warning(
                ValidationCategory::InvalidReference,
                source,
                "defaultIndustry",
                format!(
                    "Default industry '{}' is not defined; unknown industries use neutral values",
                    tables.default_industry
                ),
            );
        }
    }

    fn validate_company_sizes(&self, tables: &AdjustmentTables, report: &mut ValidationReport) {
        let source = files::ADJUSTMENTS;

        if tables.company_sizes.is_empty() {
            report.add_critical(
                ValidationCategory::MissingRequired,
                source,
                Some("companySizes"),
                "No company sizes defined",
            );
            return;
        }

        for (key, size) in &tables.company_sizes {
            let field = format!("companySizes.{}", key);
            check_lookup_key(key, source, &field, report);
            check_multiplier(size.multiplier, source, &field, report);
            check_percent(
                size.resource_availability,
                "resourceAvailability",
                source,
                &field,
                report,
            );

            if !(size.implementation_speed_index.is_finite() && size.implementation_speed_index > 0.0)
            {
                report.add_critical(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    Some(&field),
                    "implementationSpeedIndex must be a positive number",
                );
            }
        }

        if !tables.company_sizes.contains_key(&tables.default_company_size) {
            report.add_warning(
                ValidationCategory::InvalidReference,
                source,
                "defaultCompanySize",
                format!(
                    "Default company size '{}' is not defined; unknown sizes use neutral values",
                    tables.default_company_size
                ),
            );
        }
    }

    fn validate_risk_levels(&self, tables: &AdjustmentTables, report: &mut ValidationReport) {
        let source = files::ADJUSTMENTS;
        let levels: [(&str, &RiskAdjustment); 3] = [
            ("riskLevels.low", &tables.risk_levels.low),
            ("riskLevels.medium", &tables.risk_levels.medium),
            ("riskLevels.high", &tables.risk_levels.high),
        ];

        for (field, risk) in levels {
            check_multiplier(risk.multiplier, source, field, report);
            check_percent(risk.confidence, "confidence", source, field, report);

            if risk.success_rate_bonus.abs() > catalog_limits::MAX_SUCCESS_RATE_BONUS {
                report.add_warning(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    field,
                    format!(
                        "successRateBonus {} always saturates the success-rate clamp",
                        risk.success_rate_bonus
                    ),
                );
            }
        }
    }

    fn validate_currencies(&self, currencies: &[Currency], report: &mut ValidationReport) {
        let source = files::CURRENCIES;

        if currencies.is_empty() {
            report.add_warning(
                ValidationCategory::Incomplete,
                source,
                "currencies",
                "No currencies listed",
            );
            return;
        }

        let mut seen = HashSet::new();
        for currency in currencies {
            let code = currency.code.as_str();

            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                report.add_error(
                    ValidationCategory::ValueOutOfRange,
                    source,
                    code,
                    "Currency code must be three upper-case letters",
                );
            }

            if !seen.insert(code) {
                report.add_error(
                    ValidationCategory::Duplicate,
                    source,
                    code,
                    "Currency listed more than once",
                );
            }
        }
    }
}

/// Lookup normalizes input to trimmed lower case, so other keys are unreachable
fn check_lookup_key(key: &str, source: &str, field: &str, report: &mut ValidationReport) {
    if key != key.trim().to_ascii_lowercase() {
        report.add_error(
            ValidationCategory::InvalidReference,
            source,
            field,
            "Key must be trimmed lower case to be reachable by lookup",
        );
    }
}

fn check_multiplier(value: f64, source: &str, field: &str, report: &mut ValidationReport) {
    if !(value.is_finite() && value > 0.0) {
        report.add_critical(
            ValidationCategory::ValueOutOfRange,
            source,
            Some(field),
            format!("multiplier must be a positive number, got {}", value),
        );
    }
}

fn check_percent(
    value: f64,
    name: &str,
    source: &str,
    field: &str,
    report: &mut ValidationReport,
) {
    // NaN fails the range check too
    if !(catalog_limits::PERCENT_MIN..=catalog_limits::PERCENT_MAX).contains(&value) {
        report.add_critical(
            ValidationCategory::ValueOutOfRange,
            source,
            Some(field),
            format!("{} must be between 0 and 100, got {}", name, value),
        );
    }
}
