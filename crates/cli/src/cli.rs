use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use catalyst_core::{CalculationRequest, ComparisonRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Same JSON the HTTP API returns
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "catalyst-calc")]
#[command(about = "Project the ROI of technology investment scenarios", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Catalog directory (defaults to catalog.dir from settings)
    #[arg(long, global = true, env = "CATALYST_CATALOG_DIR")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project one scenario
    Calculate {
        /// Scenario id
        #[arg(short, long)]
        scenario: String,

        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Project several scenarios under the same inputs and rank them
    Compare {
        /// Comma-separated scenario ids
        #[arg(short, long, value_delimiter = ',', required = true)]
        scenarios: Vec<String>,

        #[command(flatten)]
        inputs: InputArgs,
    },

    /// List catalog scenarios
    Scenarios {
        /// Only scenarios in this category
        #[arg(long)]
        category: Option<String>,
    },
}

/// Situational inputs shared by calculate and compare
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Amount invested
    #[arg(short, long)]
    pub investment: f64,

    /// Projection horizon in months (defaults to the scenario's, else 12)
    #[arg(short, long)]
    pub timeframe: Option<i64>,

    /// Industry key
    #[arg(long, default_value = "technology")]
    pub industry: String,

    /// Company size key
    #[arg(long, default_value = "medium")]
    pub company_size: String,

    /// ISO currency code used as a label
    #[arg(long)]
    pub currency: Option<String>,
}

impl InputArgs {
    pub fn to_request(&self, scenario_id: Option<String>) -> CalculationRequest {
        CalculationRequest {
            investment: Some(self.investment),
            timeframe: self.timeframe,
            scenario_id,
            industry: self.industry.clone(),
            company_size: self.company_size.clone(),
            currency: self.currency.clone(),
        }
    }

    pub fn to_comparison(&self, scenario_ids: Vec<String>) -> ComparisonRequest {
        ComparisonRequest {
            scenario_ids,
            inputs: self.to_request(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate() {
        let cli = Cli::try_parse_from([
            "catalyst-calc",
            "calculate",
            "--scenario",
            "ai-chatbot",
            "-i",
            "25000",
            "--company-size",
            "large",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Calculate { scenario, inputs } => {
                let request = inputs.to_request(Some(scenario));
                assert_eq!(request.scenario_id.as_deref(), Some("ai-chatbot"));
                assert_eq!(request.investment, Some(25_000.0));
                assert_eq!(request.company_size, "large");
                assert_eq!(request.industry, "technology");
                assert_eq!(request.timeframe, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_compare_list() {
        let cli = Cli::try_parse_from([
            "catalyst-calc",
            "compare",
            "--scenarios",
            "ai-chatbot,crm-upgrade",
            "--investment",
            "50000",
            "-t",
            "24",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare { scenarios, inputs } => {
                let request = inputs.to_comparison(scenarios);
                assert_eq!(request.scenario_ids, vec!["ai-chatbot", "crm-upgrade"]);
                assert_eq!(request.inputs.timeframe, Some(24));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_investment_is_required() {
        assert!(Cli::try_parse_from(["catalyst-calc", "calculate", "-s", "ai-chatbot"]).is_err());
    }
}
