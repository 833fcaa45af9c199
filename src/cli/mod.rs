//! CLI command definitions and handlers

mod check;
mod options;
mod recommend;
mod rules_cmd;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::loader;
use crate::models::Form;
use crate::rules::RuleTable;

/// rigfit - Rule-driven PC build recommendations
#[derive(Parser, Debug)]
#[command(name = "rigfit")]
#[command(
    version,
    about = "Recommend a complete PC build for a budget, usage scenario, and tuning mode",
    long_about = "rigfit picks one part per hardware category (CPU, GPU, motherboard, memory, \
storage, PSU, cooler, case) that fits a price bracket and usage scenario, respecting \
cross-part compatibility.\n\n\
Rules and the part catalog load from a config service when --api-base (or RIGFIT_API_BASE) \
is set, falling back to local JSON documents in --data-dir.",
    after_help = "\
Examples:
  rigfit recommend --budget mid --scenario gaming --mode balanced
  rigfit recommend --scenario ai --gpu-brand NVIDIA --format json
  rigfit rules                          List budgets, scenarios, and modes
  rigfit options memory --budget mid    Compatible memory kits for a build
  rigfit check --set psu=psu-550        Re-check a build with a manual swap"
)]
pub struct Cli {
    /// Config service base URL, e.g. http://localhost:8000
    #[arg(long, global = true, env = "RIGFIT_API_BASE")]
    pub api_base: Option<String>,

    /// Directory holding local rules.json and components.json
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Form flags shared by every build-producing subcommand.
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// Budget id (default: first budget in the rule table)
    #[arg(long)]
    pub budget: Option<String>,

    /// Scenario id (default: first scenario in the rule table)
    #[arg(long)]
    pub scenario: Option<String>,

    /// Mode id (default: first mode in the rule table)
    #[arg(long)]
    pub mode: Option<String>,

    /// GPU brand preference: any, none, or a brand name (AMD, NVIDIA)
    #[arg(long, default_value = "any")]
    pub gpu_brand: String,

    /// Memory generation preference: auto, DDR4, DDR5
    #[arg(long, default_value = "auto")]
    pub memory_type: String,

    /// Memory stick count: auto, 2, 4
    #[arg(long, default_value = "auto", value_parser = ["auto", "2", "4"])]
    pub sticks: String,
}

impl FormArgs {
    /// Turn the flags into a form, defaulting omitted ids to the rule
    /// table's first entries.
    pub fn resolve(&self, rules: &RuleTable) -> Result<Form> {
        let budget_id = match &self.budget {
            Some(id) => id.clone(),
            None => match rules.budgets.first() {
                Some(b) => b.id.clone(),
                None => bail!("the rule table defines no budgets"),
            },
        };
        let scenario_id = match &self.scenario {
            Some(id) => id.clone(),
            None => match rules.scenarios.first() {
                Some(s) => s.id.clone(),
                None => bail!("the rule table defines no scenarios"),
            },
        };
        let mode_id = match &self.mode {
            Some(id) => id.clone(),
            None => match rules.modes.first() {
                Some(m) => m.id.clone(),
                None => bail!("the rule table defines no modes"),
            },
        };
        Ok(Form {
            budget_id,
            scenario_id,
            mode_id,
            gpu_brand: self.gpu_brand.clone().into(),
            memory_type: self.memory_type.clone().into(),
            memory_sticks: self.sticks.clone().into(),
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend a full build
    Recommend {
        #[command(flatten)]
        form: FormArgs,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List budgets, scenarios, and modes from the rule table
    Rules,

    /// List compatible parts for one category of a computed build
    Options {
        /// Category: cpu, gpu, motherboard, memory, storage, psu, cooler, case
        category: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Re-check a build after manual part swaps
    Check {
        /// Override of the form category=part-id (repeatable)
        #[arg(long = "set", value_name = "CATEGORY=PART")]
        set: Vec<String>,

        #[command(flatten)]
        form: FormArgs,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let docs = loader::load_documents(cli.api_base.as_deref(), &cli.data_dir)?;

    match cli.command {
        Commands::Recommend {
            form,
            format,
            output,
        } => recommend::run(&docs, &form, &format, output.as_deref()),
        Commands::Rules => rules_cmd::run(&docs),
        Commands::Options { category, form } => options::run(&docs, &category, &form),
        Commands::Check { set, form } => check::run(&docs, &set, &form),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GpuBrandPref, SticksPref};

    fn rules() -> RuleTable {
        serde_json::from_str(
            r#"{
                "budgets": [{"id": "entry", "min": 3000, "max": 5000},
                            {"id": "mid", "min": 8000, "max": 12000}],
                "scenarios": [{"id": "office", "weights": {"cpu": 0.5}}],
                "modes": [{"id": "balanced"}]
            }"#,
        )
        .unwrap()
    }

    fn args() -> FormArgs {
        FormArgs {
            budget: None,
            scenario: None,
            mode: None,
            gpu_brand: "any".to_string(),
            memory_type: "auto".to_string(),
            sticks: "auto".to_string(),
        }
    }

    #[test]
    fn omitted_ids_default_to_first_entries() {
        let form = args().resolve(&rules()).unwrap();
        assert_eq!(form.budget_id, "entry");
        assert_eq!(form.scenario_id, "office");
        assert_eq!(form.mode_id, "balanced");
        assert_eq!(form.gpu_brand, GpuBrandPref::Any);
        assert_eq!(form.memory_sticks, SticksPref::Auto);
    }

    #[test]
    fn explicit_ids_pass_through() {
        let mut a = args();
        a.budget = Some("mid".to_string());
        a.gpu_brand = "none".to_string();
        a.sticks = "4".to_string();
        let form = a.resolve(&rules()).unwrap();
        assert_eq!(form.budget_id, "mid");
        assert_eq!(form.gpu_brand, GpuBrandPref::None);
        assert_eq!(form.memory_sticks, SticksPref::Four);
    }

    #[test]
    fn empty_rule_table_is_an_error() {
        assert!(args().resolve(&RuleTable::default()).is_err());
    }
}
