//! `rigfit rules` - show the loaded rule table

use anyhow::Result;

use crate::loader::Documents;

pub fn run(docs: &Documents) -> Result<()> {
    let rules = &docs.rules;
    println!("Rule table ({})", docs.source);

    println!("\nBudgets:");
    for budget in &rules.budgets {
        println!("  {:<10} ¥{:.0}-{:.0}", budget.id, budget.min, budget.max);
    }

    println!("\nScenarios:");
    for scenario in &rules.scenarios {
        let top: Vec<String> = scenario
            .top_weights(2)
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        if top.is_empty() {
            println!("  {}", scenario.id);
        } else {
            println!("  {:<10} weighted toward {}", scenario.id, top.join(" / "));
        }
    }

    println!("\nModes:");
    for mode in &rules.modes {
        let bias = &mode.score_bias;
        let power = if mode.prefers_low_power() {
            ", low power"
        } else {
            ""
        };
        println!(
            "  {:<12} price {:.0}% / performance {:.0}%{power}",
            mode.id,
            bias.price * 100.0,
            bias.performance * 100.0
        );
    }
    Ok(())
}
