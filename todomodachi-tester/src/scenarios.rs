//! Scripted play patterns driven against the engine.
use serde::Serialize;

/// How a scenario spends its gacha stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Never draw; balances only ever grow.
    Never,
    /// Draw every day while the balance covers the cost.
    WhenAffordable,
    /// Hoard everything and spend it all on the final day.
    HoardThenSpend,
}

/// One scripted play pattern.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub days: u32,
    pub tasks_per_day: u32,
    pub draw_policy: DrawPolicy,
    /// Claim every claimable achievement at the end of each day.
    pub claim_rewards: bool,
    /// Reopen and re-complete one task per day to pressure the
    /// double-award guard.
    pub churn: bool,
}

/// Every scenario known to the harness, in display order.
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "smoke",
            description: "Two weeks of light play with daily draws",
            days: 14,
            tasks_per_day: 3,
            draw_policy: DrawPolicy::WhenAffordable,
            claim_rewards: true,
            churn: false,
        },
        Scenario {
            name: "grind",
            description: "Heavy task volume over a long stretch",
            days: 60,
            tasks_per_day: 8,
            draw_policy: DrawPolicy::WhenAffordable,
            claim_rewards: true,
            churn: false,
        },
        Scenario {
            name: "hoarder",
            description: "Never spends until the very last day",
            days: 30,
            tasks_per_day: 4,
            draw_policy: DrawPolicy::HoardThenSpend,
            claim_rewards: true,
            churn: false,
        },
        Scenario {
            name: "churn",
            description: "Constant reopen/recomplete pressure on the award guard",
            days: 21,
            tasks_per_day: 3,
            draw_policy: DrawPolicy::WhenAffordable,
            claim_rewards: false,
            churn: true,
        },
        Scenario {
            name: "ascetic",
            description: "Completes tasks but never draws or claims",
            days: 30,
            tasks_per_day: 2,
            draw_policy: DrawPolicy::Never,
            claim_rewards: false,
            churn: false,
        },
    ]
}

/// Look up a scenario by name.
pub fn get_scenario(name: &str) -> Option<Scenario> {
    all_scenarios().into_iter().find(|s| s.name == name)
}

/// Names of every scenario, for `--list-scenarios`.
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .into_iter()
        .map(|s| (s.name, s.description))
        .collect()
}
