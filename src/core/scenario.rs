use serde::{Deserialize, Serialize};

use super::types::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    PermanentMonetaryExpansion,
    TemporaryMonetaryExpansion,
    PermanentFiscalExpansion,
    TemporaryFiscalExpansion,
    PermanentRealSectorShock,
    MonetaryContraction,
}

impl ScenarioKind {
    pub fn all() -> Vec<ScenarioKind> {
        vec![
            ScenarioKind::PermanentMonetaryExpansion,
            ScenarioKind::TemporaryMonetaryExpansion,
            ScenarioKind::PermanentFiscalExpansion,
            ScenarioKind::TemporaryFiscalExpansion,
            ScenarioKind::PermanentRealSectorShock,
            ScenarioKind::MonetaryContraction,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            ScenarioKind::PermanentMonetaryExpansion => "Permanent Monetary Expansion",
            ScenarioKind::TemporaryMonetaryExpansion => "Temporary Monetary Expansion",
            ScenarioKind::PermanentFiscalExpansion => "Permanent Fiscal Expansion",
            ScenarioKind::TemporaryFiscalExpansion => "Temporary Fiscal Expansion",
            ScenarioKind::PermanentRealSectorShock => "Permanent Real Sector Shock",
            ScenarioKind::MonetaryContraction => "Monetary Contraction",
        }
    }

    // Which side of the baseline rate i1 the marked rates i2 and i3 sit on.
    pub fn interest_direction(self) -> f64 {
        match self {
            ScenarioKind::PermanentMonetaryExpansion
            | ScenarioKind::TemporaryMonetaryExpansion
            | ScenarioKind::PermanentRealSectorShock => -1.0,
            ScenarioKind::PermanentFiscalExpansion
            | ScenarioKind::TemporaryFiscalExpansion
            | ScenarioKind::MonetaryContraction => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepChanges {
    pub lm_shift: f64,
    pub aa_shift: f64,
    pub dd_shift: f64,
    pub investment_shift: bool,
    pub interest_level: Option<f64>,
    pub exchange_level: Option<f64>,
    pub output_level: Option<f64>,
    pub potential_level: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioStep {
    pub title: &'static str,
    pub description: &'static str,
    pub changes: StepChanges,
}

fn step(title: &'static str, description: &'static str, changes: StepChanges) -> ScenarioStep {
    ScenarioStep {
        title,
        description,
        changes,
    }
}

fn opening_step() -> ScenarioStep {
    step(
        "Initial Equilibrium",
        "The economy starts at full employment output Y1.",
        StepChanges::default(),
    )
}

pub fn scenario_steps(kind: ScenarioKind) -> Vec<ScenarioStep> {
    match kind {
        ScenarioKind::PermanentMonetaryExpansion => vec![
            opening_step(),
            step(
                "Money Supply Increase",
                "The central bank expands the money supply, so LM shifts right and the interest rate falls to i2.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "UIP Response",
                "The lower interest rate depreciates the currency and AA shifts right.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    aa_shift: 1.0,
                    ..StepChanges::default()
                },
            ),
            step(
                "DD Adjustment",
                "Depreciation boosts exports and DD shifts right.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    aa_shift: 1.0,
                    dd_shift: 1.0,
                    ..StepChanges::default()
                },
            ),
            step(
                "New Short-Run Equilibrium",
                "Output settles at Y2 above Y1 with a higher exchange rate.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    aa_shift: 1.0,
                    dd_shift: 1.0,
                    output_level: Some(2.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "Long-Run Adjustment",
                "Prices adjust, AA settles at its long-run position and output returns toward trend with a permanently higher exchange rate.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(3.0),
                    aa_shift: 2.0,
                    dd_shift: 1.0,
                    output_level: Some(3.0),
                    ..StepChanges::default()
                },
            ),
        ],
        ScenarioKind::TemporaryMonetaryExpansion => vec![
            opening_step(),
            step(
                "Money Supply Increase",
                "The central bank temporarily expands the money supply, so LM shifts right and the interest rate falls to i2.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "Limited UIP Response",
                "Agents expect the policy to reverse, so the currency depreciates only a little and AA shifts by half a step.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    aa_shift: 0.5,
                    ..StepChanges::default()
                },
            ),
            step(
                "Short-Run Equilibrium",
                "Output and the exchange rate rise modestly on the back of expectations.",
                StepChanges {
                    lm_shift: 1.0,
                    interest_level: Some(2.0),
                    aa_shift: 0.5,
                    output_level: Some(1.5),
                    ..StepChanges::default()
                },
            ),
            step(
                "Policy Reversal",
                "The money supply returns to its original level and output falls back to Y1.",
                StepChanges::default(),
            ),
        ],
        ScenarioKind::PermanentFiscalExpansion => vec![
            opening_step(),
            step(
                "Government Spending Increase",
                "Government spending rises and DD shifts right immediately.",
                StepChanges {
                    dd_shift: 1.0,
                    ..StepChanges::default()
                },
            ),
            step(
                "Short-Run Effects",
                "Higher output raises money demand, the interest rate rises and the currency appreciates.",
                StepChanges {
                    dd_shift: 1.0,
                    interest_level: Some(2.5),
                    exchange_level: Some(0.5),
                    ..StepChanges::default()
                },
            ),
            step(
                "AA Response",
                "The higher interest rate shifts AA left and part of the expansion is crowded out.",
                StepChanges {
                    dd_shift: 1.0,
                    aa_shift: -1.0,
                    output_level: Some(1.3),
                    ..StepChanges::default()
                },
            ),
            step(
                "Long-Run Adjustment",
                "Prices rise, the real money supply falls and crowding out deepens.",
                StepChanges {
                    dd_shift: 1.0,
                    aa_shift: -1.5,
                    output_level: Some(1.0),
                    exchange_level: Some(0.3),
                    ..StepChanges::default()
                },
            ),
        ],
        ScenarioKind::TemporaryFiscalExpansion => vec![
            opening_step(),
            step(
                "Government Spending Increase",
                "A temporary rise in government spending shifts DD right.",
                StepChanges {
                    dd_shift: 1.0,
                    ..StepChanges::default()
                },
            ),
            step(
                "Short-Run Response",
                "Output rises, the interest rate climbs and the currency appreciates a little.",
                StepChanges {
                    dd_shift: 1.0,
                    interest_level: Some(2.0),
                    output_level: Some(1.2),
                    ..StepChanges::default()
                },
            ),
            step(
                "Policy Reversal",
                "Government spending returns to its original level and DD shifts back.",
                StepChanges::default(),
            ),
        ],
        ScenarioKind::PermanentRealSectorShock => vec![
            opening_step(),
            step(
                "Productivity Improvement",
                "A technology advance raises potential output.",
                StepChanges {
                    potential_level: Some(2.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "Investment Response",
                "Higher productivity lifts investment demand and the interest rate falls.",
                StepChanges {
                    potential_level: Some(2.0),
                    interest_level: Some(2.0),
                    investment_shift: true,
                    ..StepChanges::default()
                },
            ),
            step(
                "DD and AA Adjustments",
                "Higher investment shifts DD right while the lower interest rate shifts AA right.",
                StepChanges {
                    dd_shift: 1.0,
                    aa_shift: 1.0,
                    output_level: Some(2.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "New Long-Run Equilibrium",
                "The economy settles at the new full employment output Y2 above Y1.",
                StepChanges {
                    dd_shift: 1.0,
                    aa_shift: 1.0,
                    output_level: Some(2.0),
                    potential_level: Some(2.0),
                    ..StepChanges::default()
                },
            ),
        ],
        ScenarioKind::MonetaryContraction => vec![
            opening_step(),
            step(
                "Money Supply Decrease",
                "The central bank reduces the money supply, so LM shifts left and the interest rate rises to i3.",
                StepChanges {
                    lm_shift: -1.0,
                    interest_level: Some(3.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "UIP Response",
                "The higher interest rate appreciates the currency and AA shifts left.",
                StepChanges {
                    lm_shift: -1.0,
                    interest_level: Some(3.0),
                    aa_shift: -1.0,
                    ..StepChanges::default()
                },
            ),
            step(
                "DD Adjustment",
                "Appreciation hurts exports and DD shifts left.",
                StepChanges {
                    lm_shift: -1.0,
                    interest_level: Some(3.0),
                    aa_shift: -1.0,
                    dd_shift: -1.0,
                    ..StepChanges::default()
                },
            ),
            step(
                "Short-Run Recession",
                "Output falls to Y0 below Y1 with a lower exchange rate.",
                StepChanges {
                    lm_shift: -1.0,
                    interest_level: Some(3.0),
                    aa_shift: -1.0,
                    dd_shift: -1.0,
                    output_level: Some(0.0),
                    ..StepChanges::default()
                },
            ),
            step(
                "Long-Run Adjustment",
                "Prices fall, AA shifts partway back and output returns to Y1 with a lower exchange rate.",
                StepChanges {
                    lm_shift: -1.0,
                    interest_level: Some(1.0),
                    aa_shift: -0.5,
                    dd_shift: -1.0,
                    output_level: Some(1.0),
                    ..StepChanges::default()
                },
            ),
        ],
    }
}

pub fn scenario_step(kind: ScenarioKind, index: usize) -> Result<ScenarioStep, ModelError> {
    let steps = scenario_steps(kind);
    let count = steps.len();
    steps
        .into_iter()
        .nth(index)
        .ok_or_else(|| ModelError::InvalidConfiguration {
            name: "step",
            reason: format!("must be below {count} for {}, got {index}", kind.title()),
        })
}
