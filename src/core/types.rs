use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SAMPLES: usize = 100;
pub const MAX_SAMPLES: usize = 10_000;
pub const MAX_STEPS: i64 = 100_000;
pub const MAX_FRAMES: usize = 1_000;
pub const DEFAULT_GRID_SPAN: f64 = 100.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("invalid configuration {name}: {reason}")]
    InvalidConfiguration { name: &'static str, reason: String },
    #[error("numeric overflow at step {step}: {value} is outside the representable range")]
    NumericOverflow { step: usize, value: f64 },
}

fn require_finite_parameter(name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            name,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn require_finite_configuration(name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidConfiguration {
            name,
            reason: format!("must be finite, got {value}"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParameters {
    pub autonomous_consumption: f64,
    pub mpc: f64,
    pub autonomous_investment: f64,
    pub investment_sensitivity: f64,
    pub interest_rate: f64,
    pub government_spending: f64,
    pub tax: f64,
}

impl ModelParameters {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_finite_parameter("autonomous_consumption", self.autonomous_consumption)?;
        require_finite_parameter("mpc", self.mpc)?;
        require_finite_parameter("autonomous_investment", self.autonomous_investment)?;
        require_finite_parameter("investment_sensitivity", self.investment_sensitivity)?;
        require_finite_parameter("interest_rate", self.interest_rate)?;
        require_finite_parameter("government_spending", self.government_spending)?;
        require_finite_parameter("tax", self.tax)?;
        if self.mpc <= 0.0 || self.mpc >= 1.0 {
            return Err(ModelError::InvalidParameter {
                name: "mpc",
                reason: format!("must be strictly between 0 and 1, got {}", self.mpc),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleGrid {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl SampleGrid {
    pub fn around(center: f64, span: f64) -> Self {
        let min = (center - span).max(0.0);
        let max = (center + span).max(min + span);
        SampleGrid {
            min,
            max,
            samples: DEFAULT_SAMPLES,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_finite_configuration("grid_min", self.min)?;
        require_finite_configuration("grid_max", self.max)?;
        if self.max <= self.min {
            return Err(ModelError::InvalidConfiguration {
                name: "grid_max",
                reason: format!("must exceed grid_min {}, got {}", self.min, self.max),
            });
        }
        if self.samples < 2 {
            return Err(ModelError::InvalidConfiguration {
                name: "samples",
                reason: format!("must be at least 2, got {}", self.samples),
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(ModelError::InvalidConfiguration {
                name: "samples",
                reason: format!("must be at most {MAX_SAMPLES}, got {}", self.samples),
            });
        }
        Ok(())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> {
        let min = self.min;
        let max = self.max;
        let count = self.samples;
        (0..count).map(move |i| {
            let t = i as f64 / (count - 1) as f64;
            min * (1.0 - t) + max * t
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub income: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquilibriumResult {
    pub equilibrium_output: f64,
    pub aggregate_demand_curve: Vec<CurvePoint>,
    pub reference_line: Vec<CurvePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicsConfig {
    pub dd0: f64,
    pub aa0: f64,
    pub demand_rate: f64,
    pub adjustment_rate: f64,
    pub steps: i64,
}

impl DynamicsConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_finite_configuration("dd0", self.dd0)?;
        require_finite_configuration("aa0", self.aa0)?;
        require_finite_configuration("demand_rate", self.demand_rate)?;
        require_finite_configuration("adjustment_rate", self.adjustment_rate)?;
        if self.steps < 0 {
            return Err(ModelError::InvalidConfiguration {
                name: "steps",
                reason: format!("must be at least 0, got {}", self.steps),
            });
        }
        if self.steps > MAX_STEPS {
            return Err(ModelError::InvalidConfiguration {
                name: "steps",
                reason: format!("must be at most {MAX_STEPS}, got {}", self.steps),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicState {
    pub step: usize,
    pub dd: f64,
    pub aa: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parameters() -> ModelParameters {
        ModelParameters {
            autonomous_consumption: 50.0,
            mpc: 0.6,
            autonomous_investment: 40.0,
            investment_sensitivity: 5.0,
            interest_rate: 2.0,
            government_spending: 20.0,
            tax: 10.0,
        }
    }

    #[test]
    fn default_parameters_validate() {
        assert!(sample_parameters().validate().is_ok());
    }

    #[test]
    fn mpc_outside_unit_interval_rejected() {
        for bad in [0.0, 1.0, 1.5, -0.2] {
            let params = ModelParameters {
                mpc: bad,
                ..sample_parameters()
            };
            let err = params.validate().unwrap_err();
            assert!(matches!(err, ModelError::InvalidParameter { name: "mpc", .. }));
        }
    }

    #[test]
    fn non_finite_parameter_rejected() {
        let params = ModelParameters {
            autonomous_consumption: f64::NAN,
            ..sample_parameters()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                name: "autonomous_consumption",
                ..
            }
        ));

        let params = ModelParameters {
            government_spending: f64::INFINITY,
            ..sample_parameters()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn grid_around_clamps_lower_edge_at_zero() {
        let grid = SampleGrid::around(40.0, 100.0);
        assert_eq!(grid.min, 0.0);
        assert_eq!(grid.max, 140.0);
        assert_eq!(grid.samples, DEFAULT_SAMPLES);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn grid_around_keeps_positive_width_for_negative_center() {
        let grid = SampleGrid::around(-500.0, 100.0);
        assert!(grid.max > grid.min);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn grid_values_hit_both_edges() {
        let grid = SampleGrid {
            min: 0.0,
            max: 1000.0,
            samples: 5,
        };
        let values: Vec<f64> = grid.values().collect();
        assert_eq!(values, vec![0.0, 250.0, 500.0, 750.0, 1000.0]);
    }

    #[test]
    fn degenerate_grid_rejected() {
        let grid = SampleGrid {
            min: 10.0,
            max: 10.0,
            samples: 50,
        };
        assert!(matches!(
            grid.validate().unwrap_err(),
            ModelError::InvalidConfiguration {
                name: "grid_max",
                ..
            }
        ));

        let grid = SampleGrid {
            min: 0.0,
            max: 100.0,
            samples: 1,
        };
        assert!(matches!(
            grid.validate().unwrap_err(),
            ModelError::InvalidConfiguration { name: "samples", .. }
        ));
    }

    #[test]
    fn negative_step_count_rejected() {
        let config = DynamicsConfig {
            dd0: 100.0,
            aa0: 50.0,
            demand_rate: 0.0,
            adjustment_rate: 1.0,
            steps: -1,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidConfiguration { name: "steps", .. }
        ));
    }

    #[test]
    fn oversized_step_count_rejected() {
        let config = DynamicsConfig {
            dd0: 100.0,
            aa0: 50.0,
            demand_rate: 0.0,
            adjustment_rate: 1.0,
            steps: MAX_STEPS + 1,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn error_messages_name_the_offending_field() {
        let err = ModelError::InvalidParameter {
            name: "mpc",
            reason: "must be strictly between 0 and 1, got 1.5".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("mpc"));
        assert!(text.contains("1.5"));
    }
}
