use super::types::{DynamicState, DynamicsConfig, ModelError};

pub fn iterate_dynamics(config: &DynamicsConfig) -> Result<Vec<DynamicState>, ModelError> {
    config.validate()?;

    let steps = config.steps as usize;
    let mut trajectory = Vec::with_capacity(steps + 1);
    let mut dd = config.dd0;
    let mut aa = config.aa0;
    trajectory.push(DynamicState { step: 0, dd, aa });

    for step in 1..=steps {
        // The output gap closes against the demand level entering the step.
        let next_aa = aa + config.adjustment_rate * (dd - aa);
        let next_dd = dd * (1.0 + config.demand_rate);
        dd = next_dd;
        aa = next_aa;
        if !dd.is_finite() {
            return Err(ModelError::NumericOverflow { step, value: dd });
        }
        if !aa.is_finite() {
            return Err(ModelError::NumericOverflow { step, value: aa });
        }
        trajectory.push(DynamicState { step, dd, aa });
    }

    Ok(trajectory)
}
