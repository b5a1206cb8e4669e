use super::model::{aggregate_demand, demand_intercept};
use super::types::{CurvePoint, EquilibriumResult, ModelError, ModelParameters, SampleGrid};

pub fn equilibrium_output(params: &ModelParameters) -> Result<f64, ModelError> {
    params.validate()?;
    Ok(demand_intercept(params) / (1.0 - params.mpc))
}

pub fn solve_equilibrium(
    params: &ModelParameters,
    grid: &SampleGrid,
) -> Result<EquilibriumResult, ModelError> {
    let equilibrium = equilibrium_output(params)?;
    grid.validate()?;

    let mut aggregate_demand_curve = Vec::with_capacity(grid.samples);
    let mut reference_line = Vec::with_capacity(grid.samples);
    for income in grid.values() {
        aggregate_demand_curve.push(CurvePoint {
            income,
            value: aggregate_demand(params, income),
        });
        reference_line.push(CurvePoint {
            income,
            value: income,
        });
    }

    Ok(EquilibriumResult {
        equilibrium_output: equilibrium,
        aggregate_demand_curve,
        reference_line,
    })
}
