use super::types::ModelParameters;

pub fn consumption(params: &ModelParameters, income: f64) -> f64 {
    params.autonomous_consumption + params.mpc * (income - params.tax)
}

pub fn investment_at(params: &ModelParameters, interest_rate: f64) -> f64 {
    params.autonomous_investment - params.investment_sensitivity * interest_rate
}

pub fn investment(params: &ModelParameters) -> f64 {
    investment_at(params, params.interest_rate)
}

pub fn aggregate_demand(params: &ModelParameters, income: f64) -> f64 {
    consumption(params, income) + investment(params) + params.government_spending
}

pub fn demand_intercept(params: &ModelParameters) -> f64 {
    params.autonomous_consumption - params.mpc * params.tax + investment(params)
        + params.government_spending
}
