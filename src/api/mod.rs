use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    CurvePoint, DEFAULT_GRID_SPAN, DEFAULT_SAMPLES, DiagramData, DynamicState, DynamicsConfig,
    ModelParameters, SampleGrid, ScenarioKind, ScenarioStep, build_diagram, equilibrium_output,
    interpolate, iterate_dynamics, scenario_step, scenario_steps, solve_equilibrium,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EquilibriumPayload {
    #[serde(alias = "alpha")]
    autonomous_consumption: Option<f64>,
    #[serde(alias = "beta")]
    mpc: Option<f64>,
    #[serde(alias = "investmentIntercept")]
    autonomous_investment: Option<f64>,
    #[serde(alias = "investmentSlope")]
    investment_sensitivity: Option<f64>,
    interest_rate: Option<f64>,
    #[serde(alias = "government")]
    government_spending: Option<f64>,
    tax: Option<f64>,

    grid_min: Option<f64>,
    grid_max: Option<f64>,
    samples: Option<usize>,
    span: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DynamicsPayload {
    dd0: Option<f64>,
    aa0: Option<f64>,
    #[serde(alias = "g")]
    demand_rate: Option<f64>,
    #[serde(alias = "a")]
    adjustment_rate: Option<f64>,
    steps: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DiagramPayload {
    scenario: Option<ScenarioKind>,
    step: Option<usize>,
    progress: Option<f64>,
    transition_frames: Option<usize>,

    #[serde(alias = "alpha")]
    autonomous_consumption: Option<f64>,
    #[serde(alias = "beta")]
    mpc: Option<f64>,
    #[serde(alias = "investmentIntercept")]
    autonomous_investment: Option<f64>,
    #[serde(alias = "investmentSlope")]
    investment_sensitivity: Option<f64>,
    interest_rate: Option<f64>,
    #[serde(alias = "government")]
    government_spending: Option<f64>,
    tax: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "macrolab",
    about = "Keynesian cross and DD-AA teaching model (closed-form equilibrium + scenario diagrams + adjustment paths)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Solve(SolveArgs),
    Iterate(IterateArgs),
    Serve {
        #[arg(long, default_value_t = 8080, help = "Port for the HTTP API")]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct SolveArgs {
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Consumption at zero disposable income"
    )]
    autonomous_consumption: f64,
    #[arg(
        long,
        default_value_t = 0.6,
        help = "Marginal propensity to consume, strictly between 0 and 1"
    )]
    mpc: f64,
    #[arg(
        long,
        default_value_t = 40.0,
        help = "Investment when the interest rate is zero"
    )]
    autonomous_investment: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Fall in investment per point of interest"
    )]
    investment_sensitivity: f64,
    #[arg(long, default_value_t = 2.0, help = "Exogenous interest rate")]
    interest_rate: f64,
    #[arg(long, default_value_t = 20.0)]
    government_spending: f64,
    #[arg(long, default_value_t = 10.0)]
    tax: f64,
    #[arg(
        long,
        help = "Lower bound of the output grid; defaults to a window around equilibrium"
    )]
    grid_min: Option<f64>,
    #[arg(long, help = "Upper bound of the output grid; requires --grid-min")]
    grid_max: Option<f64>,
    #[arg(
        long,
        default_value_t = DEFAULT_SAMPLES,
        help = "Number of points on each plotted curve"
    )]
    samples: usize,
    #[arg(
        long,
        default_value_t = DEFAULT_GRID_SPAN,
        help = "Half-width of the default output grid around equilibrium"
    )]
    span: f64,
}

#[derive(Args, Debug)]
struct IterateArgs {
    #[arg(
        long,
        default_value_t = 100.0,
        help = "Starting level of the goods-market DD schedule"
    )]
    dd0: f64,
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Starting level of the asset-market AA schedule"
    )]
    aa0: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Per-step growth rate applied to the DD level"
    )]
    demand_rate: f64,
    #[arg(
        long,
        default_value_t = 0.5,
        help = "Fraction of the DD-AA gap closed each step"
    )]
    adjustment_rate: f64,
    #[arg(long, default_value_t = 10, help = "Number of adjustment steps")]
    steps: i64,
}

#[derive(Debug)]
struct EquilibriumRequest {
    params: ModelParameters,
    grid: SampleGrid,
}

#[derive(Debug)]
struct DiagramRequest {
    params: ModelParameters,
    scenario: ScenarioKind,
    step: usize,
    progress: f64,
    transition_frames: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EquilibriumResponse {
    parameters: ModelParameters,
    grid: SampleGrid,
    equilibrium_output: f64,
    aggregate_demand_curve: Vec<CurvePoint>,
    reference_line: Vec<CurvePoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DynamicsResponse {
    config: DynamicsConfig,
    trajectory: Vec<DynamicState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioSummary {
    kind: ScenarioKind,
    title: &'static str,
    steps: Vec<ScenarioStep>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenariosResponse {
    scenarios: Vec<ScenarioSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagramResponse {
    scenario: ScenarioKind,
    scenario_title: &'static str,
    step_index: usize,
    step_count: usize,
    diagram: DiagramData,
    transition: Option<Vec<DiagramData>>,
}

#[derive(Debug, Serialize)]
struct ServiceIndex {
    service: &'static str,
    endpoints: [&'static str; 4],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn parameters_from_args(args: &SolveArgs) -> ModelParameters {
    ModelParameters {
        autonomous_consumption: args.autonomous_consumption,
        mpc: args.mpc,
        autonomous_investment: args.autonomous_investment,
        investment_sensitivity: args.investment_sensitivity,
        interest_rate: args.interest_rate,
        government_spending: args.government_spending,
        tax: args.tax,
    }
}

fn config_from_args(args: &IterateArgs) -> DynamicsConfig {
    DynamicsConfig {
        dd0: args.dd0,
        aa0: args.aa0,
        demand_rate: args.demand_rate,
        adjustment_rate: args.adjustment_rate,
        steps: args.steps,
    }
}

fn resolve_grid(params: &ModelParameters, args: &SolveArgs) -> Result<SampleGrid, String> {
    match (args.grid_min, args.grid_max) {
        (Some(min), Some(max)) => Ok(SampleGrid {
            min,
            max,
            samples: args.samples,
        }),
        (None, None) => {
            if !args.span.is_finite() || args.span <= 0.0 {
                return Err("span must be > 0".to_string());
            }
            let equilibrium = equilibrium_output(params).map_err(|e| e.to_string())?;
            Ok(SampleGrid {
                samples: args.samples,
                ..SampleGrid::around(equilibrium, args.span)
            })
        }
        _ => Err("grid-min and grid-max must be provided together".to_string()),
    }
}

pub async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Solve(args) => run_solve(&args),
        Command::Iterate(args) => run_iterate(&args),
        Command::Serve { port } => run_http_server(port).await.map_err(|e| e.to_string()),
    }
}

fn run_solve(args: &SolveArgs) -> Result<(), String> {
    let params = parameters_from_args(args);
    let grid = resolve_grid(&params, args)?;
    let response = build_equilibrium_response(&EquilibriumRequest { params, grid })?;
    print_json(&response)
}

fn run_iterate(args: &IterateArgs) -> Result<(), String> {
    let response = build_dynamics_response(config_from_args(args))?;
    print_json(&response)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route(
            "/api/equilibrium",
            get(equilibrium_get_handler).post(equilibrium_post_handler),
        )
        .route(
            "/api/dynamics",
            get(dynamics_get_handler).post(dynamics_post_handler),
        )
        .route("/api/scenarios", get(scenarios_handler))
        .route(
            "/api/diagram",
            get(diagram_get_handler).post(diagram_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("macrolab HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> Response {
    json_response(
        StatusCode::OK,
        ServiceIndex {
            service: "macrolab",
            endpoints: [
                "/api/equilibrium",
                "/api/dynamics",
                "/api/scenarios",
                "/api/diagram",
            ],
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn equilibrium_get_handler(Query(payload): Query<EquilibriumPayload>) -> Response {
    equilibrium_handler_impl(payload).await
}

async fn equilibrium_post_handler(Json(payload): Json<EquilibriumPayload>) -> Response {
    equilibrium_handler_impl(payload).await
}

async fn equilibrium_handler_impl(payload: EquilibriumPayload) -> Response {
    let request = match equilibrium_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    match build_equilibrium_response(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn dynamics_get_handler(Query(payload): Query<DynamicsPayload>) -> Response {
    dynamics_handler_impl(payload).await
}

async fn dynamics_post_handler(Json(payload): Json<DynamicsPayload>) -> Response {
    dynamics_handler_impl(payload).await
}

async fn dynamics_handler_impl(payload: DynamicsPayload) -> Response {
    match build_dynamics_response(dynamics_config_from_payload(payload)) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn scenarios_handler() -> Response {
    json_response(StatusCode::OK, build_scenarios_response())
}

async fn diagram_get_handler(Query(payload): Query<DiagramPayload>) -> Response {
    diagram_handler_impl(payload).await
}

async fn diagram_post_handler(Json(payload): Json<DiagramPayload>) -> Response {
    diagram_handler_impl(payload).await
}

async fn diagram_handler_impl(payload: DiagramPayload) -> Response {
    let request = match diagram_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    match build_diagram_response(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn equilibrium_request_from_json(json: &str) -> Result<EquilibriumRequest, String> {
    let payload = serde_json::from_str::<EquilibriumPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    equilibrium_request_from_payload(payload)
}

#[cfg(test)]
fn dynamics_request_from_json(json: &str) -> Result<DynamicsConfig, String> {
    let payload = serde_json::from_str::<DynamicsPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(dynamics_config_from_payload(payload))
}

#[cfg(test)]
fn diagram_request_from_json(json: &str) -> Result<DiagramRequest, String> {
    let payload = serde_json::from_str::<DiagramPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    diagram_request_from_payload(payload)
}

fn equilibrium_request_from_payload(
    payload: EquilibriumPayload,
) -> Result<EquilibriumRequest, String> {
    let mut args = default_solve_args();

    if let Some(v) = payload.autonomous_consumption {
        args.autonomous_consumption = v;
    }
    if let Some(v) = payload.mpc {
        args.mpc = v;
    }
    if let Some(v) = payload.autonomous_investment {
        args.autonomous_investment = v;
    }
    if let Some(v) = payload.investment_sensitivity {
        args.investment_sensitivity = v;
    }
    if let Some(v) = payload.interest_rate {
        args.interest_rate = v;
    }
    if let Some(v) = payload.government_spending {
        args.government_spending = v;
    }
    if let Some(v) = payload.tax {
        args.tax = v;
    }

    if let Some(v) = payload.grid_min {
        args.grid_min = Some(v);
    }
    if let Some(v) = payload.grid_max {
        args.grid_max = Some(v);
    }
    if let Some(v) = payload.samples {
        args.samples = v;
    }
    if let Some(v) = payload.span {
        args.span = v;
    }

    let params = parameters_from_args(&args);
    let grid = resolve_grid(&params, &args)?;
    Ok(EquilibriumRequest { params, grid })
}

fn dynamics_config_from_payload(payload: DynamicsPayload) -> DynamicsConfig {
    let mut args = default_iterate_args();

    if let Some(v) = payload.dd0 {
        args.dd0 = v;
    }
    if let Some(v) = payload.aa0 {
        args.aa0 = v;
    }
    if let Some(v) = payload.demand_rate {
        args.demand_rate = v;
    }
    if let Some(v) = payload.adjustment_rate {
        args.adjustment_rate = v;
    }
    if let Some(v) = payload.steps {
        args.steps = v;
    }

    config_from_args(&args)
}

fn diagram_request_from_payload(payload: DiagramPayload) -> Result<DiagramRequest, String> {
    let mut args = default_solve_args();

    if let Some(v) = payload.autonomous_consumption {
        args.autonomous_consumption = v;
    }
    if let Some(v) = payload.mpc {
        args.mpc = v;
    }
    if let Some(v) = payload.autonomous_investment {
        args.autonomous_investment = v;
    }
    if let Some(v) = payload.investment_sensitivity {
        args.investment_sensitivity = v;
    }
    if let Some(v) = payload.interest_rate {
        args.interest_rate = v;
    }
    if let Some(v) = payload.government_spending {
        args.government_spending = v;
    }
    if let Some(v) = payload.tax {
        args.tax = v;
    }

    let step = payload.step.unwrap_or(0);
    if payload.transition_frames.is_some() && step == 0 {
        return Err("transitionFrames requires step >= 1".to_string());
    }

    Ok(DiagramRequest {
        params: parameters_from_args(&args),
        scenario: payload
            .scenario
            .unwrap_or(ScenarioKind::PermanentMonetaryExpansion),
        step,
        progress: payload.progress.unwrap_or(0.0),
        transition_frames: payload.transition_frames,
    })
}

fn default_solve_args() -> SolveArgs {
    SolveArgs {
        autonomous_consumption: 50.0,
        mpc: 0.6,
        autonomous_investment: 40.0,
        investment_sensitivity: 5.0,
        interest_rate: 2.0,
        government_spending: 20.0,
        tax: 10.0,
        grid_min: None,
        grid_max: None,
        samples: DEFAULT_SAMPLES,
        span: DEFAULT_GRID_SPAN,
    }
}

fn default_iterate_args() -> IterateArgs {
    IterateArgs {
        dd0: 100.0,
        aa0: 50.0,
        demand_rate: 0.0,
        adjustment_rate: 0.5,
        steps: 10,
    }
}

fn build_equilibrium_response(request: &EquilibriumRequest) -> Result<EquilibriumResponse, String> {
    let result = solve_equilibrium(&request.params, &request.grid).map_err(|e| e.to_string())?;
    Ok(EquilibriumResponse {
        parameters: request.params,
        grid: request.grid,
        equilibrium_output: result.equilibrium_output,
        aggregate_demand_curve: result.aggregate_demand_curve,
        reference_line: result.reference_line,
    })
}

fn build_dynamics_response(config: DynamicsConfig) -> Result<DynamicsResponse, String> {
    let trajectory = iterate_dynamics(&config).map_err(|e| e.to_string())?;
    Ok(DynamicsResponse { config, trajectory })
}

fn build_scenarios_response() -> ScenariosResponse {
    let scenarios = ScenarioKind::all()
        .into_iter()
        .map(|kind| ScenarioSummary {
            kind,
            title: kind.title(),
            steps: scenario_steps(kind),
        })
        .collect();
    ScenariosResponse { scenarios }
}

fn build_diagram_response(request: &DiagramRequest) -> Result<DiagramResponse, String> {
    let step_count = scenario_steps(request.scenario).len();
    let step = scenario_step(request.scenario, request.step).map_err(|e| e.to_string())?;
    let diagram = build_diagram(&request.params, request.scenario, &step, request.progress)
        .map_err(|e| e.to_string())?;

    let transition = match request.transition_frames {
        Some(frames) => {
            let previous =
                scenario_step(request.scenario, request.step - 1).map_err(|e| e.to_string())?;
            let from = build_diagram(&request.params, request.scenario, &previous, 0.0)
                .map_err(|e| e.to_string())?;
            Some(interpolate(&from, &diagram, frames).map_err(|e| e.to_string())?)
        }
        None => None,
    };

    Ok(DiagramResponse {
        scenario: request.scenario,
        scenario_title: request.scenario.title(),
        step_index: request.step,
        step_count,
        diagram,
        transition,
    })
}
