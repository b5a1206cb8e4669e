mod diagram;
mod dynamics;
mod model;
mod scenario;
mod solver;
mod types;

pub use diagram::{AxisMarker, DiagramData, Point, build_diagram, interpolate, trajectory_path};
pub use dynamics::iterate_dynamics;
pub use scenario::{ScenarioKind, ScenarioStep, StepChanges, scenario_step, scenario_steps};
pub use solver::{equilibrium_output, solve_equilibrium};
pub use types::{
    CurvePoint, DEFAULT_GRID_SPAN, DEFAULT_SAMPLES, DynamicState, DynamicsConfig,
    EquilibriumResult, MAX_FRAMES, MAX_SAMPLES, MAX_STEPS, ModelError, ModelParameters,
    SampleGrid,
};
