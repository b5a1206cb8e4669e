use serde::Serialize;

use super::model::{aggregate_demand, investment_at};
use super::scenario::{ScenarioKind, ScenarioStep};
use super::solver::equilibrium_output;
use super::types::{DEFAULT_GRID_SPAN, MAX_FRAMES, ModelError, ModelParameters, SampleGrid};

const PANEL_SAMPLES: usize = 60;
const INTEREST_MIN: f64 = 0.0;
const INTEREST_MAX: f64 = 10.0;
const EXCHANGE_MIN: f64 = 0.6;
const EXCHANGE_MAX: f64 = 2.0;
const OUTPUT_MIN: f64 = 60.0;
const OUTPUT_MAX: f64 = 160.0;

const FOREIGN_INTEREST: f64 = 3.0;
const EXPECTED_EXCHANGE: f64 = 1.4;

const INTEREST_ANCHOR: f64 = 5.0;
const OUTPUT_ANCHOR: f64 = 100.0;
const EXCHANGE_ANCHOR: f64 = 1.4;
const INTEREST_LEVEL_STEP: f64 = 1.0;
const OUTPUT_LEVEL_STEP: f64 = 20.0;
const EXCHANGE_LEVEL_STEP: f64 = 0.4;

const DD_AA_SLOPE: f64 = 0.01;
const DEMAND_SHIFT: f64 = 10.0;
const INVESTMENT_SHIFT: f64 = 10.0;
const MONEY_RATE_SCALE: f64 = 5.0;

// Canvas-fraction waypoints hopping investment -> demand -> UIP -> money -> DD-AA.
const WAYPOINTS: [Point; 9] = [
    Point { x: 0.22, y: 0.83 },
    Point { x: 0.22, y: 0.78 },
    Point { x: 0.45, y: 0.78 },
    Point { x: 0.45, y: 0.55 },
    Point { x: 0.22, y: 0.55 },
    Point { x: 0.22, y: 0.50 },
    Point { x: 0.55, y: 0.50 },
    Point { x: 0.55, y: 0.35 },
    Point { x: 0.50, y: 0.26 },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisMarker {
    pub level: f64,
    pub coordinate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramData {
    pub title: String,
    pub description: String,
    pub invest_curve: Vec<Point>,
    pub invest_curve_shifted: Option<Vec<Point>>,
    pub interest_markers: Vec<AxisMarker>,
    pub cross_line45: Vec<Point>,
    pub cross_ad_curve: Vec<Point>,
    pub cross_ad_curve_shifted: Option<Vec<Point>>,
    pub output_markers: Vec<AxisMarker>,
    pub uip_curve: Vec<Point>,
    pub exchange_markers: Vec<AxisMarker>,
    pub money_curve: Vec<Point>,
    pub money_curve_pre: Option<Vec<Point>>,
    pub money_supply: f64,
    pub money_supply_pre: Option<f64>,
    pub dd_pre: Vec<Point>,
    pub dd_post: Vec<Point>,
    pub aa_pre: Vec<Point>,
    pub aa_post: Vec<Point>,
    pub equilibrium_pre: Point,
    pub equilibrium_post: Point,
    pub show_aa_arrows: bool,
    pub trajectory_progress: f64,
    pub trajectory_path: Vec<Point>,
}

fn interest_coordinate(level: f64, direction: f64) -> f64 {
    INTEREST_ANCHOR + direction * (level - 1.0) * INTEREST_LEVEL_STEP
}

fn output_coordinate(level: f64) -> f64 {
    OUTPUT_ANCHOR + (level - 1.0) * OUTPUT_LEVEL_STEP
}

fn exchange_coordinate(level: f64) -> f64 {
    EXCHANGE_ANCHOR + (level - 1.0) * EXCHANGE_LEVEL_STEP
}

fn money_demand(output: f64, interest: f64) -> f64 {
    output - MONEY_RATE_SCALE * interest
}

fn dd_line(output: f64, shift: f64) -> f64 {
    EXCHANGE_ANCHOR + DD_AA_SLOPE * (output - OUTPUT_ANCHOR - shift * OUTPUT_LEVEL_STEP)
}

fn aa_line(output: f64, shift: f64) -> f64 {
    EXCHANGE_ANCHOR - DD_AA_SLOPE * (output - OUTPUT_ANCHOR - shift * OUTPUT_LEVEL_STEP)
}

fn intersection(dd_shift: f64, aa_shift: f64) -> Point {
    let dd_offset = dd_shift * OUTPUT_LEVEL_STEP;
    let aa_offset = aa_shift * OUTPUT_LEVEL_STEP;
    Point {
        x: OUTPUT_ANCHOR + 0.5 * (dd_offset + aa_offset),
        y: EXCHANGE_ANCHOR + 0.5 * DD_AA_SLOPE * (aa_offset - dd_offset),
    }
}

fn sample(min: f64, max: f64, f: impl Fn(f64) -> Point) -> Vec<Point> {
    (0..PANEL_SAMPLES)
        .map(|i| {
            let t = i as f64 / (PANEL_SAMPLES - 1) as f64;
            f(min * (1.0 - t) + max * t)
        })
        .collect()
}

fn push_marker(markers: &mut Vec<AxisMarker>, level: f64, coordinate: f64) {
    if !markers.iter().any(|marker| marker.level == level) {
        markers.push(AxisMarker { level, coordinate });
    }
}

pub fn trajectory_path(progress: f64) -> Vec<Point> {
    if progress <= 0.0 {
        return Vec::new();
    }
    let progress = progress.min(1.0);
    let total_segments = (WAYPOINTS.len() - 1) as f64;
    let scaled = total_segments * progress;
    let completed = scaled as usize;
    let mut path: Vec<Point> = WAYPOINTS[..=completed].to_vec();
    let remaining = scaled - completed as f64;
    if remaining > 0.0 && completed < WAYPOINTS.len() - 1 {
        let from = WAYPOINTS[completed];
        let to = WAYPOINTS[completed + 1];
        path.push(Point {
            x: from.x + (to.x - from.x) * remaining,
            y: from.y + (to.y - from.y) * remaining,
        });
    }
    path
}

pub fn build_diagram(
    params: &ModelParameters,
    kind: ScenarioKind,
    step: &ScenarioStep,
    progress: f64,
) -> Result<DiagramData, ModelError> {
    if !progress.is_finite() || !(0.0..=1.0).contains(&progress) {
        return Err(ModelError::InvalidConfiguration {
            name: "progress",
            reason: format!("must be within [0, 1], got {progress}"),
        });
    }
    let equilibrium = equilibrium_output(params)?;
    let changes = &step.changes;
    let direction = kind.interest_direction();

    let invest_curve = sample(INTEREST_MIN, INTEREST_MAX, |i| Point {
        x: i,
        y: investment_at(params, i),
    });
    let invest_curve_shifted = changes.investment_shift.then(|| {
        sample(INTEREST_MIN, INTEREST_MAX, |i| Point {
            x: i,
            y: investment_at(params, i) + INVESTMENT_SHIFT,
        })
    });

    let mut interest_markers = Vec::new();
    push_marker(&mut interest_markers, 1.0, interest_coordinate(1.0, direction));
    if let Some(level) = changes.interest_level {
        push_marker(&mut interest_markers, level, interest_coordinate(level, direction));
    }

    let grid = SampleGrid::around(equilibrium, DEFAULT_GRID_SPAN);
    let cross_line45: Vec<Point> = grid.values().map(|y| Point { x: y, y }).collect();
    let cross_ad_curve: Vec<Point> = grid
        .values()
        .map(|y| Point {
            x: y,
            y: aggregate_demand(params, y),
        })
        .collect();
    let cross_ad_curve_shifted = (changes.dd_shift != 0.0).then(|| {
        grid.values()
            .map(|y| Point {
                x: y,
                y: aggregate_demand(params, y) + changes.dd_shift * DEMAND_SHIFT,
            })
            .collect()
    });

    let mut output_markers = Vec::new();
    push_marker(&mut output_markers, 1.0, output_coordinate(1.0));
    if let Some(level) = changes.output_level {
        push_marker(&mut output_markers, level, output_coordinate(level));
    }
    if let Some(level) = changes.potential_level {
        push_marker(&mut output_markers, level, output_coordinate(level));
    }

    let uip_curve = sample(EXCHANGE_MIN, EXCHANGE_MAX, |s| Point {
        x: FOREIGN_INTEREST + (EXPECTED_EXCHANGE - s) / s,
        y: s,
    });
    let mut exchange_markers = Vec::new();
    push_marker(&mut exchange_markers, 1.0, exchange_coordinate(1.0));
    if let Some(level) = changes.exchange_level {
        push_marker(&mut exchange_markers, level, exchange_coordinate(level));
    }

    // The supply line is placed so the money market clears at the marked rate.
    let output_level = changes.output_level.unwrap_or(1.0);
    let interest_level = changes.interest_level.unwrap_or(1.0);
    let current_output = output_coordinate(output_level);
    let money_curve = sample(INTEREST_MIN, INTEREST_MAX, |i| Point {
        x: money_demand(current_output, i),
        y: i,
    });
    let money_curve_pre = (output_level != 1.0).then(|| {
        sample(INTEREST_MIN, INTEREST_MAX, |i| Point {
            x: money_demand(output_coordinate(1.0), i),
            y: i,
        })
    });
    let money_supply = money_demand(
        current_output,
        interest_coordinate(interest_level, direction),
    );
    let money_supply_pre = (changes.lm_shift != 0.0)
        .then(|| money_demand(output_coordinate(1.0), interest_coordinate(1.0, direction)));

    let dd_pre = sample(OUTPUT_MIN, OUTPUT_MAX, |y| Point {
        x: y,
        y: dd_line(y, 0.0),
    });
    let dd_post = sample(OUTPUT_MIN, OUTPUT_MAX, |y| Point {
        x: y,
        y: dd_line(y, changes.dd_shift),
    });
    let aa_pre = sample(OUTPUT_MIN, OUTPUT_MAX, |y| Point {
        x: y,
        y: aa_line(y, 0.0),
    });
    let aa_post = sample(OUTPUT_MIN, OUTPUT_MAX, |y| Point {
        x: y,
        y: aa_line(y, changes.aa_shift),
    });

    Ok(DiagramData {
        title: step.title.to_string(),
        description: step.description.to_string(),
        invest_curve,
        invest_curve_shifted,
        interest_markers,
        cross_line45,
        cross_ad_curve,
        cross_ad_curve_shifted,
        output_markers,
        uip_curve,
        exchange_markers,
        money_curve,
        money_curve_pre,
        money_supply,
        money_supply_pre,
        dd_pre,
        dd_post,
        aa_pre,
        aa_post,
        equilibrium_pre: intersection(0.0, 0.0),
        equilibrium_post: intersection(changes.dd_shift, changes.aa_shift),
        show_aa_arrows: changes.aa_shift != 0.0,
        trajectory_progress: progress,
        trajectory_path: trajectory_path(progress),
    })
}

fn blend(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

fn blend_point(from: Point, to: Point, t: f64) -> Point {
    Point {
        x: blend(from.x, to.x, t),
        y: blend(from.y, to.y, t),
    }
}

fn blend_curve(from: &[Point], to: &[Point], t: f64) -> Result<Vec<Point>, ModelError> {
    if from.len() != to.len() {
        return Err(ModelError::InvalidConfiguration {
            name: "frames",
            reason: format!("curve lengths differ, {} vs {}", from.len(), to.len()),
        });
    }
    Ok(from
        .iter()
        .zip(to)
        .map(|(a, b)| blend_point(*a, *b, t))
        .collect())
}

fn blend_optional_curve(
    from: &Option<Vec<Point>>,
    to: &Option<Vec<Point>>,
    t: f64,
) -> Result<Option<Vec<Point>>, ModelError> {
    match (from, to) {
        (Some(a), Some(b)) => Ok(Some(blend_curve(a, b, t)?)),
        _ => Ok(to.clone()),
    }
}

fn blend_markers(from: &[AxisMarker], to: &[AxisMarker], t: f64) -> Vec<AxisMarker> {
    if from.len() != to.len() {
        return to.to_vec();
    }
    from.iter()
        .zip(to)
        .map(|(a, b)| AxisMarker {
            level: blend(a.level, b.level, t),
            coordinate: blend(a.coordinate, b.coordinate, t),
        })
        .collect()
}

fn blend_frames(from: &DiagramData, to: &DiagramData, t: f64) -> Result<DiagramData, ModelError> {
    let trajectory_progress = blend(from.trajectory_progress, to.trajectory_progress, t);
    Ok(DiagramData {
        title: to.title.clone(),
        description: to.description.clone(),
        invest_curve: blend_curve(&from.invest_curve, &to.invest_curve, t)?,
        invest_curve_shifted: blend_optional_curve(
            &from.invest_curve_shifted,
            &to.invest_curve_shifted,
            t,
        )?,
        interest_markers: blend_markers(&from.interest_markers, &to.interest_markers, t),
        cross_line45: blend_curve(&from.cross_line45, &to.cross_line45, t)?,
        cross_ad_curve: blend_curve(&from.cross_ad_curve, &to.cross_ad_curve, t)?,
        cross_ad_curve_shifted: blend_optional_curve(
            &from.cross_ad_curve_shifted,
            &to.cross_ad_curve_shifted,
            t,
        )?,
        output_markers: blend_markers(&from.output_markers, &to.output_markers, t),
        uip_curve: blend_curve(&from.uip_curve, &to.uip_curve, t)?,
        exchange_markers: blend_markers(&from.exchange_markers, &to.exchange_markers, t),
        money_curve: blend_curve(&from.money_curve, &to.money_curve, t)?,
        money_curve_pre: blend_optional_curve(&from.money_curve_pre, &to.money_curve_pre, t)?,
        money_supply: blend(from.money_supply, to.money_supply, t),
        money_supply_pre: match (from.money_supply_pre, to.money_supply_pre) {
            (Some(a), Some(b)) => Some(blend(a, b, t)),
            _ => to.money_supply_pre,
        },
        dd_pre: blend_curve(&from.dd_pre, &to.dd_pre, t)?,
        dd_post: blend_curve(&from.dd_post, &to.dd_post, t)?,
        aa_pre: blend_curve(&from.aa_pre, &to.aa_pre, t)?,
        aa_post: blend_curve(&from.aa_post, &to.aa_post, t)?,
        equilibrium_pre: blend_point(from.equilibrium_pre, to.equilibrium_pre, t),
        equilibrium_post: blend_point(from.equilibrium_post, to.equilibrium_post, t),
        show_aa_arrows: to.show_aa_arrows,
        trajectory_progress,
        trajectory_path: trajectory_path(trajectory_progress),
    })
}

pub fn interpolate(
    from: &DiagramData,
    to: &DiagramData,
    frames: usize,
) -> Result<Vec<DiagramData>, ModelError> {
    if frames < 2 {
        return Err(ModelError::InvalidConfiguration {
            name: "frames",
            reason: format!("must be at least 2, got {frames}"),
        });
    }
    if frames > MAX_FRAMES {
        return Err(ModelError::InvalidConfiguration {
            name: "frames",
            reason: format!("must be at most {MAX_FRAMES}, got {frames}"),
        });
    }
    let mut sequence = Vec::with_capacity(frames);
    for index in 0..frames {
        let t = index as f64 / (frames - 1) as f64;
        sequence.push(blend_frames(from, to, t)?);
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scenario::{ScenarioKind, scenario_step};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

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

    fn diagram_for(kind: ScenarioKind, index: usize, progress: f64) -> DiagramData {
        let step = scenario_step(kind, index).unwrap();
        build_diagram(&sample_parameters(), kind, &step, progress).unwrap()
    }

    #[test]
    fn neutral_step_keeps_curves_in_place() {
        let data = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        assert_eq!(data.dd_pre, data.dd_post);
        assert_eq!(data.aa_pre, data.aa_post);
        assert_eq!(data.equilibrium_pre, data.equilibrium_post);
        assert_approx(data.equilibrium_pre.x, 100.0);
        assert_approx(data.equilibrium_pre.y, 1.4);
        assert!(data.invest_curve_shifted.is_none());
        assert!(data.cross_ad_curve_shifted.is_none());
        assert!(data.money_curve_pre.is_none());
        assert!(data.money_supply_pre.is_none());
        assert!(!data.show_aa_arrows);
        assert!(data.trajectory_path.is_empty());
    }

    #[test]
    fn intersection_lies_on_both_lines() {
        for (dd_shift, aa_shift) in [(0.0, 0.0), (1.0, 1.0), (1.0, -1.5), (-1.0, -0.5), (1.0, 2.0)]
        {
            let point = intersection(dd_shift, aa_shift);
            assert_approx(dd_line(point.x, dd_shift), point.y);
            assert_approx(aa_line(point.x, aa_shift), point.y);
        }
    }

    #[test]
    fn symmetric_expansion_moves_output_not_exchange() {
        // dd and aa both shift right by one level, Y2 at 120 with E unchanged.
        let data = diagram_for(ScenarioKind::PermanentRealSectorShock, 3, 0.0);
        assert_approx(data.equilibrium_post.x, 120.0);
        assert_approx(data.equilibrium_post.y, 1.4);
        assert!(data.show_aa_arrows);
    }

    #[test]
    fn contraction_moves_equilibrium_left() {
        let data = diagram_for(ScenarioKind::MonetaryContraction, 4, 0.0);
        // Hand calculation: 100 + (-20 - 20) / 2 = 80.
        assert_approx(data.equilibrium_post.x, 80.0);
        assert_approx(data.equilibrium_post.y, 1.4);
        assert!(data.equilibrium_post.x < data.equilibrium_pre.x);
    }

    #[test]
    fn long_run_monetary_expansion_raises_the_exchange_rate() {
        let data = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 5, 0.0);
        // Hand calculation: x = 100 + (20 + 40) / 2 = 130, y = 1.4 + 0.005 * 20 = 1.5.
        assert_approx(data.equilibrium_post.x, 130.0);
        assert_approx(data.equilibrium_post.y, 1.5);
    }

    #[test]
    fn interest_markers_follow_the_step() {
        let data = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 1, 0.0);
        assert_eq!(data.interest_markers.len(), 2);
        assert_approx(data.interest_markers[0].coordinate, 5.0);
        // The easing step marks i2 one notch below the baseline rate.
        assert_eq!(data.interest_markers[1].level, 2.0);
        assert_approx(data.interest_markers[1].coordinate, 4.0);
    }

    #[test]
    fn falling_rate_steps_mark_below_the_baseline() {
        let easing = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 1, 0.0);
        assert!(easing.interest_markers[1].coordinate < easing.interest_markers[0].coordinate);

        let shock = diagram_for(ScenarioKind::PermanentRealSectorShock, 2, 0.0);
        assert!(shock.interest_markers[1].coordinate < shock.interest_markers[0].coordinate);

        let tight = diagram_for(ScenarioKind::MonetaryContraction, 1, 0.0);
        assert!(tight.interest_markers[1].coordinate > tight.interest_markers[0].coordinate);
    }

    #[test]
    fn repeated_levels_are_not_duplicated() {
        // The contraction ends back at output level 1, same as the baseline marker.
        let data = diagram_for(ScenarioKind::MonetaryContraction, 5, 0.0);
        assert_eq!(data.output_markers.len(), 1);
        assert_eq!(data.output_markers[0].level, 1.0);
    }

    #[test]
    fn fiscal_appreciation_marks_the_exchange_axis() {
        let data = diagram_for(ScenarioKind::PermanentFiscalExpansion, 2, 0.0);
        assert_eq!(data.exchange_markers.len(), 2);
        assert_approx(data.exchange_markers[0].coordinate, 1.4);
        // Hand calculation: 1.4 + (0.5 - 1) * 0.4 = 1.2.
        assert_approx(data.exchange_markers[1].coordinate, 1.2);
    }

    #[test]
    fn money_market_clears_at_the_marked_rate() {
        let data = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 1, 0.0);
        // Hand calculation: demand 100 - 5 * 4 = 80 at i2, 75 at the baseline rate.
        assert_approx(data.money_supply, 80.0);
        assert_approx(data.money_supply_pre.unwrap(), 75.0);
        assert!(data.money_supply > data.money_supply_pre.unwrap());
        assert!(data.money_curve_pre.is_none());
    }

    #[test]
    fn output_shift_ghosts_the_money_demand_curve() {
        let data = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 4, 0.0);
        let ghost = data.money_curve_pre.unwrap();
        assert_eq!(ghost.len(), data.money_curve.len());
        // Output level 2 sits one step right of the baseline curve.
        assert_approx(data.money_curve[0].x - ghost[0].x, 20.0);
    }

    #[test]
    fn investment_ghost_appears_for_the_real_sector_shock() {
        let data = diagram_for(ScenarioKind::PermanentRealSectorShock, 2, 0.0);
        let shifted = data.invest_curve_shifted.unwrap();
        assert_eq!(shifted.len(), data.invest_curve.len());
        assert_approx(shifted[0].y - data.invest_curve[0].y, INVESTMENT_SHIFT);
    }

    #[test]
    fn uip_curve_slopes_down_from_its_anchors() {
        let data = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        let curve = &data.uip_curve;
        assert_eq!(curve.len(), PANEL_SAMPLES);
        // Hand calculation: 3 + 0.8 / 0.6 at the bottom, 3 - 0.6 / 2 at the top.
        assert_approx(curve[0].x, 3.0 + 0.8 / 0.6);
        assert_approx(curve[PANEL_SAMPLES - 1].x, 2.7);
        for pair in curve.windows(2) {
            assert!(pair[1].x < pair[0].x);
            assert!(pair[1].y > pair[0].y);
        }
    }

    #[test]
    fn cross_panel_centres_on_the_solved_equilibrium() {
        let data = diagram_for(ScenarioKind::TemporaryFiscalExpansion, 0, 0.0);
        // Equilibrium output for the sample parameters is 235.
        assert_approx(data.cross_ad_curve[0].x, 135.0);
        assert_approx(data.cross_ad_curve.last().unwrap().x, 335.0);
        for (ad, line) in data.cross_ad_curve.iter().zip(&data.cross_line45) {
            assert_eq!(ad.x, line.x);
            assert_eq!(line.y, line.x);
        }
    }

    #[test]
    fn shifted_demand_curve_rides_above_the_original() {
        let data = diagram_for(ScenarioKind::TemporaryFiscalExpansion, 1, 0.0);
        let shifted = data.cross_ad_curve_shifted.unwrap();
        assert_approx(shifted[10].y - data.cross_ad_curve[10].y, DEMAND_SHIFT);
    }

    #[test]
    fn full_progress_walks_all_nine_waypoints() {
        let path = trajectory_path(1.0);
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], WAYPOINTS[0]);
        assert_eq!(path[8], WAYPOINTS[8]);
    }

    #[test]
    fn half_progress_stops_at_the_uip_panel() {
        let path = trajectory_path(0.5);
        assert_eq!(path.len(), 5);
        assert_eq!(path[4], WAYPOINTS[4]);
    }

    #[test]
    fn partial_progress_interpolates_inside_a_segment() {
        // 8 segments * 0.3 = 2.4, two full segments and forty percent of the third.
        let path = trajectory_path(0.3);
        assert_eq!(path.len(), 4);
        assert_approx(path[3].x, 0.45);
        assert_approx(path[3].y, 0.78 + (0.55 - 0.78) * 0.4);
    }

    #[test]
    fn zero_progress_draws_nothing() {
        assert!(trajectory_path(0.0).is_empty());
        assert!(trajectory_path(-0.5).is_empty());
    }

    #[test]
    fn out_of_range_progress_rejected() {
        let kind = ScenarioKind::PermanentMonetaryExpansion;
        let step = scenario_step(kind, 0).unwrap();
        for bad in [-0.1, 1.5, f64::NAN] {
            let err = build_diagram(&sample_parameters(), kind, &step, bad).unwrap_err();
            assert!(matches!(
                err,
                ModelError::InvalidConfiguration { name: "progress", .. }
            ));
        }
    }

    #[test]
    fn interpolation_endpoints_reproduce_the_frames() {
        let from = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        let to = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 3, 1.0);
        let frames = interpolate(&from, &to, 5).unwrap();
        assert_eq!(frames.len(), 5);

        assert_eq!(frames[0].equilibrium_post, from.equilibrium_post);
        assert_eq!(frames[0].dd_post, from.dd_post);
        assert_eq!(frames[0].money_supply, from.money_supply);
        assert_eq!(frames[0].trajectory_path, from.trajectory_path);
        assert_eq!(frames[4].equilibrium_post, to.equilibrium_post);
        assert_eq!(frames[4].aa_post, to.aa_post);
        assert_eq!(frames[4].money_supply, to.money_supply);
        // Text rides with the target frame.
        assert_eq!(frames[0].title, to.title);
    }

    #[test]
    fn interpolation_blends_the_midpoint() {
        let from = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        let to = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 4, 1.0);
        let frames = interpolate(&from, &to, 3).unwrap();
        let midpoint = &frames[1];
        assert_approx(
            midpoint.equilibrium_post.x,
            0.5 * (from.equilibrium_post.x + to.equilibrium_post.x),
        );
        assert_approx(
            midpoint.money_supply,
            0.5 * (from.money_supply + to.money_supply),
        );
        assert_approx(midpoint.trajectory_progress, 0.5);
        assert!(!midpoint.trajectory_path.is_empty());
    }

    #[test]
    fn too_few_frames_rejected() {
        let frame = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        let err = interpolate(&frame, &frame, 1).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidConfiguration { name: "frames", .. }
        ));
    }

    #[test]
    fn oversized_frame_counts_rejected() {
        let frame = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        for frames in [MAX_FRAMES + 1, 250_000, usize::MAX] {
            let err = interpolate(&frame, &frame, frames).unwrap_err();
            assert!(matches!(
                err,
                ModelError::InvalidConfiguration { name: "frames", .. }
            ));
        }
    }

    #[test]
    fn mismatched_curves_rejected() {
        let from = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 0, 0.0);
        let mut to = diagram_for(ScenarioKind::PermanentMonetaryExpansion, 1, 0.0);
        to.dd_post.truncate(10);
        let err = interpolate(&from, &to, 4).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfiguration { .. }));
    }
}
