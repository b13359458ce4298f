//! Coil path generators.
//!
//! Pure functions producing 3D polyline paths for the coil solids. The
//! backend sweeps a wire profile along these paths; nothing here performs
//! I/O. All failure modes are parameter checks.

use crate::error::{CoilforgeError, Result};

/// A point in model coordinates (mm).
pub type Point3 = [f64; 3];

/// Samples per turn for the spiral generator.
const SPIRAL_SAMPLES_PER_TURN: u32 = 50;

/// Vertical clearance of the return loop, in wire heights.
const LOOP_CLEARANCE: f64 = 3.0;

/// Generate the centerline of an outward square spiral in the Z=0 plane.
///
/// Starting at the origin, runs straight segments alternating +X, +Y, -X, -Y
/// whose lengths grow by `step_size` every two segments, for `num_turns`
/// rings. A closing point offset by `wire_height` along +X compensates for
/// the physical wire thickness so the swept solid does not self-intersect.
///
/// The path has `4 * num_turns + 1` segments.
pub fn rectangle_spiral(
    num_turns: u32,
    step_size: f64,
    wire_width: f64,
    wire_height: f64,
    initial_x_length: f64,
    initial_y_length: f64,
) -> Result<Vec<Point3>> {
    if num_turns < 1 {
        return Err(CoilforgeError::InvalidParameter(
            "num_turns must be at least 1".to_string(),
        ));
    }
    if step_size <= wire_width {
        return Err(CoilforgeError::InvalidParameter(format!(
            "step size ({}) must be greater than the wire width ({})",
            step_size, wire_width
        )));
    }
    if initial_x_length <= 0.0 || initial_y_length <= 0.0 {
        return Err(CoilforgeError::InvalidParameter(
            "initial coil lengths must be positive".to_string(),
        ));
    }

    let mut path: Vec<Point3> = vec![[0.0, 0.0, 0.0]];
    let mut x_length = initial_x_length;
    let mut y_length = initial_y_length;

    for _ in 0..num_turns {
        let [x, y, _] = *path.last().unwrap();
        path.push([x + x_length, y, 0.0]);
        x_length += step_size;

        let [x, y, _] = *path.last().unwrap();
        path.push([x, y + y_length, 0.0]);
        y_length += step_size;

        let [x, y, _] = *path.last().unwrap();
        path.push([x - x_length, y, 0.0]);
        x_length += step_size;

        let [x, y, _] = *path.last().unwrap();
        path.push([x, y - y_length, 0.0]);
        y_length += step_size;
    }

    // Closing stub: step sideways by one wire height so the sweep end does
    // not coincide with the spiral start.
    let y_last = path.last().unwrap()[1];
    path.push([path[0][0] + wire_height, y_last, 0.0]);

    Ok(path)
}

/// Generate an Archimedean spiral in the Z=0 plane.
///
/// θ runs from 0 to `2π * num_turns` over `50 * num_turns` samples
/// (endpoints inclusive); radius grows linearly as
/// `inner_radius + spacing * θ / 2π`, so `radius(0) == inner_radius`.
pub fn log_spiral(
    num_turns: u32,
    spacing: f64,
    wire_width: f64,
    inner_radius: f64,
) -> Result<Vec<Point3>> {
    if num_turns < 1 {
        return Err(CoilforgeError::InvalidParameter(
            "num_turns must be at least 1".to_string(),
        ));
    }
    if spacing <= wire_width {
        return Err(CoilforgeError::InvalidParameter(format!(
            "spacing ({}) must be greater than the wire width ({})",
            spacing, wire_width
        )));
    }
    if inner_radius <= 0.0 {
        return Err(CoilforgeError::InvalidParameter(
            "inner radius must be positive".to_string(),
        ));
    }

    let samples = (SPIRAL_SAMPLES_PER_TURN * num_turns) as usize;
    let theta_max = 2.0 * std::f64::consts::PI * num_turns as f64;
    let mut path = Vec::with_capacity(samples);
    for i in 0..samples {
        let theta = theta_max * i as f64 / (samples - 1) as f64;
        let radius = inner_radius + spacing * theta / (2.0 * std::f64::consts::PI);
        path.push([radius * theta.cos(), radius * theta.sin(), 0.0]);
    }
    Ok(path)
}

/// Short return path connecting a spiral's end back over its start, lifted
/// by three wire heights to clear the winding. Sweeping a small profile
/// along this and uniting with the coil body closes the current loop.
pub fn return_loop(start: Point3, end: Point3, wire_height: f64) -> [Point3; 4] {
    [
        start,
        [start[0], start[1], start[2] + wire_height * LOOP_CLEARANCE],
        [end[0], end[1], start[2] + wire_height * LOOP_CLEARANCE],
        [end[0], end[1], end[2] - wire_height],
    ]
}
