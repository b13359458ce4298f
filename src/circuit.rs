//! Equivalent-circuit estimates for planar spiral coils.
//!
//! Converts a driving voltage into the equivalent per-turn current of a
//! copper spiral coil from its geometry, using the modified-Wheeler
//! inductance expression (Mohan et al., "Simple Accurate Expressions for
//! Planar Spiral Inductances"). Useful for choosing a current excitation
//! that matches a given voltage drive.
//!
//! All inputs are SI units: metres, volts, hertz.

use crate::error::{CoilforgeError, Result};

/// Copper resistivity at room temperature, ohm metres.
const COPPER_RESISTIVITY: f64 = 1.68e-8;
/// Vacuum permeability, henries per metre.
const MU_0: f64 = 4.0 * std::f64::consts::PI * 1e-7;
/// Empirical correction on the inductive reactance.
const REACTANCE_CORRECTION: f64 = 1.3;

/// Planar spiral coil drive parameters.
#[derive(Debug, Clone)]
pub struct CoilCircuit {
    pub voltage: f64,
    pub num_turns: u32,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub wire_width: f64,
    pub wire_height: f64,
    /// Centerline distance between adjacent turns.
    pub turn_distance: f64,
    pub frequency: f64,
}

impl Default for CoilCircuit {
    fn default() -> Self {
        Self {
            voltage: 4.0,
            num_turns: 100,
            inner_diameter: 2.15e-3,
            outer_diameter: 10e-3,
            wire_width: 0.125e-3,
            wire_height: 26e-6,
            turn_distance: 0.125e-3,
            frequency: 1e6,
        }
    }
}

/// Computed drive characteristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoilDrive {
    /// Equivalent per-turn current, amperes.
    pub current: f64,
    /// Inductive reactance, ohms.
    pub reactance: f64,
    /// Coil inductance, henries.
    pub inductance: f64,
    /// Trace resistance, ohms.
    pub resistance: f64,
}

/// Equivalent per-turn current of a copper spiral coil driven at `voltage`.
pub fn equivalent_coil_current(circuit: &CoilCircuit) -> Result<CoilDrive> {
    if circuit.num_turns == 0 {
        return Err(CoilforgeError::InvalidParameter(
            "turn count must be at least 1".to_string(),
        ));
    }
    if circuit.wire_width <= 0.0 || circuit.wire_height <= 0.0 {
        return Err(CoilforgeError::InvalidParameter(
            "wire cross-section must be positive".to_string(),
        ));
    }
    if circuit.outer_diameter <= circuit.inner_diameter {
        return Err(CoilforgeError::InvalidParameter(format!(
            "outer diameter ({} m) must exceed the inner diameter ({} m)",
            circuit.outer_diameter, circuit.inner_diameter
        )));
    }
    if circuit.frequency <= 0.0 {
        return Err(CoilforgeError::InvalidParameter(
            "frequency must be positive".to_string(),
        ));
    }

    let n = circuit.num_turns as f64;
    let pi = std::f64::consts::PI;

    let trace_length = n * pi * (circuit.inner_diameter + n * circuit.turn_distance);
    let resistance =
        COPPER_RESISTIVITY * trace_length / (circuit.wire_width * circuit.wire_height);

    // Modified-Wheeler inductance for a planar spiral.
    let avg_diameter = (circuit.outer_diameter + circuit.inner_diameter) / 2.0;
    let fill = (circuit.wire_width + circuit.turn_distance) / avg_diameter;
    let inductance =
        (MU_0 * n * n * avg_diameter / 2.0) * ((2.46 / fill).ln() + 0.2 * fill * fill);

    let reactance = 2.0 * pi * circuit.frequency * inductance * REACTANCE_CORRECTION;
    let impedance = (resistance * resistance + reactance * reactance).sqrt();
    let current = circuit.voltage / impedance * n;

    Ok(CoilDrive { current, reactance, inductance, resistance })
}
