//! Shared model types.
//!
//! Session operations consume these parameter structs and hand rendered
//! values to the backend. All lengths are millimetres unless noted; the
//! backend's model units are set to "mm" at session init.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoilforgeError, Result};

/// Solver mode of the active design. Mutually exclusive per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMode {
    /// Time-domain solve; excitations are waveform expressions.
    Transient,
    /// Frequency-domain solve; excitations are amplitude + phase.
    EddyCurrent,
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMode::Transient => write!(f, "Transient"),
            SolverMode::EddyCurrent => write!(f, "EddyCurrent"),
        }
    }
}

/// Voltage- or current-driven winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcitationKind {
    Voltage,
    Current,
}

impl ExcitationKind {
    /// Unit string for literal amplitudes of this kind.
    pub fn unit(&self) -> &'static str {
        match self {
            ExcitationKind::Voltage => "V",
            ExcitationKind::Current => "A",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExcitationKind::Voltage => "Voltage",
            ExcitationKind::Current => "Current",
        }
    }
}

/// A scalar that is either a literal value or a reference to a declared
/// project variable. Resolved once at the boundary; the backend sees either
/// `"<value> <unit>"` or `"$<name>"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Literal(f64),
    Var(String),
}

impl Quantity {
    /// Render for the backend. Variable references are checked against the
    /// session's variable table and fail with `NotFound` if undeclared.
    pub fn render(&self, unit: &str, vars: &VariableTable) -> Result<String> {
        match self {
            Quantity::Literal(v) => Ok(format!("{} {}", v, unit)),
            Quantity::Var(name) => {
                if !vars.contains(name) {
                    return Err(CoilforgeError::NotFound(format!(
                        "variable '{}' is not declared",
                        name
                    )));
                }
                Ok(format!("${}", name))
            }
        }
    }
}

impl From<f64> for Quantity {
    fn from(v: f64) -> Self {
        Quantity::Literal(v)
    }
}

impl From<&str> for Quantity {
    fn from(name: &str) -> Self {
        Quantity::Var(name.to_string())
    }
}

/// A declared project variable: unit-tagged scalar, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub value: f64,
    pub unit: String,
}

/// The session's variable mapping. Seeded with the three axis placeholders
/// `x`, `y`, `z` (specimen movement during a sweep); anything beyond those
/// counts as an "extra" variable for the deferred-solve decision.
#[derive(Debug, Clone)]
pub struct VariableTable {
    vars: BTreeMap<String, Variable>,
}

/// Names of the built-in axis placeholders.
pub const AXIS_VARIABLES: [&str; 3] = ["x", "y", "z"];

impl VariableTable {
    pub fn new() -> Self {
        let mut vars = BTreeMap::new();
        for axis in AXIS_VARIABLES {
            vars.insert(
                axis.to_string(),
                Variable { value: 0.0, unit: "mm".to_string() },
            );
        }
        Self { vars }
    }

    /// Declare a new variable. Redeclaration of an existing name fails;
    /// redefinition requires a new name.
    pub fn declare(&mut self, name: &str, value: f64, unit: &str) -> Result<()> {
        if self.vars.contains_key(name) {
            return Err(CoilforgeError::DuplicateName(format!(
                "variable '{}' already declared",
                name
            )));
        }
        self.vars.insert(
            name.to_string(),
            Variable { value, unit: unit.to_string() },
        );
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    /// All declared names, axis placeholders included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(|s| s.as_str())
    }

    /// Variables declared beyond the three axis placeholders.
    pub fn extra_count(&self) -> usize {
        self.vars.len() - AXIS_VARIABLES.len()
    }
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Sketch plane for profile rectangles, circles, and section cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Yz,
    Xz,
}

impl Plane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plane::Xy => "XY",
            Plane::Yz => "YZ",
            Plane::Xz => "XZ",
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry parameter structs
// ---------------------------------------------------------------------------

/// Outward square spiral swept from a rectangular wire profile.
#[derive(Debug, Clone)]
pub struct RectangleCoil {
    pub name: String,
    pub material: String,
    pub num_turns: u32,
    /// Distance between adjacent turn centerlines. Must exceed `wire_width`.
    pub step_size: f64,
    pub wire_height: f64,
    pub wire_width: f64,
    /// Innermost turn size along X.
    pub initial_x_length: f64,
    /// Innermost turn size along Y.
    pub initial_y_length: f64,
    pub center: [f64; 3],
}

impl Default for RectangleCoil {
    fn default() -> Self {
        Self {
            name: "MyRecCoil".to_string(),
            material: "Copper".to_string(),
            num_turns: 5,
            step_size: 0.25,
            wire_height: 0.035,
            wire_width: 0.125,
            initial_x_length: 1.0,
            initial_y_length: 1.0,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Archimedean (log-sampled) spiral swept from a rectangular wire profile.
#[derive(Debug, Clone)]
pub struct SpiralCoil {
    pub name: String,
    pub material: String,
    pub num_turns: u32,
    pub wire_height: f64,
    pub wire_width: f64,
    /// Centerline distance between adjacent turns. Must exceed `wire_width`.
    pub spacing: f64,
    pub inner_radius: f64,
    pub center: [f64; 3],
}

impl Default for SpiralCoil {
    fn default() -> Self {
        Self {
            name: "MySpirCoil".to_string(),
            material: "Copper".to_string(),
            num_turns: 5,
            wire_height: 0.035,
            wire_width: 0.125,
            spacing: 0.25,
            inner_radius: 1.0,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Annular coil: outer cylinder minus inner cylinder.
#[derive(Debug, Clone)]
pub struct HelmholtzCoil {
    pub name: String,
    pub material: String,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub height: f64,
    pub center: [f64; 3],
}

impl Default for HelmholtzCoil {
    fn default() -> Self {
        Self {
            name: "MyHelCoil".to_string(),
            material: "Copper".to_string(),
            inner_diameter: 5.0,
            outer_diameter: 20.0,
            height: 5.0,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Strand geometry of a litz-wire material.
#[derive(Debug, Clone)]
pub enum LitzWire {
    Rectangular { wire_width: f64, wire_height: f64 },
    Round { wire_diameter: f64 },
}

/// Annular coil with a duplicated base material configured as litz wire.
#[derive(Debug, Clone)]
pub struct LitzCoil {
    pub name: String,
    pub material: String,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub height: f64,
    pub wire: LitzWire,
    pub strand_count: u32,
    pub center: [f64; 3],
}

impl Default for LitzCoil {
    fn default() -> Self {
        Self {
            name: "MyLitzCoil".to_string(),
            material: "Copper".to_string(),
            inner_diameter: 5.0,
            outer_diameter: 20.0,
            height: 5.0,
            wire: LitzWire::Rectangular { wire_width: 0.125, wire_height: 0.035 },
            strand_count: 100,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Hollow cylinder (tube) primitive.
#[derive(Debug, Clone)]
pub struct Cylinder {
    pub name: String,
    pub material: String,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
    pub height: f64,
    pub center: [f64; 3],
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            name: "MyCylinder".to_string(),
            material: "Copper".to_string(),
            outer_diameter: 10.0,
            inner_diameter: 5.0,
            height: 5.0,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Axis-aligned box primitive, centered on `center` in X/Y with its base at
/// the center's Z.
#[derive(Debug, Clone)]
pub struct BoxSolid {
    pub name: String,
    pub material: String,
    pub x_length: f64,
    pub y_length: f64,
    pub z_length: f64,
    pub center: [f64; 3],
}

impl Default for BoxSolid {
    fn default() -> Self {
        Self {
            name: "MyBox".to_string(),
            material: "Air".to_string(),
            x_length: 5.0,
            y_length: 5.0,
            z_length: 5.0,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Rectangular test specimen. The center of its upper face sits at the
/// global origin.
#[derive(Debug, Clone)]
pub struct Specimen {
    pub name: String,
    pub material: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Specimen {
    fn default() -> Self {
        Self {
            name: "MySpecimen".to_string(),
            material: "Aluminum".to_string(),
            length: 20.0,
            width: 10.0,
            height: 5.0,
        }
    }
}

/// Rectangular crack subtracted from an existing specimen. Positioned by the
/// center of the crack's upper face.
#[derive(Debug, Clone)]
pub struct Crack {
    pub specimen: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub center: [f64; 3],
}

impl Default for Crack {
    fn default() -> Self {
        Self {
            specimen: "MySpecimen".to_string(),
            length: 0.5,
            width: 0.5,
            height: 0.5,
            center: [0.0, 0.0, 0.0],
        }
    }
}

/// Air-region padding around the modeled geometry, per face order
/// `[x_pos, y_pos, z_pos, x_neg, y_neg, z_neg]`.
#[derive(Debug, Clone)]
pub enum RegionPadding {
    Uniform(f64),
    PerFace([f64; 6]),
}

/// Simulation boundary region. `percent` selects percentage padding over
/// absolute millimetres.
#[derive(Debug, Clone)]
pub struct RegionSpec {
    pub padding: RegionPadding,
    pub percent: bool,
}

impl Default for RegionSpec {
    fn default() -> Self {
        Self { padding: RegionPadding::Uniform(100.0), percent: true }
    }
}

impl RegionSpec {
    /// Per-face padding values, validated.
    pub fn faces(&self) -> Result<[f64; 6]> {
        match &self.padding {
            RegionPadding::Uniform(v) => Ok([*v; 6]),
            RegionPadding::PerFace(v) => {
                if v.iter().any(|p| *p < 0.0) {
                    return Err(CoilforgeError::InvalidParameter(
                        "region padding must be non-negative".to_string(),
                    ));
                }
                Ok(*v)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Excitation parameter structs
// ---------------------------------------------------------------------------

/// Time-domain excitation: a waveform expression string such as
/// `10*sin(2*pi*1e6*Time+0)`, suffixed `V` or `A` by kind.
#[derive(Debug, Clone)]
pub struct TransientExcitation {
    pub coil: String,
    pub kind: ExcitationKind,
    /// Conductors through a single cross-section of the coil.
    pub conductor_count: u32,
    /// Inner resistance of the excitation winding, ohms.
    pub resistance: f64,
    pub waveform: String,
    /// Solid winding if true, stranded otherwise.
    pub solid: bool,
}

impl Default for TransientExcitation {
    fn default() -> Self {
        Self {
            coil: String::new(),
            kind: ExcitationKind::Voltage,
            conductor_count: 100,
            resistance: 0.001,
            waveform: "10*sin(2*pi*1e6*Time+0)".to_string(),
            solid: false,
        }
    }
}

/// Frequency-domain excitation: amplitude and phase, literal or symbolic.
#[derive(Debug, Clone)]
pub struct EddyCurrentExcitation {
    pub coil: String,
    pub kind: ExcitationKind,
    pub conductor_count: u32,
    pub resistance: f64,
    pub amplitude: Quantity,
    /// Degrees when literal.
    pub phase: Quantity,
    pub solid: bool,
}

impl Default for EddyCurrentExcitation {
    fn default() -> Self {
        Self {
            coil: String::new(),
            kind: ExcitationKind::Voltage,
            conductor_count: 100,
            resistance: 0.001,
            amplitude: Quantity::Literal(10.0),
            phase: Quantity::Literal(0.0),
            solid: false,
        }
    }
}

/// Parametric sweep step interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStepType {
    LinearCount,
    LinearStep,
    LogScale,
    SingleValue,
}

impl SweepStepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepStepType::LinearCount => "LinearCount",
            SweepStepType::LinearStep => "LinearStep",
            SweepStepType::LogScale => "LogScale",
            SweepStepType::SingleValue => "SingleValue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_table_seeds_axis_placeholders() {
        let vars = VariableTable::new();
        for axis in AXIS_VARIABLES {
            assert!(vars.contains(axis));
        }
        assert_eq!(vars.extra_count(), 0);
    }

    #[test]
    fn test_variable_redeclaration_fails() {
        let mut vars = VariableTable::new();
        vars.declare("h", 0.0, "mm").unwrap();
        let err = vars.declare("h", 1.0, "mm").unwrap_err();
        assert!(matches!(err, CoilforgeError::DuplicateName(_)));
        // Original value untouched
        assert_eq!(vars.get("h").unwrap().value, 0.0);
    }

    #[test]
    fn test_axis_placeholder_cannot_be_shadowed() {
        let mut vars = VariableTable::new();
        let err = vars.declare("x", 1.0, "mm").unwrap_err();
        assert!(matches!(err, CoilforgeError::DuplicateName(_)));
    }

    #[test]
    fn test_quantity_literal_renders_with_unit() {
        let vars = VariableTable::new();
        assert_eq!(Quantity::Literal(4.0).render("V", &vars).unwrap(), "4 V");
        assert_eq!(Quantity::Literal(0.5).render("deg", &vars).unwrap(), "0.5 deg");
    }

    #[test]
    fn test_quantity_var_requires_declaration() {
        let mut vars = VariableTable::new();
        let q = Quantity::Var("amp".to_string());
        assert!(matches!(q.render("V", &vars).unwrap_err(), CoilforgeError::NotFound(_)));
        vars.declare("amp", 4.0, "V").unwrap();
        assert_eq!(q.render("V", &vars).unwrap(), "$amp");
    }

    #[test]
    fn test_extra_count_ignores_axis_placeholders() {
        let mut vars = VariableTable::new();
        vars.declare("h", 0.0, "mm").unwrap();
        vars.declare("freq", 1.0, "MHz").unwrap();
        assert_eq!(vars.extra_count(), 2);
    }
}
