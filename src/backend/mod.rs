//! CAD/solver backend abstraction.
//!
//! Defines the `Backend` trait covering the capability surface this layer
//! drives: geometry primitives, excitation primitives, meshing, analysis,
//! parametrics, and post-processing. The licensed FEM application sits
//! behind an implementation of this trait; `JournalBackend` records the
//! operation stream instead (dry runs and tests).

pub mod journal;

use std::path::Path;

use crate::error::Result;
use crate::geometry::Point3;
use crate::model::{ExcitationKind, LitzWire, Plane, SweepStepType};

/// Winding (voltage/current source + resistance) bound to a coil path.
#[derive(Debug, Clone)]
pub struct WindingSpec {
    pub name: String,
    pub kind: ExcitationKind,
    /// Solid conductor if true, stranded otherwise.
    pub solid: bool,
    /// Inner resistance of the winding, ohms.
    pub resistance: f64,
    /// Rendered excitation: waveform expression (transient) or amplitude
    /// string (eddy current).
    pub excitation: String,
    /// Rendered phase string; eddy-current mode only.
    pub phase: Option<String>,
}

/// Range-based parametric sweep over one declared variable.
#[derive(Debug, Clone)]
pub struct ParametricSweep {
    /// Symbolic variable reference, e.g. `$h`.
    pub variable: String,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub step_type: SweepStepType,
    /// Analysis setup the sweep attaches to.
    pub solution: String,
    pub name: String,
    pub save_fields: bool,
}

/// Post-processing sweep-data request. The backend computes the expressions
/// and serializes one row per sweep point.
#[derive(Debug, Clone)]
pub struct SweepQuery {
    pub expressions: Vec<String>,
    /// `Freq` (eddy current) or `Time` (transient).
    pub primary_sweep: String,
    pub context: String,
    /// Variable-name / selection pairs, e.g. `("$h", "all")`.
    pub variations: Vec<(String, String)>,
}

/// Field-calculator expression evaluated over a volume.
#[derive(Debug, Clone)]
pub struct FieldExpression {
    pub name: String,
    pub assignment: String,
    pub operations: Vec<String>,
}

/// The capability surface of the external CAD/solver application.
///
/// Every call is synchronous and blocking; `analyze` returns only when the
/// backend finishes the solve. Implementations own the connection for the
/// life of the session and tear it down in `release`.
pub trait Backend {
    // -- project --
    fn set_model_units(&mut self, units: &str) -> Result<()>;
    /// Declare or update a project variable, e.g. `("x", "0 mm")`.
    fn set_variable(&mut self, name: &str, value: &str) -> Result<()>;
    fn save_project(&mut self) -> Result<()>;
    /// Tear down the backend connection. Terminal.
    fn release(&mut self) -> Result<()>;

    // -- coordinate systems --
    fn create_coordinate_system(&mut self, name: &str, origin: Point3) -> Result<()>;
    fn set_working_coordinate_system(&mut self, name: &str) -> Result<()>;

    // -- geometry --
    fn create_polyline(&mut self, name: &str, points: &[Point3]) -> Result<()>;
    fn create_rectangle(
        &mut self,
        name: &str,
        plane: Plane,
        origin: Point3,
        sizes: [f64; 2],
    ) -> Result<()>;
    fn create_circle(&mut self, name: &str, plane: Plane, origin: Point3, radius: f64)
        -> Result<()>;
    fn create_cylinder(
        &mut self,
        name: &str,
        origin: Point3,
        radius: f64,
        height: f64,
        material: &str,
    ) -> Result<()>;
    fn create_box(
        &mut self,
        name: &str,
        origin: Point3,
        sizes: [f64; 3],
        material: Option<&str>,
    ) -> Result<()>;
    /// Sweep a profile object along a path object; the solid keeps the
    /// profile's name.
    fn sweep_along_path(&mut self, profile: &str, path: &str) -> Result<()>;
    fn unite(&mut self, objects: &[&str]) -> Result<()>;
    fn subtract(&mut self, target: &str, tool: &str, keep_originals: bool) -> Result<()>;
    /// Cut an object with a plane; returns the created section objects.
    fn section(&mut self, object: &str, plane: Plane) -> Result<Vec<String>>;
    /// Split a multi-lump section; returns the newly created bodies.
    fn separate_bodies(&mut self, object: &str) -> Result<Vec<String>>;
    fn delete(&mut self, object: &str) -> Result<()>;
    /// Translate an object. Components are value-with-unit or `$var` strings.
    fn move_object(&mut self, object: &str, translation: [&str; 3]) -> Result<()>;
    fn assign_material(&mut self, object: &str, material: &str) -> Result<()>;
    /// Whether the material library knows this name.
    fn material_exists(&mut self, material: &str) -> Result<bool>;
    /// Duplicate a library material and configure it as litz wire.
    fn define_litz_material(
        &mut self,
        base: &str,
        name: &str,
        wire: &LitzWire,
        strand_count: u32,
    ) -> Result<()>;

    // -- excitation --
    fn assign_coil(&mut self, objects: &[&str], conductor_count: u32, name: &str) -> Result<()>;
    fn assign_winding(&mut self, winding: &WindingSpec) -> Result<()>;
    fn add_winding_coils(&mut self, winding: &str, coil: &str) -> Result<()>;

    // -- meshing --
    fn assign_length_mesh(&mut self, objects: &[&str], inside: bool, max_length: &str)
        -> Result<()>;
    fn assign_skin_depth_mesh(
        &mut self,
        objects: &[&str],
        skin_depth: &str,
        layers: u32,
        max_length: &str,
    ) -> Result<()>;
    fn enable_eddy_effects(&mut self, objects: &[&str]) -> Result<()>;

    // -- region / boundary --
    /// Create the surrounding air region. Face order:
    /// `[x_pos, y_pos, z_pos, x_neg, y_neg, z_neg]`. Replaces any prior
    /// region; returns its object name.
    fn create_air_region(&mut self, faces: [f64; 6], percent: bool) -> Result<String>;
    fn assign_radiation(&mut self, region: &str) -> Result<()>;

    // -- analysis --
    fn create_setup(&mut self, name: &str, props: &[(&str, String)]) -> Result<()>;
    /// Run the active setups. Blocks for the full solve. `cores`/`tasks` are
    /// backend-internal parallelism, not a concurrency model of this layer.
    fn analyze(&mut self, cores: u32, tasks: u32, auto_settings: bool) -> Result<()>;

    // -- parametrics --
    fn add_parametric_sweep(&mut self, sweep: &ParametricSweep) -> Result<()>;
    fn add_parametric_from_file(&mut self, file: &Path, name: &str, save_fields: bool)
        -> Result<()>;

    // -- post-processing --
    /// Retrieve sweep data for the query and export it as comma-delimited
    /// CSV, one row per sweep point.
    fn export_sweep_csv(&mut self, query: &SweepQuery, path: &Path) -> Result<()>;
    /// Evaluate a field-calculator expression to a scalar.
    fn evaluate_field_expression(&mut self, expr: &FieldExpression) -> Result<f64>;
}
