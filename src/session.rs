//! Simulation session: scene state and geometry construction.
//!
//! A `Session` owns one backend connection plus the object registry,
//! variable table, and region flag the workflow sequencer gates on. Sessions
//! are explicit handles passed to `Analysis` and the result extractor; there
//! is no process-wide instance list. Every operation validates its
//! parameters completely before the first backend call, so a failed
//! operation leaves both the session state and the backend untouched.

use std::path::PathBuf;

use crate::backend::Backend;
use crate::error::{CoilforgeError, Result};
use crate::geometry;
use crate::model::{
    BoxSolid, Crack, Cylinder, HelmholtzCoil, LitzCoil, Plane, RectangleCoil, RegionSpec,
    SolverMode, SpiralCoil, Specimen, VariableTable,
};
use crate::registry::{ObjectKind, ObjectRegistry};

/// Coil names use `_` as the separator for derived objects
/// (`<coil>_coil_path`, `<coil>_for_winding`, section names), so user names
/// must not contain it.
const RESERVED_SEPARATOR: char = '_';

/// Inset of the rectangular wire profile along the first spiral segment so
/// the sweep seed sits inside the path.
const PROFILE_INSET: f64 = 0.5;

/// Project/design identity for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub project_path: PathBuf,
    pub project_name: String,
    pub design_name: String,
    pub solver_mode: SolverMode,
    /// Suppress the application GUI.
    pub non_graphical: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            project_name: "MyProject".to_string(),
            design_name: "MyDesign".to_string(),
            solver_mode: SolverMode::Transient,
            non_graphical: false,
        }
    }
}

/// Mesh size selection for `assign_length_mesh`.
#[derive(Debug, Clone)]
pub enum MeshSize {
    /// One maximum length for every object.
    Uniform(f64),
    /// One entry per object, same order.
    PerObject(Vec<f64>),
}

/// One backend connection plus the scene state built through it.
pub struct Session<B: Backend> {
    config: SessionConfig,
    backend: B,
    registry: ObjectRegistry,
    variables: VariableTable,
    region: Option<String>,
}

impl<B: Backend> Session<B> {
    /// Open a session: sets model units to millimetres and declares the
    /// three axis placeholder variables on the backend.
    pub fn new(config: SessionConfig, mut backend: B) -> Result<Self> {
        tracing::info!(
            project = %config.project_name,
            design = %config.design_name,
            mode = %config.solver_mode,
            "initializing session"
        );
        backend.set_model_units("mm")?;
        let variables = VariableTable::new();
        for name in variables.names() {
            backend.set_variable(name, "0 mm")?;
        }
        Ok(Self {
            config,
            backend,
            registry: ObjectRegistry::new(),
            variables,
            region: None,
        })
    }

    pub fn mode(&self) -> SolverMode {
        self.config.solver_mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn region_assigned(&self) -> bool {
        self.region.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    /// Recover the backend, e.g. to inspect a journal after a run.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Declare a project variable. Names are unique for the life of the
    /// session; redefinition requires a new name.
    pub fn add_variable(&mut self, name: &str, value: f64, unit: &str) -> Result<()> {
        if self.variables.contains(name) {
            return Err(CoilforgeError::DuplicateName(format!(
                "variable '{}' already declared",
                name
            )));
        }
        self.backend
            .set_variable(name, &format!("{}{}", value, unit))?;
        self.variables.declare(name, value, unit)
    }

    fn check_coil_name(&self, name: &str) -> Result<()> {
        if name.contains(RESERVED_SEPARATOR) {
            return Err(CoilforgeError::InvalidParameter(format!(
                "coil name '{}' must not contain '{}'",
                name, RESERVED_SEPARATOR
            )));
        }
        if self.registry.exists(ObjectKind::Coil, name) {
            return Err(CoilforgeError::DuplicateName(format!(
                "coil '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn mm(v: f64) -> String {
        format!("{} mm", v)
    }

    /// Section the coil solid, split the cut into bodies, delete the
    /// leftovers, and record the remaining section objects for excitation.
    fn derive_sections(&mut self, coil: &str, plane: Plane) -> Result<Vec<String>> {
        let sections = self.backend.section(coil, plane)?;
        if sections.is_empty() {
            return Err(CoilforgeError::Backend(format!(
                "sectioning coil '{}' produced no objects",
                coil
            )));
        }
        for section in &sections {
            let separated = self.backend.separate_bodies(section)?;
            for leftover in &separated {
                self.backend.delete(leftover)?;
            }
        }
        self.registry.record_sections(coil, sections.clone());
        Ok(sections)
    }

    /// Create an outward square-spiral coil by sweeping a rectangular wire
    /// profile along the generated path, closing the loop with a vertical
    /// return sweep. Returns the cross-section objects used for excitation.
    pub fn create_rectangle_coil(&mut self, coil: &RectangleCoil) -> Result<Vec<String>> {
        self.check_coil_name(&coil.name)?;
        let path = geometry::rectangle_spiral(
            coil.num_turns,
            coil.step_size,
            coil.wire_width,
            coil.wire_height,
            coil.initial_x_length,
            coil.initial_y_length,
        )?;
        self.registry.register(ObjectKind::Coil, &coil.name)?;
        tracing::info!(coil = %coil.name, turns = coil.num_turns, "creating rectangle coil");

        let name = coil.name.as_str();
        let path_name = format!("{}_coil_path", name);
        let start = path[0];
        let end = *path.last().unwrap_or(&start);

        self.backend.set_working_coordinate_system("Global")?;
        self.backend.create_polyline(&path_name, &path)?;
        self.backend.create_rectangle(
            name,
            Plane::Yz,
            [
                start[0] + PROFILE_INSET,
                start[1] - coil.wire_width / 2.0,
                start[2] - coil.wire_height / 2.0,
            ],
            [coil.wire_width, coil.wire_height],
        )?;
        self.backend.sweep_along_path(name, &path_name)?;

        let loop_path = geometry::return_loop(start, end, coil.wire_height);
        let loop_path_name = format!("{}_loop_path", name);
        let loop_name = format!("{}_loop", name);
        self.backend.create_polyline(&loop_path_name, &loop_path)?;
        self.backend.create_rectangle(
            &loop_name,
            Plane::Xy,
            [
                start[0] - coil.wire_height / 2.0,
                start[1] - coil.wire_width / 2.0,
                -coil.wire_height / 2.0,
            ],
            [coil.wire_height, coil.wire_width],
        )?;
        self.backend.sweep_along_path(&loop_name, &loop_path_name)?;
        self.backend.unite(&[name, &loop_name])?;
        self.backend.assign_material(name, &coil.material)?;

        let [cx, cy, cz] = coil.center;
        self.backend.move_object(
            name,
            [&Self::mm(cx), &Self::mm(cy), &Self::mm(cz)],
        )?;

        let cs_name = format!("{}_for_section", name);
        self.backend
            .create_coordinate_system(&cs_name, [cx, cy, cz + 0.5 * coil.wire_height])?;
        self.backend.set_working_coordinate_system(&cs_name)?;
        self.derive_sections(name, Plane::Xy)
    }

    /// Create an Archimedean spiral coil. Returns the cross-section objects
    /// used for excitation.
    pub fn create_spiral_coil(&mut self, coil: &SpiralCoil) -> Result<Vec<String>> {
        self.check_coil_name(&coil.name)?;
        let path = geometry::log_spiral(
            coil.num_turns,
            coil.spacing,
            coil.wire_width,
            coil.inner_radius,
        )?;
        self.registry.register(ObjectKind::Coil, &coil.name)?;
        tracing::info!(coil = %coil.name, turns = coil.num_turns, "creating spiral coil");

        let name = coil.name.as_str();
        let path_name = format!("{}_coil_path", name);
        let start = path[0];
        let end = *path.last().unwrap_or(&start);

        self.backend.set_working_coordinate_system("Global")?;
        self.backend.create_polyline(&path_name, &path)?;
        self.backend.create_rectangle(
            name,
            Plane::Xz,
            [
                start[0] - coil.wire_width / 2.0,
                0.0,
                start[2] - coil.wire_height / 2.0,
            ],
            [coil.wire_height, coil.wire_width],
        )?;
        self.backend.sweep_along_path(name, &path_name)?;

        let loop_path = geometry::return_loop(start, end, coil.wire_height);
        let loop_path_name = format!("{}_loop_path", name);
        let loop_name = format!("{}_loop", name);
        self.backend.create_polyline(&loop_path_name, &loop_path)?;
        self.backend.create_circle(
            &loop_name,
            Plane::Xy,
            [start[0], start[1], -coil.wire_height / 2.0],
            coil.wire_width.min(coil.wire_height),
        )?;
        self.backend.sweep_along_path(&loop_name, &loop_path_name)?;
        self.backend.unite(&[name, &loop_name])?;
        self.backend.assign_material(name, &coil.material)?;

        let [cx, cy, cz] = coil.center;
        self.backend.move_object(
            name,
            [&Self::mm(cx), &Self::mm(cy), &Self::mm(cz)],
        )?;

        let cs_name = format!("{}_for_section", name);
        self.backend
            .create_coordinate_system(&cs_name, [cx, cy, cz + coil.wire_height])?;
        self.backend.set_working_coordinate_system(&cs_name)?;
        self.derive_sections(name, Plane::Xy)
    }

    fn check_annulus(inner_diameter: f64, outer_diameter: f64, height: f64) -> Result<()> {
        if inner_diameter <= 0.0 || height <= 0.0 {
            return Err(CoilforgeError::InvalidParameter(
                "annulus diameters and height must be positive".to_string(),
            ));
        }
        if outer_diameter <= inner_diameter {
            return Err(CoilforgeError::InvalidParameter(format!(
                "outer diameter ({}) must exceed inner diameter ({})",
                outer_diameter, inner_diameter
            )));
        }
        Ok(())
    }

    /// Create a Helmholtz-style annular coil (outer cylinder minus inner).
    /// Returns the cross-section objects used for excitation.
    pub fn create_helmholtz_coil(&mut self, coil: &HelmholtzCoil) -> Result<Vec<String>> {
        self.check_coil_name(&coil.name)?;
        Self::check_annulus(coil.inner_diameter, coil.outer_diameter, coil.height)?;
        self.registry.register(ObjectKind::Coil, &coil.name)?;
        tracing::info!(coil = %coil.name, "creating helmholtz coil");

        let name = coil.name.as_str();
        let inner_name = format!("{}_inner", name);
        self.backend.set_working_coordinate_system("Global")?;
        self.backend.create_cylinder(
            &inner_name,
            coil.center,
            coil.inner_diameter / 2.0,
            coil.height,
            "Air",
        )?;
        self.backend.create_cylinder(
            name,
            coil.center,
            coil.outer_diameter / 2.0,
            coil.height,
            &coil.material,
        )?;
        self.backend.subtract(name, &inner_name, false)?;

        let cs_name = format!("{}_for_section", name);
        self.backend.create_coordinate_system(&cs_name, coil.center)?;
        self.backend.set_working_coordinate_system(&cs_name)?;
        self.derive_sections(name, Plane::Xz)
    }

    /// Create an annular coil carrying a litz-wire material duplicated from
    /// a library material. Returns the cross-section objects.
    pub fn create_litz_coil(&mut self, coil: &LitzCoil) -> Result<Vec<String>> {
        self.check_coil_name(&coil.name)?;
        Self::check_annulus(coil.inner_diameter, coil.outer_diameter, coil.height)?;
        if !self.backend.material_exists(&coil.material)? {
            return Err(CoilforgeError::NotFound(format!(
                "material '{}' is not in the backend library",
                coil.material
            )));
        }
        self.registry.register(ObjectKind::Coil, &coil.name)?;
        tracing::info!(coil = %coil.name, strands = coil.strand_count, "creating litz coil");

        let name = coil.name.as_str();
        let litz_material = format!("{}_{}", coil.material, name);
        self.backend.set_working_coordinate_system("Global")?;
        let cs_name = format!("{}_for_section", name);
        self.backend.create_coordinate_system(&cs_name, coil.center)?;
        self.backend.set_working_coordinate_system(&cs_name)?;
        self.backend.define_litz_material(
            &coil.material,
            &litz_material,
            &coil.wire,
            coil.strand_count,
        )?;

        let inner_name = format!("{}_inner", name);
        self.backend.create_cylinder(
            &inner_name,
            [0.0, 0.0, 0.0],
            coil.inner_diameter / 2.0,
            coil.height,
            "Air",
        )?;
        self.backend.create_cylinder(
            name,
            [0.0, 0.0, 0.0],
            coil.outer_diameter / 2.0,
            coil.height,
            "Air",
        )?;
        self.backend.subtract(name, &inner_name, false)?;
        self.backend.assign_material(name, &litz_material)?;
        self.derive_sections(name, Plane::Xz)
    }

    /// Create a hollow cylinder (tube) primitive.
    pub fn create_cylinder(&mut self, cylinder: &Cylinder) -> Result<()> {
        Self::check_annulus(cylinder.inner_diameter, cylinder.outer_diameter, cylinder.height)?;
        self.registry.register(ObjectKind::Cylinder, &cylinder.name)?;
        let inner_name = format!("{}_inner", cylinder.name);
        self.backend.set_working_coordinate_system("Global")?;
        self.backend.create_cylinder(
            &cylinder.name,
            cylinder.center,
            cylinder.outer_diameter / 2.0,
            cylinder.height,
            &cylinder.material,
        )?;
        self.backend.create_cylinder(
            &inner_name,
            cylinder.center,
            cylinder.inner_diameter / 2.0,
            cylinder.height,
            "Air",
        )?;
        self.backend.subtract(&cylinder.name, &inner_name, false)
    }

    /// Create a box primitive centered on X/Y with its base at the center Z.
    pub fn create_box(&mut self, solid: &BoxSolid) -> Result<()> {
        self.registry.register(ObjectKind::Box, &solid.name)?;
        let [cx, cy, cz] = solid.center;
        self.backend.set_working_coordinate_system("Global")?;
        self.backend.create_box(
            &solid.name,
            [cx - solid.x_length / 2.0, cy - solid.y_length / 2.0, cz],
            [solid.x_length, solid.y_length, solid.z_length],
            Some(&solid.material),
        )
    }

    /// Create a rectangular specimen with the center of its upper face at
    /// the global origin.
    pub fn create_specimen(&mut self, specimen: &Specimen) -> Result<()> {
        self.registry.register(ObjectKind::Specimen, &specimen.name)?;
        tracing::info!(specimen = %specimen.name, "creating specimen");
        self.backend.set_working_coordinate_system("Global")?;
        self.backend.create_box(
            &specimen.name,
            [
                -specimen.length / 2.0,
                -specimen.width / 2.0,
                -specimen.height,
            ],
            [specimen.length, specimen.width, specimen.height],
            None,
        )?;
        self.backend.assign_material(&specimen.name, &specimen.material)
    }

    /// Subtract a numbered rectangular crack from an existing specimen,
    /// positioned by the center of the crack's upper face. Returns the
    /// crack name (`<specimen>_crack_<n>`).
    pub fn add_crack(&mut self, crack: &Crack) -> Result<String> {
        let crack_name = self.registry.next_crack_name(&crack.specimen)?;
        tracing::info!(specimen = %crack.specimen, crack = %crack_name, "adding crack");
        let [cx, cy, cz] = crack.center;
        self.backend.create_box(
            &crack_name,
            [
                cx - crack.length / 2.0,
                cy - crack.width / 2.0,
                cz - crack.height,
            ],
            [crack.length, crack.width, crack.height],
            None,
        )?;
        self.backend.subtract(&crack.specimen, &crack_name, false)?;
        Ok(crack_name)
    }

    fn check_meshable(&self, object: &str) -> Result<()> {
        if !self.registry.exists(ObjectKind::Coil, object)
            && !self.registry.exists(ObjectKind::Specimen, object)
        {
            return Err(CoilforgeError::NotFound(format!(
                "object '{}' is not a registered coil or specimen",
                object
            )));
        }
        Ok(())
    }

    /// Assign a length-based mesh control to coils/specimens and enable
    /// eddy effects on them. With `MeshSize::PerObject`, the sizes list
    /// pairs with `objects` one to one.
    pub fn assign_length_mesh(
        &mut self,
        objects: &[&str],
        inside: bool,
        size: &MeshSize,
    ) -> Result<()> {
        for object in objects {
            self.check_meshable(object)?;
        }
        match size {
            MeshSize::Uniform(length) => {
                self.backend
                    .assign_length_mesh(objects, inside, &Self::mm(*length))?;
            }
            MeshSize::PerObject(lengths) => {
                if lengths.len() != objects.len() {
                    return Err(CoilforgeError::InvalidParameter(format!(
                        "{} objects but {} mesh sizes",
                        objects.len(),
                        lengths.len()
                    )));
                }
                for (object, length) in objects.iter().zip(lengths) {
                    self.backend
                        .assign_length_mesh(&[object], inside, &Self::mm(*length))?;
                }
            }
        }
        self.backend.enable_eddy_effects(objects)
    }

    /// Assign a skin-depth-based mesh control and enable eddy effects.
    pub fn assign_skin_depth_mesh(
        &mut self,
        objects: &[&str],
        skin_depth: f64,
        layers: u32,
        max_length: f64,
    ) -> Result<()> {
        for object in objects {
            self.check_meshable(object)?;
        }
        if skin_depth <= 0.0 || layers == 0 {
            return Err(CoilforgeError::InvalidParameter(
                "skin depth and layer count must be positive".to_string(),
            ));
        }
        self.backend.assign_skin_depth_mesh(
            objects,
            &Self::mm(skin_depth),
            layers,
            &Self::mm(max_length),
        )?;
        self.backend.enable_eddy_effects(objects)
    }

    /// Create the surrounding air region. Reassignment overwrites the prior
    /// region (the backend replaces it); eddy-current mode attaches a
    /// radiation boundary, transient mode keeps the natural boundary.
    pub fn assign_region(&mut self, region: &RegionSpec) -> Result<()> {
        let faces = region.faces()?;
        if self.region.is_some() {
            tracing::warn!("region already assigned; overwriting");
        }
        let name = self.backend.create_air_region(faces, region.percent)?;
        if self.mode() == SolverMode::EddyCurrent {
            self.backend.assign_radiation(&name)?;
        }
        self.region = Some(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::journal::JournalBackend;
    use crate::model::RegionPadding;

    fn session(mode: SolverMode) -> Session<JournalBackend> {
        let config = SessionConfig { solver_mode: mode, ..Default::default() };
        Session::new(config, JournalBackend::new()).unwrap()
    }

    #[test]
    fn test_session_init_declares_axis_variables() {
        let sess = session(SolverMode::Transient);
        let journal = sess.backend().journal();
        assert!(journal.iter().any(|op| op == "set_model_units mm"));
        assert!(journal.iter().any(|op| op.starts_with("set_variable $x")));
        assert!(journal.iter().any(|op| op.starts_with("set_variable $z")));
    }

    #[test]
    fn test_coil_name_with_separator_rejected() {
        let mut sess = session(SolverMode::EddyCurrent);
        let coil = SpiralCoil { name: "bad_name".to_string(), ..Default::default() };
        let err = sess.create_spiral_coil(&coil).unwrap_err();
        assert!(matches!(err, CoilforgeError::InvalidParameter(_)));
        assert!(!sess.registry().exists(ObjectKind::Coil, "bad_name"));
    }

    #[test]
    fn test_duplicate_coil_name_rejected_across_kinds() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.create_spiral_coil(&SpiralCoil { name: "e00".to_string(), ..Default::default() })
            .unwrap();
        let rect = RectangleCoil { name: "e00".to_string(), ..Default::default() };
        let err = sess.create_rectangle_coil(&rect).unwrap_err();
        assert!(matches!(err, CoilforgeError::DuplicateName(_)));
    }

    #[test]
    fn test_spiral_coil_records_sections() {
        let mut sess = session(SolverMode::EddyCurrent);
        let coil = SpiralCoil {
            name: "e00".to_string(),
            num_turns: 10,
            spacing: 0.25,
            wire_width: 0.125,
            ..Default::default()
        };
        let sections = sess.create_spiral_coil(&coil).unwrap();
        assert!(!sections.is_empty());
        assert_eq!(sess.registry().sections("e00").unwrap(), sections.as_slice());
    }

    #[test]
    fn test_invalid_spacing_leaves_registry_untouched() {
        let mut sess = session(SolverMode::EddyCurrent);
        let coil = SpiralCoil {
            name: "e00".to_string(),
            spacing: 0.1,
            wire_width: 0.125,
            ..Default::default()
        };
        assert!(sess.create_spiral_coil(&coil).is_err());
        // Name can be reused after the failed attempt.
        let ok = SpiralCoil { name: "e00".to_string(), ..Default::default() };
        sess.create_spiral_coil(&ok).unwrap();
    }

    #[test]
    fn test_litz_coil_requires_library_material() {
        let mut sess = session(SolverMode::EddyCurrent);
        let coil = LitzCoil {
            name: "litz".to_string(),
            material: "Unobtainium".to_string(),
            ..Default::default()
        };
        let err = sess.create_litz_coil(&coil).unwrap_err();
        assert!(matches!(err, CoilforgeError::NotFound(_)));
    }

    #[test]
    fn test_crack_names_increment() {
        let mut sess = session(SolverMode::Transient);
        sess.create_specimen(&Specimen::default()).unwrap();
        let crack = Crack::default();
        assert_eq!(sess.add_crack(&crack).unwrap(), "MySpecimen_crack_1");
        assert_eq!(sess.add_crack(&crack).unwrap(), "MySpecimen_crack_2");
    }

    #[test]
    fn test_region_reassignment_is_idempotent() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.assign_region(&RegionSpec::default()).unwrap();
        // Second call overwrites rather than failing.
        sess.assign_region(&RegionSpec {
            padding: RegionPadding::Uniform(10.0),
            percent: false,
        })
        .unwrap();
        assert!(sess.region_assigned());
    }

    #[test]
    fn test_region_attaches_radiation_only_for_eddy_current() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.assign_region(&RegionSpec::default()).unwrap();
        assert!(sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.starts_with("assign_radiation")));

        let mut sess = session(SolverMode::Transient);
        sess.assign_region(&RegionSpec::default()).unwrap();
        assert!(!sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.starts_with("assign_radiation")));
    }

    #[test]
    fn test_length_mesh_pairing_validated() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.create_specimen(&Specimen::default()).unwrap();
        let err = sess
            .assign_length_mesh(
                &["MySpecimen"],
                false,
                &MeshSize::PerObject(vec![0.1, 0.2]),
            )
            .unwrap_err();
        assert!(matches!(err, CoilforgeError::InvalidParameter(_)));
    }

    #[test]
    fn test_skin_depth_mesh_enables_eddy_effects() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.create_specimen(&Specimen::default()).unwrap();
        sess.assign_skin_depth_mesh(&["MySpecimen"], 0.08, 2, 0.5).unwrap();
        let journal = sess.backend().journal();
        assert!(journal
            .iter()
            .any(|op| op.contains("skin_depth=0.08 mm") && op.contains("layers=2")));
        assert!(journal.iter().any(|op| op.starts_with("enable_eddy_effects")));

        let err = sess
            .assign_skin_depth_mesh(&["MySpecimen"], 0.0, 2, 0.5)
            .unwrap_err();
        assert!(matches!(err, CoilforgeError::InvalidParameter(_)));
    }

    #[test]
    fn test_cylinder_subtracts_inner_tube() {
        let mut sess = session(SolverMode::Transient);
        sess.create_cylinder(&Cylinder { name: "tube".to_string(), ..Default::default() })
            .unwrap();
        assert!(sess.registry().exists(ObjectKind::Cylinder, "tube"));
        assert!(sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.starts_with("subtract tube - tube_inner")));
    }

    #[test]
    fn test_box_origin_centered_in_xy() {
        let mut sess = session(SolverMode::Transient);
        sess.create_box(&BoxSolid {
            name: "shield".to_string(),
            x_length: 4.0,
            y_length: 6.0,
            z_length: 2.0,
            center: [1.0, 1.0, 0.0],
            ..Default::default()
        })
        .unwrap();
        assert!(sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.contains("create_box shield origin=(-1, -2, 0)")));
    }

    #[test]
    fn test_mesh_unknown_object_rejected() {
        let mut sess = session(SolverMode::EddyCurrent);
        let err = sess
            .assign_length_mesh(&["ghost"], false, &MeshSize::Uniform(0.1))
            .unwrap_err();
        assert!(matches!(err, CoilforgeError::NotFound(_)));
    }
}
