//! Journaling backend.
//!
//! Records every backend call as one operation line instead of driving the
//! licensed application. Used as the test double and as the CLI's dry-run
//! backend: a build can be validated and inspected without a solver license
//! or solve cost. Section and separate operations synthesize object names
//! following the application's `<object>_Section1` convention.

use std::collections::BTreeSet;
use std::path::Path;

use crate::backend::{Backend, FieldExpression, ParametricSweep, SweepQuery, WindingSpec};
use crate::error::{CoilforgeError, Result};
use crate::geometry::Point3;
use crate::model::{LitzWire, Plane};

/// Backend-call counters, read out after a run for `--stats`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpCounters {
    pub geometry: u32,
    pub excitation: u32,
    pub mesh: u32,
    pub analysis: u32,
    pub solves: u32,
    pub post: u32,
}

#[derive(Debug)]
pub struct JournalBackend {
    journal: Vec<String>,
    /// Material library of the simulated application.
    materials: BTreeSet<String>,
    pub counters: OpCounters,
    released: bool,
}

impl JournalBackend {
    pub fn new() -> Self {
        let materials = ["Air", "Aluminum", "Copper", "Iron", "Vacuum"]
            .iter()
            .map(|m| m.to_lowercase())
            .collect();
        Self {
            journal: Vec::new(),
            materials,
            counters: OpCounters::default(),
            released: false,
        }
    }

    /// Extend the simulated material library.
    pub fn add_library_material(&mut self, name: &str) {
        self.materials.insert(name.to_lowercase());
    }

    /// The recorded operation stream.
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn record(&mut self, op: String) -> Result<()> {
        if self.released {
            return Err(CoilforgeError::Backend(
                "connection already released".to_string(),
            ));
        }
        tracing::debug!(op = %op, "backend");
        self.journal.push(op);
        Ok(())
    }
}

impl Default for JournalBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn fmt_point(p: Point3) -> String {
    format!("({}, {}, {})", p[0], p[1], p[2])
}

impl Backend for JournalBackend {
    fn set_model_units(&mut self, units: &str) -> Result<()> {
        self.record(format!("set_model_units {}", units))
    }

    fn set_variable(&mut self, name: &str, value: &str) -> Result<()> {
        self.record(format!("set_variable ${} = {}", name, value))
    }

    fn save_project(&mut self) -> Result<()> {
        self.record("save_project".to_string())
    }

    fn release(&mut self) -> Result<()> {
        self.record("release".to_string())?;
        self.released = true;
        Ok(())
    }

    fn create_coordinate_system(&mut self, name: &str, origin: Point3) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!("create_cs {} origin={}", name, fmt_point(origin)))
    }

    fn set_working_coordinate_system(&mut self, name: &str) -> Result<()> {
        self.record(format!("set_working_cs {}", name))
    }

    fn create_polyline(&mut self, name: &str, points: &[Point3]) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!("create_polyline {} points={}", name, points.len()))
    }

    fn create_rectangle(
        &mut self,
        name: &str,
        plane: Plane,
        origin: Point3,
        sizes: [f64; 2],
    ) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!(
            "create_rectangle {} plane={} origin={} sizes=({}, {})",
            name,
            plane.as_str(),
            fmt_point(origin),
            sizes[0],
            sizes[1]
        ))
    }

    fn create_circle(
        &mut self,
        name: &str,
        plane: Plane,
        origin: Point3,
        radius: f64,
    ) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!(
            "create_circle {} plane={} origin={} radius={}",
            name,
            plane.as_str(),
            fmt_point(origin),
            radius
        ))
    }

    fn create_cylinder(
        &mut self,
        name: &str,
        origin: Point3,
        radius: f64,
        height: f64,
        material: &str,
    ) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!(
            "create_cylinder {} origin={} radius={} height={} material={}",
            name,
            fmt_point(origin),
            radius,
            height,
            material
        ))
    }

    fn create_box(
        &mut self,
        name: &str,
        origin: Point3,
        sizes: [f64; 3],
        material: Option<&str>,
    ) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!(
            "create_box {} origin={} sizes=({}, {}, {}) material={}",
            name,
            fmt_point(origin),
            sizes[0],
            sizes[1],
            sizes[2],
            material.unwrap_or("-")
        ))
    }

    fn sweep_along_path(&mut self, profile: &str, path: &str) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!("sweep_along_path {} along {}", profile, path))
    }

    fn unite(&mut self, objects: &[&str]) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!("unite {}", objects.join(" + ")))
    }

    fn subtract(&mut self, target: &str, tool: &str, keep_originals: bool) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!(
            "subtract {} - {} keep={}",
            target, tool, keep_originals
        ))
    }

    fn section(&mut self, object: &str, plane: Plane) -> Result<Vec<String>> {
        self.counters.geometry += 1;
        let section = format!("{}_Section1", object);
        self.record(format!(
            "section {} plane={} -> {}",
            object,
            plane.as_str(),
            section
        ))?;
        Ok(vec![section])
    }

    fn separate_bodies(&mut self, object: &str) -> Result<Vec<String>> {
        self.counters.geometry += 1;
        let separated = format!("{}_Separate1", object);
        self.record(format!("separate_bodies {} -> {}", object, separated))?;
        Ok(vec![separated])
    }

    fn delete(&mut self, object: &str) -> Result<()> {
        self.record(format!("delete {}", object))
    }

    fn move_object(&mut self, object: &str, translation: [&str; 3]) -> Result<()> {
        self.counters.geometry += 1;
        self.record(format!(
            "move {} by [{}, {}, {}]",
            object, translation[0], translation[1], translation[2]
        ))
    }

    fn assign_material(&mut self, object: &str, material: &str) -> Result<()> {
        self.record(format!("assign_material {} = {}", object, material))
    }

    fn material_exists(&mut self, material: &str) -> Result<bool> {
        Ok(self.materials.contains(&material.to_lowercase()))
    }

    fn define_litz_material(
        &mut self,
        base: &str,
        name: &str,
        wire: &LitzWire,
        strand_count: u32,
    ) -> Result<()> {
        let wire_desc = match wire {
            LitzWire::Rectangular { wire_width, wire_height } => {
                format!("rect {}mm x {}mm", wire_width, wire_height)
            }
            LitzWire::Round { wire_diameter } => format!("round d={}mm", wire_diameter),
        };
        self.materials.insert(name.to_lowercase());
        self.record(format!(
            "define_litz_material {} from {} strands={} wire={}",
            name, base, strand_count, wire_desc
        ))
    }

    fn assign_coil(&mut self, objects: &[&str], conductor_count: u32, name: &str) -> Result<()> {
        self.counters.excitation += 1;
        self.record(format!(
            "assign_coil {} objects=[{}] conductors={}",
            name,
            objects.join(", "),
            conductor_count
        ))
    }

    fn assign_winding(&mut self, winding: &WindingSpec) -> Result<()> {
        self.counters.excitation += 1;
        self.record(format!(
            "assign_winding {} kind={} solid={} resistance={} excitation={} phase={}",
            winding.name,
            winding.kind.as_str(),
            winding.solid,
            winding.resistance,
            winding.excitation,
            winding.phase.as_deref().unwrap_or("-")
        ))
    }

    fn add_winding_coils(&mut self, winding: &str, coil: &str) -> Result<()> {
        self.counters.excitation += 1;
        self.record(format!("add_winding_coils {} <- {}", winding, coil))
    }

    fn assign_length_mesh(
        &mut self,
        objects: &[&str],
        inside: bool,
        max_length: &str,
    ) -> Result<()> {
        self.counters.mesh += 1;
        self.record(format!(
            "assign_length_mesh [{}] inside={} max_length={}",
            objects.join(", "),
            inside,
            max_length
        ))
    }

    fn assign_skin_depth_mesh(
        &mut self,
        objects: &[&str],
        skin_depth: &str,
        layers: u32,
        max_length: &str,
    ) -> Result<()> {
        self.counters.mesh += 1;
        self.record(format!(
            "assign_skin_depth_mesh [{}] skin_depth={} layers={} max_length={}",
            objects.join(", "),
            skin_depth,
            layers,
            max_length
        ))
    }

    fn enable_eddy_effects(&mut self, objects: &[&str]) -> Result<()> {
        self.counters.mesh += 1;
        self.record(format!("enable_eddy_effects [{}]", objects.join(", ")))
    }

    fn create_air_region(&mut self, faces: [f64; 6], percent: bool) -> Result<String> {
        self.counters.geometry += 1;
        let unit = if percent { "%" } else { "mm" };
        self.record(format!(
            "create_air_region [{}]{}",
            faces.map(|f| f.to_string()).join(", "),
            unit
        ))?;
        Ok("Region".to_string())
    }

    fn assign_radiation(&mut self, region: &str) -> Result<()> {
        self.record(format!("assign_radiation {}", region))
    }

    fn create_setup(&mut self, name: &str, props: &[(&str, String)]) -> Result<()> {
        self.counters.analysis += 1;
        let props_str: Vec<String> = props.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        self.record(format!("create_setup {} {}", name, props_str.join(" ")))
    }

    fn analyze(&mut self, cores: u32, tasks: u32, auto_settings: bool) -> Result<()> {
        self.counters.solves += 1;
        self.record(format!(
            "analyze cores={} tasks={} auto={}",
            cores, tasks, auto_settings
        ))
    }

    fn add_parametric_sweep(&mut self, sweep: &ParametricSweep) -> Result<()> {
        self.counters.analysis += 1;
        self.record(format!(
            "add_parametric_sweep {} var={} {}..{} step={} type={} solution={} save_fields={}",
            sweep.name,
            sweep.variable,
            sweep.start,
            sweep.end,
            sweep.step,
            sweep.step_type.as_str(),
            sweep.solution,
            sweep.save_fields
        ))
    }

    fn add_parametric_from_file(
        &mut self,
        file: &Path,
        name: &str,
        save_fields: bool,
    ) -> Result<()> {
        self.counters.analysis += 1;
        self.record(format!(
            "add_parametric_from_file {} file={} save_fields={}",
            name,
            file.display(),
            save_fields
        ))
    }

    fn export_sweep_csv(&mut self, query: &SweepQuery, path: &Path) -> Result<()> {
        self.counters.post += 1;
        self.record(format!(
            "export_sweep_csv primary={} context={} expressions=[{}] variations=[{}] -> {}",
            query.primary_sweep,
            query.context,
            query.expressions.join("; "),
            query
                .variations
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
            path.display()
        ))?;
        // Dry run: emit the header row so downstream tooling sees the schema.
        let mut header = vec![query.primary_sweep.clone()];
        header.extend(query.expressions.iter().cloned());
        std::fs::write(path, format!("{}\n", header.join(",")))?;
        Ok(())
    }

    fn evaluate_field_expression(&mut self, expr: &FieldExpression) -> Result<f64> {
        self.counters.post += 1;
        self.record(format!(
            "evaluate_field_expression {} on {} ops=[{}]",
            expr.name,
            expr.assignment,
            expr.operations.join("; ")
        ))?;
        Ok(0.0)
    }
}
