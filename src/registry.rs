//! Object registry.
//!
//! Tracks which named geometry objects exist in the session and gates every
//! downstream operation (excitation, mesh, crack, results) on their
//! existence. Geometry created in the backend is never retracted by this
//! layer, so no deletion is exposed: names are permanent for the session.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CoilforgeError, Result};

/// Kind of registered object. Each kind has its own namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Coil,
    Cylinder,
    Box,
    Specimen,
}

impl ObjectKind {
    fn label(&self) -> &'static str {
        match self {
            ObjectKind::Coil => "coil",
            ObjectKind::Cylinder => "cylinder",
            ObjectKind::Box => "box",
            ObjectKind::Specimen => "specimen",
        }
    }
}

/// Per-session registry of named geometry.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    coils: BTreeSet<String>,
    cylinders: BTreeSet<String>,
    boxes: BTreeSet<String>,
    specimens: BTreeSet<String>,
    /// Cross-section sub-objects per coil, produced by the section cut.
    sections: BTreeMap<String, Vec<String>>,
    /// Winding name per coil, recorded by the excitation binder.
    windings: BTreeMap<String, String>,
    crack_counter: u32,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, kind: ObjectKind) -> &BTreeSet<String> {
        match kind {
            ObjectKind::Coil => &self.coils,
            ObjectKind::Cylinder => &self.cylinders,
            ObjectKind::Box => &self.boxes,
            ObjectKind::Specimen => &self.specimens,
        }
    }

    fn set_mut(&mut self, kind: ObjectKind) -> &mut BTreeSet<String> {
        match kind {
            ObjectKind::Coil => &mut self.coils,
            ObjectKind::Cylinder => &mut self.cylinders,
            ObjectKind::Box => &mut self.boxes,
            ObjectKind::Specimen => &mut self.specimens,
        }
    }

    /// Register a name. Fails with `DuplicateName` if already present in the
    /// kind's namespace.
    pub fn register(&mut self, kind: ObjectKind, name: &str) -> Result<()> {
        if self.set(kind).contains(name) {
            return Err(CoilforgeError::DuplicateName(format!(
                "{} '{}' already exists",
                kind.label(),
                name
            )));
        }
        self.set_mut(kind).insert(name.to_string());
        Ok(())
    }

    /// Pure existence lookup.
    pub fn exists(&self, kind: ObjectKind, name: &str) -> bool {
        self.set(kind).contains(name)
    }

    /// Names of all registered specimens, in insertion-independent order.
    pub fn specimens(&self) -> impl Iterator<Item = &str> {
        self.specimens.iter().map(|s| s.as_str())
    }

    /// Record the section objects derived from a coil's solid body.
    pub fn record_sections(&mut self, coil: &str, sections: Vec<String>) {
        self.sections.insert(coil.to_string(), sections);
    }

    /// Section objects of a coil, if any were recorded.
    pub fn sections(&self, coil: &str) -> Option<&[String]> {
        self.sections.get(coil).map(|v| v.as_slice())
    }

    /// Record the winding bound to a coil.
    pub fn record_winding(&mut self, coil: &str, winding: &str) {
        self.windings.insert(coil.to_string(), winding.to_string());
    }

    pub fn winding(&self, coil: &str) -> Option<&str> {
        self.windings.get(coil).map(|s| s.as_str())
    }

    /// Next crack name for a specimen: `<specimen>_crack_<n>`, n starting
    /// at 1 and incrementing across all specimens.
    pub fn next_crack_name(&mut self, specimen: &str) -> Result<String> {
        if !self.specimens.contains(specimen) {
            return Err(CoilforgeError::NotFound(format!(
                "specimen '{}' does not exist",
                specimen
            )));
        }
        self.crack_counter += 1;
        Ok(format!("{}_crack_{}", specimen, self.crack_counter))
    }
}
