//! Parametric scripting layer for coil-based electromagnetic FEM studies.
//!
//! Builds coil and specimen geometry, binds excitations and mesh controls,
//! sequences eddy-current or transient analyses with parametric sweeps, and
//! extracts post-processed results to CSV. The finite-element solve itself
//! lives behind the [`backend::Backend`] trait; [`backend::journal::JournalBackend`]
//! records the operation stream for dry runs and tests.

pub mod analysis;
pub mod backend;
pub mod circuit;
pub mod cleanup;
pub mod error;
pub mod excitation;
pub mod geometry;
pub mod model;
pub mod registry;
pub mod results;
pub mod session;
pub mod stats;
