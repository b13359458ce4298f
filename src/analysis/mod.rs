//! Analysis sequencer.
//!
//! Orders setup creation, project save, solve/stop, and parametric sweeps,
//! enforcing the per-mode preconditions: a region must exist before any
//! setup, setup names are unique, and a sweep requires a prior setup and a
//! declared variable. Progression per session:
//!
//! ```text
//! NoRegion -> RegionAssigned -> SetupCreated -> [Solved | WaitingForSweep | Stopped]
//!                                            -> SweepCreated -> [SweepSolved | Stopped]
//! ```
//!
//! The solver is expensive and stateful, so two escape hatches exist:
//! `build_only` validates and persists the model without paying for a solve
//! (the backend is released and the caller terminates), and clearing
//! `sole_solve` defers the solve until a sweep is configured, avoiding a
//! redundant single-point solve that the sweep would replace.

pub mod eddy;
pub mod sweep;
pub mod transient;

use crate::backend::Backend;
use crate::error::{CoilforgeError, Result};
use crate::session::Session;

/// Save/solve behavior shared by every setup operation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Save the project before deciding whether to solve.
    pub pre_save: bool,
    /// Stop after building: save (if requested), release the backend, and
    /// return `Outcome::Stopped`. The caller is expected to terminate.
    pub build_only: bool,
    /// Save the project again after a solve.
    pub save_after: bool,
    /// Solve immediately even when extra variables are declared (a sweep
    /// would otherwise re-solve every point).
    pub sole_solve: bool,
    /// Backend-internal solver parallelism; pass-through configuration.
    pub cores: u32,
    pub tasks: u32,
    pub auto_settings: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pre_save: true,
            build_only: false,
            save_after: false,
            sole_solve: true,
            cores: 4,
            tasks: 1,
            auto_settings: true,
        }
    }
}

/// Terminal state of a setup or sweep operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The backend solved the analysis synchronously.
    Solved,
    /// Extra variables are declared and `sole_solve` is off; the analysis
    /// waits for a parametric sweep.
    WaitingForSweep,
    /// Build-only: model persisted, backend released. Terminal for the run.
    Stopped,
}

/// Sequences analysis setups and sweeps for one session.
pub struct Analysis<'s, B: Backend> {
    session: &'s mut Session<B>,
    setup_names: Vec<String>,
}

impl<'s, B: Backend> Analysis<'s, B> {
    pub fn new(session: &'s mut Session<B>) -> Self {
        Self { session, setup_names: Vec::new() }
    }

    /// Names of the setups created so far, in creation order.
    pub fn setup_names(&self) -> &[String] {
        &self.setup_names
    }

    pub(crate) fn session(&mut self) -> &mut Session<B> {
        self.session
    }

    fn check_region(&self) -> Result<()> {
        if !self.session.region_assigned() {
            return Err(CoilforgeError::Precondition(
                "no region assigned; call assign_region before creating a setup".to_string(),
            ));
        }
        Ok(())
    }

    fn check_setup_name(&self, name: &str) -> Result<()> {
        if self.setup_names.iter().any(|n| n == name) {
            return Err(CoilforgeError::DuplicateName(format!(
                "setup '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    /// Shared preconditions for both setup kinds.
    pub(crate) fn check_setup_preconditions(&self, name: &str) -> Result<()> {
        self.check_region()?;
        self.check_setup_name(name)
    }

    pub(crate) fn record_setup(&mut self, name: &str) {
        self.setup_names.push(name.to_string());
    }

    /// Save/stop/solve tail after a setup was created. When
    /// `defer_allowed`, the solve is skipped if extra variables exist and
    /// `sole_solve` is off (a sweep is expected to follow).
    pub(crate) fn run_tail(&mut self, options: &RunOptions, defer_allowed: bool) -> Result<Outcome> {
        if options.pre_save {
            self.session.backend_mut().save_project()?;
        }
        if options.build_only {
            self.session.backend_mut().release()?;
            tracing::info!("model successfully built, stopping before solve");
            return Ok(Outcome::Stopped);
        }

        let extra_vars = self.session.variables().extra_count();
        let outcome = if defer_allowed && extra_vars > 0 && !options.sole_solve {
            tracing::info!(
                extra_vars,
                "extra variables declared, waiting for sweep setup"
            );
            Outcome::WaitingForSweep
        } else {
            let _span = tracing::info_span!("analyze", cores = options.cores).entered();
            self.session
                .backend_mut()
                .analyze(options.cores, options.tasks, options.auto_settings)?;
            Outcome::Solved
        };

        if options.save_after {
            self.session.backend_mut().save_project()?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::journal::JournalBackend;
    use crate::model::{RegionSpec, SolverMode};
    use crate::session::SessionConfig;

    fn session(mode: SolverMode) -> Session<JournalBackend> {
        let config = SessionConfig { solver_mode: mode, ..Default::default() };
        Session::new(config, JournalBackend::new()).unwrap()
    }

    #[test]
    fn test_setup_before_region_fails() {
        let mut sess = session(SolverMode::EddyCurrent);
        let mut analysis = Analysis::new(&mut sess);
        let err = analysis
            .eddy_current_setup(&eddy::EddyCurrentSetup::default(), &RunOptions::default())
            .unwrap_err();
        assert!(matches!(err, CoilforgeError::Precondition(_)));
    }

    #[test]
    fn test_setup_after_region_succeeds() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.assign_region(&RegionSpec::default()).unwrap();
        let mut analysis = Analysis::new(&mut sess);
        let outcome = analysis
            .eddy_current_setup(&eddy::EddyCurrentSetup::default(), &RunOptions::default())
            .unwrap();
        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(analysis.setup_names(), ["MySetup".to_string()]);
    }

    #[test]
    fn test_duplicate_setup_name_rejected() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.assign_region(&RegionSpec::default()).unwrap();
        let mut analysis = Analysis::new(&mut sess);
        analysis
            .eddy_current_setup(&eddy::EddyCurrentSetup::default(), &RunOptions::default())
            .unwrap();
        let err = analysis
            .eddy_current_setup(&eddy::EddyCurrentSetup::default(), &RunOptions::default())
            .unwrap_err();
        assert!(matches!(err, CoilforgeError::DuplicateName(_)));
    }

    #[test]
    fn test_build_only_releases_backend() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.assign_region(&RegionSpec::default()).unwrap();
        let mut analysis = Analysis::new(&mut sess);
        let outcome = analysis
            .eddy_current_setup(
                &eddy::EddyCurrentSetup::default(),
                &RunOptions { build_only: true, ..Default::default() },
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Stopped);
        assert!(sess.backend().is_released());
        // No solve happened.
        assert_eq!(sess.backend().counters.solves, 0);
    }

    #[test]
    fn test_solve_deferred_when_extra_variables_and_not_sole() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.add_variable("h", 0.0, "mm").unwrap();
        sess.assign_region(&RegionSpec::default()).unwrap();
        let mut analysis = Analysis::new(&mut sess);
        let outcome = analysis
            .eddy_current_setup(
                &eddy::EddyCurrentSetup::default(),
                &RunOptions { sole_solve: false, ..Default::default() },
            )
            .unwrap();
        assert_eq!(outcome, Outcome::WaitingForSweep);
        assert_eq!(sess.backend().counters.solves, 0);
    }

    #[test]
    fn test_sole_solve_overrides_deferral() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.add_variable("h", 0.0, "mm").unwrap();
        sess.assign_region(&RegionSpec::default()).unwrap();
        let mut analysis = Analysis::new(&mut sess);
        let outcome = analysis
            .eddy_current_setup(&eddy::EddyCurrentSetup::default(), &RunOptions::default())
            .unwrap();
        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(sess.backend().counters.solves, 1);
    }
}
