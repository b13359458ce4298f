//! Transient (time-domain) setup.

use super::{Analysis, Outcome, RunOptions};
use crate::backend::Backend;
use crate::error::{CoilforgeError, Result};
use crate::model::SolverMode;

/// Transient analysis setup. All times are microseconds.
#[derive(Debug, Clone)]
pub struct TransientSetup {
    pub name: String,
    /// Total simulated time. Must exceed `time_step`.
    pub stop_time: f64,
    /// Interval between adjacent steps. Must be positive.
    pub time_step: f64,
    /// Save fields every N steps within the window.
    pub n_steps: u32,
    /// Field-save window start (inclusive). Non-negative, below `save_to`.
    pub save_from: f64,
    /// Field-save window end (exclusive).
    pub save_to: f64,
}

impl Default for TransientSetup {
    fn default() -> Self {
        Self {
            name: "MySetup".to_string(),
            stop_time: 1.0,
            time_step: 0.1,
            n_steps: 1,
            save_from: 0.0,
            save_to: 1.0,
        }
    }
}

impl TransientSetup {
    fn validate(&self) -> Result<()> {
        if self.time_step <= 0.0 {
            return Err(CoilforgeError::Precondition(
                "time step must be greater than 0".to_string(),
            ));
        }
        if self.stop_time <= self.time_step {
            return Err(CoilforgeError::Precondition(format!(
                "stop time ({} us) must be greater than the time step ({} us)",
                self.stop_time, self.time_step
            )));
        }
        if self.n_steps == 0 {
            return Err(CoilforgeError::Precondition(
                "n_steps must be greater than 0".to_string(),
            ));
        }
        if self.save_from < 0.0 {
            return Err(CoilforgeError::Precondition(
                "field-save window must start at or after 0".to_string(),
            ));
        }
        if self.save_from >= self.save_to {
            return Err(CoilforgeError::Precondition(format!(
                "field-save window start ({} us) must be below its end ({} us)",
                self.save_from, self.save_to
            )));
        }
        Ok(())
    }
}

impl<B: Backend> Analysis<'_, B> {
    /// Create a transient setup and run the save/stop/solve tail.
    pub fn transient_setup(
        &mut self,
        setup: &TransientSetup,
        options: &RunOptions,
    ) -> Result<Outcome> {
        self.check_setup_preconditions(&setup.name)?;
        let mode = self.session().mode();
        if mode != SolverMode::Transient {
            return Err(CoilforgeError::ModeMismatch(format!(
                "transient setup requires Transient mode, session is {}",
                mode
            )));
        }
        setup.validate()?;

        tracing::info!(setup = %setup.name, stop_time = setup.stop_time, "creating transient setup");
        let props: Vec<(&str, String)> = vec![
            ("StopTime", format!("{} us", setup.stop_time)),
            ("TimeStep", format!("{} us", setup.time_step)),
            ("SaveFieldsType", "Every N Steps".to_string()),
            ("N Steps", setup.n_steps.to_string()),
            ("Steps From", format!("{} us", setup.save_from)),
            ("Steps To", format!("{} us", setup.save_to)),
        ];
        self.session().backend_mut().create_setup(&setup.name, &props)?;
        self.record_setup(&setup.name);
        self.run_tail(options, true)
    }
}
