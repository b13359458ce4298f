//! Eddy-current (frequency-domain) setup.

use super::{Analysis, Outcome, RunOptions};
use crate::backend::Backend;
use crate::error::{CoilforgeError, Result};
use crate::model::{Quantity, SolverMode};

/// Adaptive refinement parameters fixed by this layer; the per-setup knob
/// is the percent error target.
const PERCENT_REFINEMENT: u32 = 15;
const MAXIMUM_PASSES: u32 = 500;

/// Eddy-current analysis setup.
#[derive(Debug, Clone)]
pub struct EddyCurrentSetup {
    pub name: String,
    /// Excitation frequency: literal (MHz) or a declared variable reference.
    pub frequency: Quantity,
    /// Adaptive-pass error target, percent.
    pub percent_error: f64,
}

impl Default for EddyCurrentSetup {
    fn default() -> Self {
        Self {
            name: "MySetup".to_string(),
            frequency: Quantity::Literal(1.0),
            percent_error: 0.1,
        }
    }
}

impl<B: Backend> Analysis<'_, B> {
    /// Create an eddy-current setup and run the save/stop/solve tail.
    pub fn eddy_current_setup(
        &mut self,
        setup: &EddyCurrentSetup,
        options: &RunOptions,
    ) -> Result<Outcome> {
        self.check_setup_preconditions(&setup.name)?;
        let mode = self.session().mode();
        if mode != SolverMode::EddyCurrent {
            return Err(CoilforgeError::ModeMismatch(format!(
                "eddy-current setup requires EddyCurrent mode, session is {}",
                mode
            )));
        }
        if setup.percent_error <= 0.0 {
            return Err(CoilforgeError::Precondition(
                "percent error must be greater than 0".to_string(),
            ));
        }
        let frequency = setup.frequency.render("MHz", self.session().variables())?;

        tracing::info!(setup = %setup.name, frequency = %frequency, "creating eddy-current setup");
        let props: Vec<(&str, String)> = vec![
            ("Frequency", frequency),
            ("PercentRefinement", PERCENT_REFINEMENT.to_string()),
            ("MaximumPasses", MAXIMUM_PASSES.to_string()),
            ("PercentError", setup.percent_error.to_string()),
        ];
        self.session().backend_mut().create_setup(&setup.name, &props)?;
        self.record_setup(&setup.name);
        self.run_tail(options, true)
    }
}
