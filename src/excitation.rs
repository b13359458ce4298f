//! Excitation binder.
//!
//! Binds a voltage/current winding to a coil's cross-section objects. The
//! two protocols are mutually exclusive by solver mode: transient mode takes
//! a time-domain waveform expression, eddy-current mode takes amplitude and
//! phase (literal or symbolic). This is the only place the winding naming
//! convention (`<coil>_for_winding`) is established; the result extractor
//! relies on it.

use crate::backend::{Backend, WindingSpec};
use crate::error::{CoilforgeError, Result};
use crate::model::{EddyCurrentExcitation, SolverMode, TransientExcitation};
use crate::session::Session;

/// Winding name derived from a coil name.
pub fn winding_name(coil: &str) -> String {
    format!("{}_for_winding", coil)
}

/// Coil-current-path name derived from a coil name.
pub fn coil_path_name(coil: &str) -> String {
    format!("{}_for_coil", coil)
}

fn first_section<B: Backend>(session: &Session<B>, coil: &str) -> Result<String> {
    session
        .registry()
        .sections(coil)
        .and_then(|s| s.first())
        .cloned()
        .ok_or_else(|| {
            CoilforgeError::NotFound(format!(
                "coil '{}' has no cross-section objects; create the coil first",
                coil
            ))
        })
}

/// Bind a waveform excitation (transient mode only).
///
/// The waveform expression is suffixed with the excitation kind's unit, e.g.
/// `10*sin(2*pi*1e6*Time+0)` becomes `10*sin(2*pi*1e6*Time+0)V`. Returns the
/// winding name.
pub fn assign_transient<B: Backend>(
    session: &mut Session<B>,
    excitation: &TransientExcitation,
) -> Result<String> {
    if session.mode() != SolverMode::Transient {
        return Err(CoilforgeError::ModeMismatch(format!(
            "waveform excitation requires Transient mode, session is {}",
            session.mode()
        )));
    }
    let section = first_section(session, &excitation.coil)?;
    let winding = winding_name(&excitation.coil);
    let coil_path = coil_path_name(&excitation.coil);
    tracing::info!(coil = %excitation.coil, winding = %winding, "assigning transient excitation");

    session
        .backend_mut()
        .assign_coil(&[&section], excitation.conductor_count, &coil_path)?;
    session.backend_mut().assign_winding(&WindingSpec {
        name: winding.clone(),
        kind: excitation.kind,
        solid: excitation.solid,
        resistance: excitation.resistance,
        excitation: format!("{}{}", excitation.waveform, excitation.kind.unit()),
        phase: None,
    })?;
    session.backend_mut().add_winding_coils(&winding, &coil_path)?;
    session.registry_mut().record_winding(&excitation.coil, &winding);
    Ok(winding)
}

/// Bind an amplitude/phase excitation (eddy-current mode only).
///
/// Amplitude and phase may be literals (rendered `"<value> V|A"` /
/// `"<value> deg"`) or references to declared project variables (rendered
/// `"$<name>"`). Returns the winding name.
pub fn assign_eddy_current<B: Backend>(
    session: &mut Session<B>,
    excitation: &EddyCurrentExcitation,
) -> Result<String> {
    if session.mode() != SolverMode::EddyCurrent {
        return Err(CoilforgeError::ModeMismatch(format!(
            "amplitude/phase excitation requires EddyCurrent mode, session is {}",
            session.mode()
        )));
    }
    let section = first_section(session, &excitation.coil)?;
    // Resolve both quantities before touching the backend.
    let amplitude = excitation
        .amplitude
        .render(excitation.kind.unit(), session.variables())?;
    let phase = excitation.phase.render("deg", session.variables())?;
    let winding = winding_name(&excitation.coil);
    let coil_path = coil_path_name(&excitation.coil);
    tracing::info!(coil = %excitation.coil, winding = %winding, "assigning eddy-current excitation");

    session
        .backend_mut()
        .assign_coil(&[&section], excitation.conductor_count, &coil_path)?;
    session.backend_mut().assign_winding(&WindingSpec {
        name: winding.clone(),
        kind: excitation.kind,
        solid: excitation.solid,
        resistance: excitation.resistance,
        excitation: amplitude,
        phase: Some(phase),
    })?;
    session.backend_mut().add_winding_coils(&winding, &coil_path)?;
    session.registry_mut().record_winding(&excitation.coil, &winding);
    Ok(winding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::journal::JournalBackend;
    use crate::model::{ExcitationKind, Quantity, SpiralCoil};
    use crate::session::SessionConfig;

    fn session_with_coil(mode: SolverMode) -> Session<JournalBackend> {
        let config = SessionConfig { solver_mode: mode, ..Default::default() };
        let mut sess = Session::new(config, JournalBackend::new()).unwrap();
        sess.create_spiral_coil(&SpiralCoil { name: "e00".to_string(), ..Default::default() })
            .unwrap();
        sess
    }

    #[test]
    fn test_eddy_excitation_in_transient_mode_fails() {
        let mut sess = session_with_coil(SolverMode::Transient);
        let err = assign_eddy_current(
            &mut sess,
            &EddyCurrentExcitation { coil: "e00".to_string(), ..Default::default() },
        )
        .unwrap_err();
        assert!(matches!(err, CoilforgeError::ModeMismatch(_)));
    }

    #[test]
    fn test_transient_excitation_in_eddy_mode_fails() {
        let mut sess = session_with_coil(SolverMode::EddyCurrent);
        let err = assign_transient(
            &mut sess,
            &TransientExcitation { coil: "e00".to_string(), ..Default::default() },
        )
        .unwrap_err();
        assert!(matches!(err, CoilforgeError::ModeMismatch(_)));
    }

    #[test]
    fn test_unknown_coil_fails_before_backend_calls() {
        let mut sess = session_with_coil(SolverMode::EddyCurrent);
        let ops_before = sess.backend().journal().len();
        let err = assign_eddy_current(
            &mut sess,
            &EddyCurrentExcitation { coil: "ghost".to_string(), ..Default::default() },
        )
        .unwrap_err();
        assert!(matches!(err, CoilforgeError::NotFound(_)));
        assert_eq!(sess.backend().journal().len(), ops_before);
    }

    #[test]
    fn test_eddy_excitation_records_winding() {
        let mut sess = session_with_coil(SolverMode::EddyCurrent);
        let winding = assign_eddy_current(
            &mut sess,
            &EddyCurrentExcitation {
                coil: "e00".to_string(),
                kind: ExcitationKind::Voltage,
                amplitude: Quantity::Literal(4.0),
                resistance: 0.001,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(winding, "e00_for_winding");
        assert_eq!(sess.registry().winding("e00"), Some("e00_for_winding"));
        assert!(sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.contains("assign_winding e00_for_winding") && op.contains("4 V")));
    }

    #[test]
    fn test_symbolic_amplitude_requires_declared_variable() {
        let mut sess = session_with_coil(SolverMode::EddyCurrent);
        let request = EddyCurrentExcitation {
            coil: "e00".to_string(),
            amplitude: Quantity::Var("amp".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            assign_eddy_current(&mut sess, &request).unwrap_err(),
            CoilforgeError::NotFound(_)
        ));
        sess.add_variable("amp", 4.0, "V").unwrap();
        let winding = assign_eddy_current(&mut sess, &request).unwrap();
        assert_eq!(winding, "e00_for_winding");
        assert!(sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.contains("excitation=$amp")));
    }

    #[test]
    fn test_transient_waveform_gets_unit_suffix() {
        let mut sess = session_with_coil(SolverMode::Transient);
        assign_transient(
            &mut sess,
            &TransientExcitation {
                coil: "e00".to_string(),
                kind: ExcitationKind::Current,
                waveform: "2*sin(2*pi*1e6*Time)".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(sess
            .backend()
            .journal()
            .iter()
            .any(|op| op.contains("2*sin(2*pi*1e6*Time)A")));
    }
}
