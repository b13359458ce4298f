//! Result extraction.
//!
//! Maps coil names to the winding naming convention established by the
//! excitation binder and builds the expression strings the backend's
//! post-processor understands. The contract here is "correct expression
//! strings and sweep context"; the numerical extraction and CSV
//! serialization stay in the backend.

use std::path::PathBuf;

use crate::backend::{Backend, FieldExpression, SweepQuery};
use crate::error::{CoilforgeError, Result};
use crate::excitation::winding_name;
use crate::model::SolverMode;
use crate::registry::ObjectKind;
use crate::session::Session;

/// Export the induced-voltage magnitude of each coil's winding over the
/// primary sweep to `<save_name>.csv` under the project path. Returns the
/// written path.
///
/// EddyCurrent mode sweeps over frequency. Transient mode sweeps over time
/// and enumerates every declared variable as context, so a parametric run
/// yields all variation rows.
pub fn induced_voltage<B: Backend>(
    session: &mut Session<B>,
    coils: &[&str],
    save_name: &str,
) -> Result<PathBuf> {
    if coils.is_empty() {
        return Err(CoilforgeError::InvalidParameter(
            "at least one coil is required".to_string(),
        ));
    }
    for coil in coils {
        if !session.registry().exists(ObjectKind::Coil, coil) {
            return Err(CoilforgeError::NotFound(format!(
                "coil '{}' was never created",
                coil
            )));
        }
    }

    let expressions: Vec<String> = coils
        .iter()
        .map(|coil| format!("mag(InducedVoltage({}))", winding_name(coil)))
        .collect();

    let query = match session.mode() {
        SolverMode::EddyCurrent => SweepQuery {
            expressions,
            primary_sweep: "Freq".to_string(),
            context: "InducedVoltage".to_string(),
            variations: Vec::new(),
        },
        SolverMode::Transient => SweepQuery {
            expressions,
            primary_sweep: "Time".to_string(),
            context: "InducedVoltage".to_string(),
            variations: session
                .variables()
                .names()
                .map(|name| (format!("${}", name), "all".to_string()))
                .collect(),
        },
    };

    let path = session
        .config()
        .project_path
        .join(format!("{}.csv", save_name));
    tracing::info!(path = %path.display(), coils = coils.len(), "exporting induced voltage");
    session.backend_mut().export_sweep_csv(&query, &path)?;
    Ok(path)
}

/// Mean magnetic flux density magnitude over each object's volume, via the
/// backend's field calculator. Objects must be registered specimens or
/// coils. Returns `(object, value)` pairs in the order requested.
pub fn mean_b_field<B: Backend>(
    session: &mut Session<B>,
    objects: &[&str],
) -> Result<Vec<(String, f64)>> {
    for object in objects {
        let known = session.registry().exists(ObjectKind::Specimen, object)
            || session.registry().exists(ObjectKind::Coil, object);
        if !known {
            return Err(CoilforgeError::NotFound(format!(
                "object '{}' is not a registered specimen or coil",
                object
            )));
        }
    }

    let mut values = Vec::with_capacity(objects.len());
    for object in objects {
        let expr = FieldExpression {
            name: format!("mean_b_{}", object),
            assignment: object.to_string(),
            operations: vec![
                "NameOfExpression('<Bx,By,Bz>')".to_string(),
                "Operation('Mag')".to_string(),
                format!("EnterVolume({})", object),
                "Operation('VolumeValue')".to_string(),
                "Operation('Mean')".to_string(),
            ],
        };
        let value = session.backend_mut().evaluate_field_expression(&expr)?;
        values.push((object.to_string(), value));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::journal::JournalBackend;
    use crate::model::{Specimen, SpiralCoil};
    use crate::session::SessionConfig;

    fn session(mode: SolverMode) -> Session<JournalBackend> {
        let config = SessionConfig {
            project_path: std::env::temp_dir(),
            solver_mode: mode,
            ..Default::default()
        };
        let mut sess = Session::new(config, JournalBackend::new()).unwrap();
        sess.create_spiral_coil(&SpiralCoil { name: "e00".to_string(), ..Default::default() })
            .unwrap();
        sess
    }

    #[test]
    fn test_unknown_coil_fails_before_export() {
        let mut sess = session(SolverMode::EddyCurrent);
        let ops_before = sess.backend().journal().len();
        let err = induced_voltage(&mut sess, &["e00", "ghost"], "out").unwrap_err();
        assert!(matches!(err, CoilforgeError::NotFound(_)));
        assert_eq!(sess.backend().journal().len(), ops_before);
    }

    #[test]
    fn test_eddy_mode_sweeps_frequency() {
        let mut sess = session(SolverMode::EddyCurrent);
        let path = induced_voltage(&mut sess, &["e00"], "voltage_eddy").unwrap();
        assert!(path.ends_with("voltage_eddy.csv"));
        let journal = sess.backend().journal();
        assert!(journal.iter().any(|op| {
            op.contains("primary=Freq") && op.contains("mag(InducedVoltage(e00_for_winding))")
        }));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_transient_mode_enumerates_variables() {
        let mut sess = session(SolverMode::Transient);
        sess.add_variable("h", 0.5, "mm").unwrap();
        let path = induced_voltage(&mut sess, &["e00"], "voltage_tr").unwrap();
        let journal = sess.backend().journal();
        assert!(journal.iter().any(|op| {
            op.contains("primary=Time")
                && op.contains("$h=all")
                && op.contains("$x=all")
                && op.contains("$z=all")
        }));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_mean_b_field_requires_known_object() {
        let mut sess = session(SolverMode::EddyCurrent);
        let err = mean_b_field(&mut sess, &["ghost"]).unwrap_err();
        assert!(matches!(err, CoilforgeError::NotFound(_)));
    }

    #[test]
    fn test_mean_b_field_builds_volume_expression() {
        let mut sess = session(SolverMode::EddyCurrent);
        sess.create_specimen(&Specimen { name: "plate".to_string(), ..Default::default() })
            .unwrap();
        let values = mean_b_field(&mut sess, &["plate", "e00"]).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].0, "plate");
        assert!(sess.backend().journal().iter().any(|op| {
            op.contains("mean_b_plate") && op.contains("EnterVolume(plate)")
        }));
    }
}
