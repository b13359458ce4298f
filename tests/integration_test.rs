//! End-to-end eddy-current workflow against the journaling backend.

use coilforge::analysis::sweep::SweepSetup;
use coilforge::analysis::{eddy, Analysis, Outcome, RunOptions};
use coilforge::backend::journal::JournalBackend;
use coilforge::error::CoilforgeError;
use coilforge::excitation;
use coilforge::model::{
    Crack, EddyCurrentExcitation, HelmholtzCoil, Quantity, RegionPadding, RegionSpec, SolverMode,
    SpiralCoil, Specimen, SweepStepType,
};
use coilforge::results;
use coilforge::session::{MeshSize, Session, SessionConfig};

/// Helper: eddy-current session writing exports to the temp dir.
fn eddy_session() -> Session<JournalBackend> {
    let config = SessionConfig {
        project_path: std::env::temp_dir(),
        solver_mode: SolverMode::EddyCurrent,
        non_graphical: true,
        ..Default::default()
    };
    Session::new(config, JournalBackend::new()).expect("session init failed")
}

/// Helper: demo probe scene with excitation coil, receiver coil, cracked plate.
fn build_probe_scene(session: &mut Session<JournalBackend>) {
    session.add_variable("h", 0.0, "mm").expect("variable failed");

    session
        .create_spiral_coil(&SpiralCoil {
            name: "e00".to_string(),
            num_turns: 16,
            wire_width: 0.125,
            wire_height: 0.035,
            spacing: 0.25,
            inner_radius: 2.15,
            center: [16.5, 16.5, 1.0],
            ..Default::default()
        })
        .expect("spiral coil failed");
    excitation::assign_eddy_current(
        session,
        &EddyCurrentExcitation {
            coil: "e00".to_string(),
            conductor_count: 1,
            amplitude: Quantity::Literal(4.0),
            resistance: 0.001,
            ..Default::default()
        },
    )
    .expect("excitation failed");

    session
        .create_helmholtz_coil(&HelmholtzCoil {
            name: "r00".to_string(),
            inner_diameter: 2.5,
            outer_diameter: 3.5,
            height: 0.25,
            center: [0.0, 0.0, 2.0],
            ..Default::default()
        })
        .expect("helmholtz coil failed");
    excitation::assign_eddy_current(
        session,
        &EddyCurrentExcitation {
            coil: "r00".to_string(),
            conductor_count: 100,
            amplitude: Quantity::Literal(0.0),
            resistance: 5e6,
            ..Default::default()
        },
    )
    .expect("receiver excitation failed");

    session
        .create_specimen(&Specimen {
            name: "plate".to_string(),
            material: "Aluminum".to_string(),
            length: 33.0,
            width: 33.0,
            height: 10.0,
        })
        .expect("specimen failed");
    session
        .add_crack(&Crack {
            specimen: "plate".to_string(),
            length: 0.5,
            width: 0.5,
            height: 0.5,
            center: [0.0, 0.0, 0.0],
        })
        .expect("crack failed");

    session
        .assign_length_mesh(&["e00", "r00"], false, &MeshSize::PerObject(vec![0.1, 0.5]))
        .expect("mesh failed");
    session
        .assign_region(&RegionSpec {
            padding: RegionPadding::Uniform(10.0),
            percent: false,
        })
        .expect("region failed");
}

#[test]
fn test_full_eddy_current_workflow() {
    let mut session = eddy_session();
    build_probe_scene(&mut session);

    let mut analysis = Analysis::new(&mut session);
    let options = RunOptions { sole_solve: false, ..Default::default() };

    // The extra variable defers the solve until the sweep is configured.
    let outcome = analysis
        .eddy_current_setup(&eddy::EddyCurrentSetup::default(), &options)
        .expect("setup failed");
    assert_eq!(outcome, Outcome::WaitingForSweep);

    let outcome = analysis
        .parametric_sweep(
            &SweepSetup::range("h", 0.0, 10.0, 1.0, SweepStepType::LinearStep),
            &options,
        )
        .expect("sweep failed");
    assert_eq!(outcome, Outcome::Solved);

    let path = results::induced_voltage(&mut session, &["r00"], "it_induced_voltage")
        .expect("result export failed");
    let content = std::fs::read_to_string(&path).expect("csv missing");
    assert!(content.contains("mag(InducedVoltage(r00_for_winding))"));
    std::fs::remove_file(path).unwrap();

    let backend = session.into_backend();
    assert_eq!(backend.counters.solves, 1);
    let journal = backend.journal();

    // Build order: geometry before excitation before mesh before sweep.
    let pos = |needle: &str| {
        journal
            .iter()
            .position(|op| op.contains(needle))
            .unwrap_or_else(|| panic!("missing op: {}", needle))
    };
    assert!(pos("create_polyline e00_coil_path") < pos("assign_winding e00_for_winding"));
    assert!(pos("assign_winding r00_for_winding") < pos("assign_length_mesh"));
    assert!(pos("create_air_region") < pos("create_setup MySetup"));
    assert!(pos("create_setup MySetup") < pos("add_parametric_sweep"));
    assert!(pos("move plate by [$x, $y, $z]") < pos("analyze"));
}

#[test]
fn test_build_only_stops_before_solve() {
    let mut session = eddy_session();
    build_probe_scene(&mut session);

    let mut analysis = Analysis::new(&mut session);
    let outcome = analysis
        .eddy_current_setup(
            &eddy::EddyCurrentSetup::default(),
            &RunOptions { build_only: true, ..Default::default() },
        )
        .expect("setup failed");
    assert_eq!(outcome, Outcome::Stopped);

    let backend = session.into_backend();
    assert!(backend.is_released());
    assert_eq!(backend.counters.solves, 0);
    // The model was persisted before the stop.
    assert!(backend.journal().iter().any(|op| op == "save_project"));
}

#[test]
fn test_receiver_winding_drives_result_expression() {
    let mut session = eddy_session();
    build_probe_scene(&mut session);
    assert_eq!(session.registry().winding("r00"), Some("r00_for_winding"));

    let err = results::induced_voltage(&mut session, &["r01"], "unused").unwrap_err();
    assert!(matches!(err, CoilforgeError::NotFound(_)));
}

#[test]
fn test_radiation_boundary_attached_in_eddy_mode() {
    let mut session = eddy_session();
    build_probe_scene(&mut session);
    assert!(session
        .backend()
        .journal()
        .iter()
        .any(|op| op.starts_with("assign_radiation")));
}
