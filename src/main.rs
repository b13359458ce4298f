use clap::{Parser, ValueEnum};
use coilforge::analysis::sweep::SweepSetup;
use coilforge::analysis::{eddy, transient, Analysis, Outcome, RunOptions};
use coilforge::backend::journal::JournalBackend;
use coilforge::error::Result;
use coilforge::excitation;
use coilforge::model::{
    Crack, EddyCurrentExcitation, HelmholtzCoil, Quantity, RectangleCoil, RegionPadding,
    RegionSpec, SolverMode, SpiralCoil, Specimen, SweepStepType, TransientExcitation,
};
use coilforge::results;
use coilforge::session::{MeshSize, Session, SessionConfig};
use coilforge::stats::Stats;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    EddyCurrent,
    Transient,
}

impl From<SolverArg> for SolverMode {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::EddyCurrent => SolverMode::EddyCurrent,
            SolverArg::Transient => SolverMode::Transient,
        }
    }
}

/// Parametric coil simulation builder (dry run against a journaling backend)
#[derive(Parser)]
#[command(name = "coilforge", version)]
struct Cli {
    /// Solver mode for the demo scene
    #[arg(long, value_enum, default_value = "eddy-current")]
    solver: SolverArg,

    /// Validate and persist the model without solving
    #[arg(long)]
    build_only: bool,

    /// Write the recorded backend operation stream to this file
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Print performance stats to stderr
    #[arg(long)]
    stats: bool,

    /// Solver cores (backend-internal parallelism)
    #[arg(long, default_value_t = 4)]
    cores: u32,

    /// Solver tasks (backend-internal parallelism)
    #[arg(long, default_value_t = 1)]
    tasks: u32,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut stats = if cli.stats { Some(Stats::new()) } else { None };
    let mode = SolverMode::from(cli.solver);

    let config = SessionConfig {
        project_name: "MyProject".to_string(),
        design_name: "MyDesign".to_string(),
        solver_mode: mode,
        non_graphical: true,
        ..Default::default()
    };
    let mut session = Session::new(config, JournalBackend::new()).unwrap_or_else(|e| {
        eprintln!("Session error: {}", e);
        std::process::exit(1);
    });

    let build_start = Instant::now();
    build_scene(&mut session).unwrap_or_else(|e| {
        eprintln!("Build error: {}", e);
        std::process::exit(1);
    });
    if let Some(s) = stats.as_mut() {
        s.add_phase("Scene build", build_start.elapsed());
    }

    let options = RunOptions {
        build_only: cli.build_only,
        sole_solve: false,
        cores: cli.cores,
        tasks: cli.tasks,
        ..Default::default()
    };

    let solve_start = Instant::now();
    let outcome = run_analysis(&mut session, mode, &options).unwrap_or_else(|e| {
        eprintln!("Analysis error: {}", e);
        std::process::exit(1);
    });
    if let Some(s) = stats.as_mut() {
        s.add_phase("Analysis", solve_start.elapsed());
    }

    if outcome != Outcome::Stopped {
        let post_start = Instant::now();
        let path = results::induced_voltage(&mut session, &["r00"], "induced_voltage")
            .unwrap_or_else(|e| {
                eprintln!("Result error: {}", e);
                std::process::exit(1);
            });
        tracing::info!(path = %path.display(), "results exported");
        if let Some(s) = stats.as_mut() {
            s.add_phase("Post-processing", post_start.elapsed());
        }
    }

    if let Some(path) = &cli.journal {
        let journal = session.backend().journal().join("\n");
        std::fs::write(path, format!("{}\n", journal)).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {}", path.display(), e);
            std::process::exit(1);
        });
    }

    if let Some(s) = stats.as_mut() {
        s.counters = session.backend().counters;
        s.display();
    }
}

/// Build the demo scene: two excitation coils, a Helmholtz receiver, and a
/// cracked aluminum specimen.
fn build_scene(session: &mut Session<JournalBackend>) -> Result<()> {
    session.add_variable("h", 0.0, "mm")?;

    session.create_spiral_coil(&SpiralCoil {
        name: "e00".to_string(),
        num_turns: 16,
        wire_width: 0.125,
        wire_height: 0.035,
        spacing: 0.25,
        inner_radius: 2.15,
        center: [16.5, 16.5, 1.0],
        ..Default::default()
    })?;
    excite(session, "e00", 1, Quantity::Literal(4.0), 0.001)?;

    session.create_rectangle_coil(&RectangleCoil {
        name: "e11".to_string(),
        num_turns: 20,
        wire_width: 0.125,
        wire_height: 0.035,
        step_size: 0.75,
        initial_x_length: 2.5,
        initial_y_length: 2.5,
        center: [0.0, 0.0, 10.0],
        ..Default::default()
    })?;
    excite(session, "e11", 1, Quantity::Literal(4.0), 0.001)?;

    // Receiver: open circuit via a large inner resistance.
    session.create_helmholtz_coil(&HelmholtzCoil {
        name: "r00".to_string(),
        inner_diameter: 2.5,
        outer_diameter: 3.5,
        height: 0.25,
        center: [0.0, 0.0, 2.0],
        ..Default::default()
    })?;
    excite(session, "r00", 100, Quantity::Literal(0.0), 5e6)?;

    session.create_specimen(&Specimen {
        name: "plate".to_string(),
        material: "Aluminum".to_string(),
        length: 33.0,
        width: 33.0,
        height: 10.0,
    })?;
    session.add_crack(&Crack {
        specimen: "plate".to_string(),
        length: 0.5,
        width: 0.5,
        height: 0.5,
        center: [0.0, 0.0, 0.0],
    })?;
    session.add_crack(&Crack {
        specimen: "plate".to_string(),
        length: 0.1,
        width: 1.0,
        height: 0.5,
        center: [0.0, 0.0, -1.0],
    })?;

    session.assign_length_mesh(
        &["e00", "e11", "r00"],
        false,
        &MeshSize::PerObject(vec![0.1, 0.2, 0.5]),
    )?;

    session.assign_region(&RegionSpec {
        padding: RegionPadding::Uniform(10.0),
        percent: false,
    })?;
    Ok(())
}

/// Bind the mode-appropriate excitation to a coil.
fn excite(
    session: &mut Session<JournalBackend>,
    coil: &str,
    conductors: u32,
    amplitude: Quantity,
    resistance: f64,
) -> Result<()> {
    match session.mode() {
        SolverMode::EddyCurrent => {
            excitation::assign_eddy_current(
                session,
                &EddyCurrentExcitation {
                    coil: coil.to_string(),
                    conductor_count: conductors,
                    amplitude,
                    resistance,
                    ..Default::default()
                },
            )?;
        }
        SolverMode::Transient => {
            excitation::assign_transient(
                session,
                &TransientExcitation {
                    coil: coil.to_string(),
                    conductor_count: conductors,
                    resistance,
                    ..Default::default()
                },
            )?;
        }
    }
    Ok(())
}

/// Create the mode-appropriate setup, then sweep the specimen-lift variable.
fn run_analysis(
    session: &mut Session<JournalBackend>,
    mode: SolverMode,
    options: &RunOptions,
) -> Result<Outcome> {
    let mut analysis = Analysis::new(session);
    let outcome = match mode {
        SolverMode::EddyCurrent => analysis.eddy_current_setup(
            &eddy::EddyCurrentSetup {
                name: "MySetup".to_string(),
                frequency: Quantity::Literal(1.0),
                percent_error: 0.1,
            },
            options,
        )?,
        SolverMode::Transient => {
            analysis.transient_setup(&transient::TransientSetup::default(), options)?
        }
    };
    if outcome == Outcome::Stopped {
        return Ok(outcome);
    }

    analysis.parametric_sweep(
        &SweepSetup::range("h", 0.0, 10.0, 1.0, SweepStepType::LinearStep),
        options,
    )
}
