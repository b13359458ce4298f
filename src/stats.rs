//! Performance statistics collection for `--stats` output.

use std::time::{Duration, Instant};

use crate::backend::journal::OpCounters;

/// Collects phase timings and backend-call counters.
///
/// Created when `--stats` is passed, threaded as `Option<&mut Stats>`.
/// Zero cost when `None` — no timing calls, no counter reads.
pub struct Stats {
    total_start: Instant,
    phases: Vec<(&'static str, Duration)>,
    /// Backend-call counters, read from the backend at end of run.
    pub counters: OpCounters,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            total_start: Instant::now(),
            phases: Vec::new(),
            counters: OpCounters::default(),
        }
    }

    /// Record a completed phase with its duration.
    pub fn add_phase(&mut self, name: &'static str, duration: Duration) {
        self.phases.push((name, duration));
    }

    /// Print the stats table to stderr.
    pub fn display(&self) {
        let total = self.total_start.elapsed();
        eprintln!();
        eprintln!("=== Coilforge Performance Stats ===");

        for (name, dur) in &self.phases {
            eprintln!("  {:<24} {:>8.3}s", name, dur.as_secs_f64());
        }

        eprintln!("  Backend calls:");
        eprintln!("    Geometry:             {}", self.counters.geometry);
        eprintln!("    Excitation:           {}", self.counters.excitation);
        eprintln!("    Mesh:                 {}", self.counters.mesh);
        eprintln!("    Analysis:             {}", self.counters.analysis);
        eprintln!("    Solves:               {}", self.counters.solves);
        eprintln!("    Post-processing:      {}", self.counters.post);

        eprintln!("  ─────────────────────────────────");
        eprintln!("  Total:                  {:>8.3}s", total.as_secs_f64());
    }
}
