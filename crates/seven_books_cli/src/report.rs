//! Plain-text reports printed by the CLI.

use seven_books_core::{coherence_of, StateVector};
use seven_books_sim::ScenarioOutcome;
use std::fmt::Write;

pub fn final_state(state: &StateVector) -> String {
    let mut out = String::from("Final states:\n");
    for (i, v) in state[..3].iter().enumerate() {
        let _ = writeln!(out, " Facet {}: {:.4}", i + 1, v);
    }
    let _ = writeln!(out, " Dwelling: {:.4}", state[3]);
    let _ = writeln!(out, " Coherence: {:.4}", coherence_of(state));
    out
}

pub fn derivatives(d: &StateVector) -> String {
    format!(
        "dx1/dt = {:.12}\ndx2/dt = {:.12}\ndx3/dt = {:.12}\nd_dwelling/dt = {:.12}\n",
        d[0], d[1], d[2], d[3]
    )
}

pub fn comparison(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = format!(
        "{:<22} {:>10} {:>10} {:>12}\n",
        "Scenario", "Coherence", "Dwelling", "Breakthrough"
    );
    for o in outcomes {
        let breakthrough = o
            .breakthrough_time
            .map(|t| format!("t={:.2}", t))
            .unwrap_or_else(|| "never".to_string());
        let _ = writeln!(
            out,
            "{:<22} {:>10.4} {:>10.4} {:>12}",
            o.name, o.final_coherence, o.final_state[3], breakthrough
        );
    }
    out
}
