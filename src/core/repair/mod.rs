//! Structural repair of malformed Markdown ahead of rendering.
//!
//! Authors routinely omit the blank-line separators CommonMark renderers
//! require around tables, lists and headings. The repair engine inserts
//! exactly those separators and touches nothing else. Four passes run in a
//! fixed order, each iterated to a fixed point under a hard cap: an
//! insertion made by a pass can create a new adjacency the same pass must
//! also resolve.

mod passes;

pub use passes::{
    normalize_heading_emphasis, normalize_separator_spacing, separate_block_start,
    separate_table_from_block, separate_table_start,
};

use crate::utils::report::PassReport;

/// Hard cap on iterations per pass.
///
/// Well-formed input converges in one or two iterations; the cap is a
/// safety valve, and hitting it is reported rather than raised.
pub const MAX_PASS_ITERATIONS: usize = 10;

/// Apply one pass repeatedly until the text stops changing or the cap is
/// reached. Returns the final text and the pass outcome.
pub fn run_to_fixpoint<F>(
    name: &'static str,
    pass: F,
    input: &str,
    cap: usize,
) -> (String, PassReport)
where
    F: Fn(&str) -> String,
{
    let mut current = input.to_string();
    for iteration in 1..=cap {
        let next = pass(&current);
        if next == current {
            return (
                current,
                PassReport {
                    name,
                    iterations: iteration,
                    converged: true,
                },
            );
        }
        current = next;
    }
    log::warn!("repair pass {} stopped at the {}-iteration cap", name, cap);
    (
        current,
        PassReport {
            name,
            iterations: cap,
            converged: false,
        },
    )
}

/// Stateless, re-entrant repair engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepairEngine;

impl RepairEngine {
    pub fn new() -> Self {
        RepairEngine
    }

    /// Repair the text, discarding the per-pass outcomes.
    pub fn repair(&self, text: &str) -> String {
        self.repair_with_report(text).0
    }

    /// Repair the text and report each pass's iterations and convergence.
    ///
    /// Re-running the full sequence on repaired text is a no-op.
    pub fn repair_with_report(&self, text: &str) -> (String, Vec<PassReport>) {
        let text = normalize_heading_emphasis(text);

        let (text, table_start) = run_to_fixpoint(
            "table-start",
            separate_table_start,
            &text,
            MAX_PASS_ITERATIONS,
        );
        let (text, separator) = run_to_fixpoint(
            "separator-spacing",
            normalize_separator_spacing,
            &text,
            MAX_PASS_ITERATIONS,
        );
        let (text, table_block) = run_to_fixpoint(
            "table-to-block",
            separate_table_from_block,
            &text,
            MAX_PASS_ITERATIONS,
        );
        let (text, block_start) = run_to_fixpoint(
            "block-start",
            separate_block_start,
            &text,
            MAX_PASS_ITERATIONS,
        );

        (text, vec![table_start, separator, table_block, block_start])
    }
}
