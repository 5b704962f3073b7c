//! Conversion reporting for degraded or lossy conversions.

use serde::Serialize;

/// Outcome of one fixpoint-iterated repair pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    /// Stable pass name, e.g. "table-start"
    pub name: &'static str,
    /// Iterations spent before the text stabilized (or the cap was hit)
    pub iterations: usize,
    /// False when the pass was stopped by the iteration cap
    pub converged: bool,
}

/// Record of everything a conversion degraded on or measured.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Glyphs that matched the index but had no usable asset
    pub unresolved_glyphs: Vec<String>,
    /// Per-pass repair outcomes, in pass order (empty when repair was off)
    pub repair_passes: Vec<PassReport>,
    /// Maximum header-row cell count detected across tables
    pub column_count: usize,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved_glyphs.is_empty() && self.repair_passes.iter().all(|p| p.converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let report = ConversionReport::default();
        assert!(report.is_clean());
    }

    #[test]
    fn test_capped_pass_is_not_clean() {
        let report = ConversionReport {
            repair_passes: vec![PassReport {
                name: "table-start",
                iterations: 10,
                converged: false,
            }],
            ..Default::default()
        };
        assert!(!report.is_clean());
    }

    #[test]
    fn test_report_serializes() {
        let report = ConversionReport {
            unresolved_glyphs: vec!["\u{2b50}".to_string()],
            column_count: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&report).expect("report serializes");
        assert!(json.contains("unresolved_glyphs"));
        assert!(json.contains("column_count"));
    }
}
