//! Heuristic content analysis: bias markers and a length-based
//! reliability score.

use attest_types::BiasAnalysis;

/// Linguistic markers that often indicate biased writing. Each marker
/// counts once no matter how often it occurs.
pub const BIAS_MARKERS: &[&str] = &[
    "always",
    "never",
    "everyone knows",
    "obviously",
    "clearly",
    "undeniably",
    "without a doubt",
];

/// Scan `text` for bias markers (case-insensitive substring match).
pub fn detect_bias(text: &str) -> BiasAnalysis {
    let lower = text.to_lowercase();
    let markers_found: Vec<String> = BIAS_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .map(|marker| marker.to_string())
        .collect();
    let marker_count = markers_found.len() as u32;
    BiasAnalysis {
        markers_found,
        marker_count,
    }
}

/// Reliability heuristic: longer, more detailed content scores higher.
pub fn reliability_score(text: &str) -> f64 {
    let length = text.len();
    if length > 5000 {
        90.0
    } else if length > 1500 {
        75.0
    } else {
        60.0
    }
}
