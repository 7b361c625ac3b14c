use serde::{Deserialize, Serialize};

/// Bin boundaries for the three RFM metrics.
///
/// Each array holds six edges cutting the value range into five bins.
/// Interior bins are left-exclusive/right-inclusive; the first bin also
/// includes its left edge. Values outside `[edges[0], edges[5]]` are
/// unscored rather than clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinProfile {
    pub recency: [f64; 6],
    pub frequency: [f64; 6],
    pub monetary: [f64; 6],
}

impl BinProfile {
    /// Legacy boundaries, calibrated on the original retail dataset
    /// (~4338 distinct customers). The frequency edges apply to ranks,
    /// not raw counts, and are never rescaled for dataset size.
    pub fn default_v1() -> Self {
        Self {
            recency: [1.0, 13.8, 33.0, 72.0, 180.0, 374.0],
            frequency: [1.0, 868.4, 1735.8, 2603.2, 3470.6, 4338.0],
            monetary: [3.75, 250.194, 490.096, 942.276, 2058.426, 280206.02],
        }
    }

    /// Every edge array must be finite and strictly ascending.
    pub fn validate(&self) -> Result<(), String> {
        for (name, edges) in [
            ("recency", &self.recency),
            ("frequency", &self.frequency),
            ("monetary", &self.monetary),
        ] {
            for pair in edges.windows(2) {
                if !pair[0].is_finite() || !pair[1].is_finite() {
                    return Err(format!("{name} edges must be finite"));
                }
                if pair[0] >= pair[1] {
                    return Err(format!(
                        "{name} edges must be strictly ascending ({} >= {})",
                        pair[0], pair[1]
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bins.rs"]
mod tests;
