use crate::model::bins::BinProfile;
use crate::model::records::{CustomerRfm, ScoredCustomer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    /// First bin scores 1, last bin scores 5 (higher value is better).
    Ascending,
    /// First bin scores 5, last bin scores 1 (lower value is better).
    Descending,
}

/// Adds the three ordinal scores and the composite key. No rows are
/// dropped or added.
///
/// Recency and monetary are binned on their raw values. Frequency is first
/// converted to a rank with first-occurrence tie-breaking, then the rank is
/// binned; the rank edges are applied verbatim regardless of dataset size.
/// The composite key concatenates the frequency digit and the monetary
/// digit; recency is scored but intentionally absent from the key.
pub fn run_stage2(rows: Vec<CustomerRfm>, bins: &BinProfile) -> Vec<ScoredCustomer> {
    let ranks = first_rank(&rows);

    rows.into_iter()
        .zip(ranks)
        .map(|(rfm, rank)| {
            let recency_score = bin_score(rfm.recency as f64, &bins.recency, ScoreOrder::Descending);
            let frequency_score = bin_score(rank, &bins.frequency, ScoreOrder::Ascending);
            let monetary_score = bin_score(rfm.monetary, &bins.monetary, ScoreOrder::Ascending);
            let rfm_score = match (frequency_score, monetary_score) {
                (Some(f), Some(m)) => Some(format!("{f}{m}")),
                _ => None,
            };
            ScoredCustomer {
                rfm,
                recency_score,
                frequency_score,
                monetary_score,
                rfm_score,
            }
        })
        .collect()
}

/// Maps a value to its 1..=5 score, or `None` when it falls outside the
/// edges. Interior bins are `(lo, hi]`; the first bin also includes its
/// left edge.
pub fn bin_score(value: f64, edges: &[f64; 6], order: ScoreOrder) -> Option<u8> {
    if !value.is_finite() || value < edges[0] || value > edges[5] {
        return None;
    }
    let mut bin = 4usize;
    for i in 1..6 {
        if value <= edges[i] {
            bin = i - 1;
            break;
        }
    }
    Some(match order {
        ScoreOrder::Ascending => (bin + 1) as u8,
        ScoreOrder::Descending => (5 - bin) as u8,
    })
}

/// 1-based ranks by ascending frequency with first-occurrence tie-breaking:
/// equal counts keep their aggregate-table order, so ranks form a strict
/// total order.
fn first_rank(rows: &[CustomerRfm]) -> Vec<f64> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    indices.sort_by_key(|&i| rows[i].frequency);

    let mut ranks = vec![0.0; rows.len()];
    for (position, &i) in indices.iter().enumerate() {
        ranks[i] = (position + 1) as f64;
    }
    ranks
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
