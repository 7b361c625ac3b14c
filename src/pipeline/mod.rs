use thiserror::Error;

use crate::input::LineItem;
use crate::model::bins::BinProfile;
use crate::model::records::LabeledCustomer;

pub mod stage1_aggregate;
pub mod stage2_score;
pub mod stage3_segment;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no segment rule for composite key {key:?} (customer {customer_id})")]
    UnmappedSegment { key: String, customer_id: String },
}

/// Runs the three stages in strict sequence over one batch.
///
/// Pure function of the input table and the bin profile: no retries, no
/// partial commits, and an empty input flows through to an empty output.
pub fn run_pipeline(
    items: &[LineItem],
    bins: &BinProfile,
) -> Result<Vec<LabeledCustomer>, PipelineError> {
    let aggregates = stage1_aggregate::run_stage1(items);
    tracing::info!(
        "aggregated {} line-items into {} customers",
        items.len(),
        aggregates.len()
    );

    let scored = stage2_score::run_stage2(aggregates, bins);
    let unscored = scored.iter().filter(|row| row.rfm_score.is_none()).count();
    if unscored > 0 {
        tracing::warn!("{unscored} customers have metrics outside the bin edges");
    }

    stage3_segment::run_stage3(scored)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/pipeline.rs"]
mod tests;
