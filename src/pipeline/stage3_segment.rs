use crate::model::records::{LabeledCustomer, ScoredCustomer};
use crate::model::segments::Segment;
use crate::pipeline::PipelineError;

/// Resolves each composite key to its segment.
///
/// Rows with an undefined key pass through unlabeled; a defined key that
/// resolves to no segment is a coverage bug and fails the whole batch.
pub fn run_stage3(rows: Vec<ScoredCustomer>) -> Result<Vec<LabeledCustomer>, PipelineError> {
    rows.into_iter()
        .map(|scored| {
            let segment = match (scored.frequency_score, scored.monetary_score) {
                (Some(f), Some(m)) => Some(Segment::from_scores(f, m).ok_or_else(|| {
                    PipelineError::UnmappedSegment {
                        key: format!("{f}{m}"),
                        customer_id: scored.rfm.customer_id.clone(),
                    }
                })?),
                _ => None,
            };
            Ok(LabeledCustomer { scored, segment })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_segment.rs"]
mod tests;
