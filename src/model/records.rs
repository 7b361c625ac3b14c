use crate::model::segments::Segment;

/// One aggregate row per distinct customer, the output of stage 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRfm {
    pub customer_id: String,
    /// Whole days between the reference date and the customer's most
    /// recent purchase. Always >= 2 because the reference date sits two
    /// days past the newest invoice in the batch.
    pub recency: i64,
    /// Count of distinct invoice numbers.
    pub frequency: u64,
    /// Sum of quantity * unit_price across the customer's rows.
    pub monetary: f64,
}

/// Aggregate row plus ordinal scores, the output of stage 2.
///
/// A score is `None` when the metric falls outside its bin edges; the
/// composite key exists only when both of its digits do.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCustomer {
    pub rfm: CustomerRfm,
    pub recency_score: Option<u8>,
    pub frequency_score: Option<u8>,
    pub monetary_score: Option<u8>,
    pub rfm_score: Option<String>,
}

/// Final labeled row, the output of stage 3.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCustomer {
    pub scored: ScoredCustomer,
    pub segment: Option<Segment>,
}
