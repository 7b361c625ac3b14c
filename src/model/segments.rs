/// Customer segment derived from the frequency/monetary score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Hibernating,
    AtRisk,
    CantLose,
    AboutToSleep,
    NeedAttention,
    LoyalCustomers,
    Promising,
    NewCustomers,
    PotentialLoyalists,
    Champions,
}

impl Segment {
    /// Resolves a score pair to its segment.
    ///
    /// Total over `{1..5} x {1..5}`; arm order mirrors the priority of the
    /// legacy rule table, so overlapping rules introduced later keep their
    /// first-match behavior. Returns `None` only for scores outside 1..=5.
    pub fn from_scores(frequency_score: u8, monetary_score: u8) -> Option<Segment> {
        let segment = match (frequency_score, monetary_score) {
            (1..=2, 1..=2) => Segment::Hibernating,
            (1..=2, 3..=4) => Segment::AtRisk,
            (1..=2, 5) => Segment::CantLose,
            (3, 1..=2) => Segment::AboutToSleep,
            (3, 3) => Segment::NeedAttention,
            (3..=4, 4..=5) => Segment::LoyalCustomers,
            (4, 1) => Segment::Promising,
            (5, 1) => Segment::NewCustomers,
            (4..=5, 2..=3) => Segment::PotentialLoyalists,
            (5, 4..=5) => Segment::Champions,
            _ => return None,
        };
        Some(segment)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Segment::Hibernating => "hibernating",
            Segment::AtRisk => "at_risk",
            Segment::CantLose => "cant_lose",
            Segment::AboutToSleep => "about_to_sleep",
            Segment::NeedAttention => "need_attention",
            Segment::LoyalCustomers => "loyal_customers",
            Segment::Promising => "promising",
            Segment::NewCustomers => "new_customers",
            Segment::PotentialLoyalists => "potential_loyalists",
            Segment::Champions => "champions",
        }
    }
}

/// Stable ordering for reports.
pub fn segment_order() -> &'static [Segment] {
    &[
        Segment::Hibernating,
        Segment::AtRisk,
        Segment::CantLose,
        Segment::AboutToSleep,
        Segment::NeedAttention,
        Segment::LoyalCustomers,
        Segment::Promising,
        Segment::NewCustomers,
        Segment::PotentialLoyalists,
        Segment::Champions,
    ]
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/segments.rs"]
mod tests;
