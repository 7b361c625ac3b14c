use crate::report::SummaryData;

pub fn render_summary_json(summary: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
