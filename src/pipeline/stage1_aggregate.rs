use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};

use crate::input::LineItem;
use crate::model::records::CustomerRfm;

struct Group {
    last_purchase: NaiveDateTime,
    invoices: HashSet<String>,
    monetary: f64,
}

/// Collapses line-items into one row per customer.
///
/// The reference date is `max(invoice_date) + 2 days` over the whole batch,
/// rows without a customer id included; the offset keeps recency nonzero
/// even for the newest purchaser. Rows without a customer id are excluded
/// from grouping, and groups whose monetary total is not positive emit no
/// row. Output order is first appearance of the customer id in the input.
pub fn run_stage1(items: &[LineItem]) -> Vec<CustomerRfm> {
    let Some(max_date) = items.iter().map(|item| item.invoice_date).max() else {
        return Vec::new();
    };
    let reference = max_date + Duration::days(2);

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Group> = HashMap::new();

    for item in items {
        if item.customer_id.is_empty() {
            continue;
        }
        let group = groups
            .entry(item.customer_id.as_str())
            .or_insert_with(|| {
                order.push(item.customer_id.as_str());
                Group {
                    last_purchase: item.invoice_date,
                    invoices: HashSet::new(),
                    monetary: 0.0,
                }
            });
        if item.invoice_date > group.last_purchase {
            group.last_purchase = item.invoice_date;
        }
        group.invoices.insert(item.invoice_no.clone());
        group.monetary += item.total_price();
    }

    let mut out = Vec::with_capacity(order.len());
    let mut dropped = 0usize;
    for customer_id in order {
        let group = &groups[customer_id];
        if group.monetary <= 0.0 {
            dropped += 1;
            continue;
        }
        out.push(CustomerRfm {
            customer_id: customer_id.to_string(),
            recency: (reference - group.last_purchase).num_days(),
            frequency: group.invoices.len() as u64,
            monetary: group.monetary,
        });
    }

    if dropped > 0 {
        tracing::warn!("dropped {dropped} customers with non-positive monetary total");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_aggregate.rs"]
mod tests;
