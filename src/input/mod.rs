use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use flate2::read::GzDecoder;
use thiserror::Error;

use crate::model::bins::BinProfile;

pub mod csv;
pub mod dates;

/// One purchase line-item as read from the uploaded table.
///
/// `customer_id` is the raw field value; an empty string models a missing
/// id. Such rows still count toward the global reference date but are
/// excluded from grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub customer_id: String,
    pub invoice_no: String,
    pub invoice_date: NaiveDateTime,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    /// Derived revenue for the row; negative for returns and cancellations.
    pub fn total_price(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Reads line-items from a delimited text file, gunzipping `*.gz`
/// transparently.
pub fn load_line_items(path: &Path) -> Result<Vec<LineItem>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "input file {} does not exist",
            path.display()
        )));
    }
    let reader = open_maybe_gz(path)?;
    let items = csv::parse_line_items(reader)?;
    tracing::info!("loaded {} line-items from {}", items.len(), path.display());
    Ok(items)
}

/// Loads a bin-boundary profile from a JSON file.
pub fn load_bin_profile(path: &Path) -> Result<BinProfile, InputError> {
    let file = File::open(path)?;
    let profile: BinProfile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| InputError::Parse(format!("bin profile {}: {e}", path.display())))?;
    profile
        .validate()
        .map_err(|msg| InputError::InvalidInput(format!("bin profile {}: {msg}", path.display())))?;
    Ok(profile)
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
