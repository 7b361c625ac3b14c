use std::io::BufRead;

use crate::input::dates::parse_invoice_date;
use crate::input::{InputError, LineItem};

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    pub customer_id: usize,
    pub invoice_no: usize,
    pub invoice_date: usize,
    pub quantity: usize,
    pub unit_price: usize,
}

impl ColumnIndex {
    fn max_index(&self) -> usize {
        self.customer_id
            .max(self.invoice_no)
            .max(self.invoice_date)
            .max(self.quantity)
            .max(self.unit_price)
    }
}

/// Locates the required columns by case-insensitive name. Additional
/// columns are ignored.
pub fn resolve_columns(header: &[String]) -> Result<ColumnIndex, InputError> {
    let mut customer_id = None;
    let mut invoice_no = None;
    let mut invoice_date = None;
    let mut quantity = None;
    let mut unit_price = None;

    for (idx, name) in header.iter().enumerate() {
        match name.trim().to_ascii_lowercase().as_str() {
            "customerid" => customer_id.get_or_insert(idx),
            "invoiceno" => invoice_no.get_or_insert(idx),
            "invoicedate" => invoice_date.get_or_insert(idx),
            "quantity" => quantity.get_or_insert(idx),
            "unitprice" => unit_price.get_or_insert(idx),
            _ => continue,
        };
    }

    let require = |col: Option<usize>, name: &str| {
        col.ok_or_else(|| InputError::InvalidInput(format!("missing required column {name}")))
    };

    Ok(ColumnIndex {
        customer_id: require(customer_id, "CustomerID")?,
        invoice_no: require(invoice_no, "InvoiceNo")?,
        invoice_date: require(invoice_date, "InvoiceDate")?,
        quantity: require(quantity, "Quantity")?,
        unit_price: require(unit_price, "UnitPrice")?,
    })
}

/// Splits one CSV line into fields. Quote-aware: quoted fields may contain
/// commas, and a doubled quote inside a quoted field reads as a literal
/// quote.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

/// Parses a line-item table from a reader. The first non-empty line is the
/// header; blank lines are skipped; any row failing to parse aborts the
/// load with its line number.
pub fn parse_line_items<R: BufRead>(mut reader: R) -> Result<Vec<LineItem>, InputError> {
    let mut buf = String::new();
    let mut line_no = 0usize;

    let header = loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Err(InputError::Parse("input table is empty".to_string()));
        }
        line_no += 1;
        let line = strip_bom(buf.trim_end_matches(['\r', '\n']));
        if !line.is_empty() {
            break split_csv_line(line);
        }
    };
    let columns = resolve_columns(&header)?;

    let mut items = Vec::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        items.push(parse_row(line, &columns, line_no)?);
    }

    Ok(items)
}

fn parse_row(line: &str, columns: &ColumnIndex, line_no: usize) -> Result<LineItem, InputError> {
    let fields = split_csv_line(line);
    if fields.len() <= columns.max_index() {
        return Err(InputError::Parse(format!(
            "line {line_no}: expected at least {} fields, found {}",
            columns.max_index() + 1,
            fields.len()
        )));
    }

    let raw_date = fields[columns.invoice_date].trim();
    let invoice_date = parse_invoice_date(raw_date).ok_or_else(|| {
        InputError::Parse(format!("line {line_no}: unparseable InvoiceDate {raw_date:?}"))
    })?;

    let raw_quantity = fields[columns.quantity].trim();
    let quantity = raw_quantity.parse::<i64>().map_err(|_| {
        InputError::Parse(format!("line {line_no}: unparseable Quantity {raw_quantity:?}"))
    })?;

    let raw_price = fields[columns.unit_price].trim();
    let unit_price = raw_price.parse::<f64>().map_err(|_| {
        InputError::Parse(format!("line {line_no}: unparseable UnitPrice {raw_price:?}"))
    })?;

    Ok(LineItem {
        customer_id: fields[columns.customer_id].trim().to_string(),
        invoice_no: fields[columns.invoice_no].trim().to_string(),
        invoice_date,
        quantity,
        unit_price,
    })
}

fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{feff}').unwrap_or(line)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/csv.rs"]
mod tests;
