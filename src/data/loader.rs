//! CSV Loader
//!
//! Reads the delimited sales file into a `SalesTable`.
//! Header names are matched case- and whitespace-insensitively and may use
//! either the English names or the headers of the original Portuguese dataset.

use super::error::{LoadError, LoadResult};
use super::types::{title_case, SalesRecord, SalesTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Accepted headers per field, already trimmed and lowercased
const DATE_HEADERS: &[&str] = &["date", "data"];
const PRODUCT_HEADERS: &[&str] = &["product", "produto"];
const QUANTITY_HEADERS: &[&str] = &["quantity", "quantidade"];
const UNIT_PRICE_HEADERS: &[&str] = &["unit_price", "unit price", "preco_unitario"];
const UNIT_COST_HEADERS: &[&str] = &["unit_cost", "unit cost", "custo_unitario"];
const PAYMENT_HEADERS: &[&str] = &["payment_method", "payment method", "metodo_pagamento"];
const RATING_HEADERS: &[&str] = &["rating", "avaliacao"];
const LOCATION_HEADERS: &[&str] = &["location", "local"];
const LATITUDE_HEADERS: &[&str] = &["latitude", "lat"];
const LONGITUDE_HEADERS: &[&str] = &["longitude", "lon", "lng"];

/// Date-time formats tried in order before the date-only ones
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only formats; month-first before day-first for slash-separated values
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Column indices resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    product: usize,
    quantity: usize,
    unit_price: usize,
    unit_cost: usize,
    payment_method: usize,
    rating: usize,
    location: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> LoadResult<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let find = |aliases: &[&str], name: &'static str| -> LoadResult<usize> {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE_HEADERS, "date")?,
            product: find(PRODUCT_HEADERS, "product")?,
            quantity: find(QUANTITY_HEADERS, "quantity")?,
            unit_price: find(UNIT_PRICE_HEADERS, "unit price")?,
            unit_cost: find(UNIT_COST_HEADERS, "unit cost")?,
            payment_method: find(PAYMENT_HEADERS, "payment method")?,
            rating: find(RATING_HEADERS, "rating")?,
            location: find(LOCATION_HEADERS, "location")?,
            latitude: find(LATITUDE_HEADERS, "latitude")?,
            longitude: find(LONGITUDE_HEADERS, "longitude")?,
        })
    }
}

/// Trim and lowercase a header name
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// CSV file loader with a configurable delimiter
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    /// Create a loader for comma-separated files
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load the table from a file
    pub fn load(&self, path: &Path) -> LoadResult<SalesTable> {
        let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut table = self.load_reader(file)?;
        table.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            unparsed_dates = table.unparsed_dates,
            "Loaded sales table"
        );
        if table.unparsed_dates > 0 {
            tracing::warn!(
                "{} records have an unparseable date and are excluded from the timeline",
                table.unparsed_dates
            );
        }

        Ok(table)
    }

    /// Load the table from a string (useful for testing)
    pub fn load_str(&self, data: &str) -> LoadResult<SalesTable> {
        self.load_reader(data.as_bytes())
    }

    /// Load the table from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> LoadResult<SalesTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let columns = ColumnMap::resolve(reader.headers()?)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            records.push(parse_row(&row, &columns, line)?);
        }

        Ok(SalesTable::from_records(records))
    }
}

fn parse_row(row: &csv::StringRecord, columns: &ColumnMap, line: u64) -> LoadResult<SalesRecord> {
    let field = |idx: usize| row.get(idx).unwrap_or("").trim();

    let quantity = parse_quantity(field(columns.quantity), line)?;
    let unit_price = parse_f64(field(columns.unit_price), "unit price", line)?;
    let unit_cost = parse_f64(field(columns.unit_cost), "unit cost", line)?;
    let latitude = parse_f64(field(columns.latitude), "latitude", line)?;
    let longitude = parse_f64(field(columns.longitude), "longitude", line)?;

    let rating = match field(columns.rating) {
        "" => None,
        s => Some(parse_f64(s, "rating", line)?),
    };

    let raw_date = field(columns.date);
    let date = parse_date(raw_date);
    if date.is_none() {
        tracing::debug!(line, value = raw_date, "Unparseable date coerced to missing");
    }

    Ok(SalesRecord::new(title_case(field(columns.product)), quantity, unit_price, unit_cost)
        .date(date)
        .payment_method(field(columns.payment_method))
        .rating(rating)
        .location(field(columns.location), latitude, longitude))
}

fn parse_f64(value: &str, column: &'static str, line: u64) -> LoadResult<f64> {
    value.parse::<f64>().map_err(|_| LoadError::InvalidValue {
        line,
        column,
        value: value.to_string(),
    })
}

/// 2^63; integral floats must stay strictly below it to fit an `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Quantities are integral; `3.0` is accepted, `2.5` and `1e19` are not.
fn parse_quantity(value: &str, line: u64) -> LoadResult<i64> {
    if let Ok(q) = value.parse::<i64>() {
        return Ok(q);
    }
    match value.parse::<f64>() {
        Ok(q) if q.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&q) => Ok(q as i64),
        _ => Err(LoadError::InvalidValue {
            line,
            column: "quantity",
            value: value.to_string(),
        }),
    }
}

/// Parse a date cell, returning `None` instead of failing
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// Load a table from a path with the default loader
pub fn load_csv(path: &Path) -> LoadResult<SalesTable> {
    CsvLoader::new().load(path)
}
