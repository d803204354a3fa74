//! Column-name schema for historical bar files.
//!
//! Field kinds are looked up by column *name*. A text column whose data
//! happens to spell a numeric column's name (e.g. a `symbol` column holding
//! `high`) stays text.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::error::RecordError;

pub const DEFAULT_BASE_VOLUME_COLUMN: &str = "Volume ETH";
pub const DEFAULT_QUOTE_VOLUME_COLUMN: &str = "Volume USDT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Real,
    Integer,
    Text,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Real => "a real number",
            FieldKind::Integer => "an integer",
            FieldKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Real(f64),
    Integer(i64),
    Text(String),
}

/// One parsed row, keyed by column name.
pub type Record = BTreeMap<String, FieldValue>;

/// Column names a [`Bar`](crate::domain::ohlcv::Bar) is assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarColumns {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub base_volume: String,
    pub quote_volume: String,
    pub trade_count: String,
}

impl Default for BarColumns {
    fn default() -> Self {
        BarColumns {
            date: "date".into(),
            open: "open".into(),
            high: "high".into(),
            low: "low".into(),
            close: "close".into(),
            base_volume: DEFAULT_BASE_VOLUME_COLUMN.into(),
            quote_volume: DEFAULT_QUOTE_VOLUME_COLUMN.into(),
            trade_count: "tradecount".into(),
        }
    }
}

/// Immutable declaration of which columns are numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    real: BTreeSet<String>,
    integer: BTreeSet<String>,
    columns: BarColumns,
}

impl Default for FieldSchema {
    fn default() -> Self {
        FieldSchema::from_columns(BarColumns::default())
    }
}

impl FieldSchema {
    /// Real: open/high/low/close plus both volume columns. Integer: trade count.
    pub fn from_columns(columns: BarColumns) -> Self {
        let real = [
            &columns.open,
            &columns.high,
            &columns.low,
            &columns.close,
            &columns.base_volume,
            &columns.quote_volume,
        ]
        .into_iter()
        .cloned()
        .collect();
        let integer = std::iter::once(columns.trade_count.clone()).collect();
        FieldSchema {
            real,
            integer,
            columns,
        }
    }

    /// Default schema with the volume columns renamed, e.g. for a BTC/USDT file.
    pub fn with_volume_columns(base: &str, quote: &str) -> Self {
        FieldSchema::from_columns(BarColumns {
            base_volume: base.to_string(),
            quote_volume: quote.to_string(),
            ..BarColumns::default()
        })
    }

    pub fn columns(&self) -> &BarColumns {
        &self.columns
    }

    pub fn kind_of(&self, name: &str) -> FieldKind {
        if self.real.contains(name) {
            FieldKind::Real
        } else if self.integer.contains(name) {
            FieldKind::Integer
        } else {
            FieldKind::Text
        }
    }

    pub fn coerce(&self, line: u64, name: &str, raw: &str) -> Result<FieldValue, RecordError> {
        let kind = self.kind_of(name);
        let bad = || RecordError::Coercion {
            line,
            field: name.to_string(),
            value: raw.to_string(),
            kind: kind.describe(),
        };
        match kind {
            FieldKind::Real => raw.trim().parse::<f64>().map(FieldValue::Real).map_err(|_| bad()),
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| bad()),
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        }
    }

    /// Zip header names with raw fields into a [`Record`].
    ///
    /// The field count must match the header exactly.
    pub fn parse_record(
        &self,
        line: u64,
        header: &[String],
        fields: &[&str],
    ) -> Result<Record, RecordError> {
        if fields.len() != header.len() {
            return Err(RecordError::FieldCount {
                line,
                expected: header.len(),
                found: fields.len(),
            });
        }
        header
            .iter()
            .zip(fields)
            .map(|(name, raw)| self.coerce(line, name, raw).map(|v| (name.clone(), v)))
            .collect()
    }
}
