//! OHLCV bar representation.

use crate::domain::error::RecordError;
use crate::domain::schema::{BarColumns, FieldValue, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub base_volume: f64,
    pub quote_volume: f64,
    pub trade_count: i64,
}

impl Bar {
    /// Assemble a bar from a name-keyed record.
    ///
    /// Every column named in `columns` must be present with the kind the
    /// schema assigned it; anything else in the record is ignored.
    pub fn from_record(line: u64, record: &Record, columns: &BarColumns) -> Result<Self, RecordError> {
        Ok(Bar {
            date: text(line, record, &columns.date)?,
            open: real(line, record, &columns.open)?,
            high: real(line, record, &columns.high)?,
            low: real(line, record, &columns.low)?,
            close: real(line, record, &columns.close)?,
            base_volume: real(line, record, &columns.base_volume)?,
            quote_volume: real(line, record, &columns.quote_volume)?,
            trade_count: integer(line, record, &columns.trade_count)?,
        })
    }
}

fn field<'a>(line: u64, record: &'a Record, name: &str) -> Result<&'a FieldValue, RecordError> {
    record.get(name).ok_or_else(|| RecordError::MissingField {
        line,
        field: name.to_string(),
    })
}

fn mismatch(line: u64, name: &str, value: &FieldValue, kind: &'static str) -> RecordError {
    let value = match value {
        FieldValue::Real(v) => v.to_string(),
        FieldValue::Integer(v) => v.to_string(),
        FieldValue::Text(v) => v.clone(),
    };
    RecordError::Coercion {
        line,
        field: name.to_string(),
        value,
        kind,
    }
}

fn real(line: u64, record: &Record, name: &str) -> Result<f64, RecordError> {
    match field(line, record, name)? {
        FieldValue::Real(v) => Ok(*v),
        other => Err(mismatch(line, name, other, "a real number")),
    }
}

fn integer(line: u64, record: &Record, name: &str) -> Result<i64, RecordError> {
    match field(line, record, name)? {
        FieldValue::Integer(v) => Ok(*v),
        other => Err(mismatch(line, name, other, "an integer")),
    }
}

fn text(line: u64, record: &Record, name: &str) -> Result<String, RecordError> {
    match field(line, record, name)? {
        FieldValue::Text(v) => Ok(v.clone()),
        other => Err(mismatch(line, name, other, "text")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FieldSchema;

    const HEADER: [&str; 9] = [
        "unix",
        "date",
        "symbol",
        "open",
        "high",
        "low",
        "close",
        "Volume ETH",
        "Volume USDT",
    ];

    fn record(fields: &[&str]) -> Record {
        let schema = FieldSchema::default();
        let mut header: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        header.push("tradecount".into());
        schema
            .parse_record(2, &header, fields)
            .unwrap()
    }

    fn sample_record() -> Record {
        record(&[
            "1609459200",
            "2021-01-01 00:00:00",
            "ETH/USDT",
            "736.42",
            "739.00",
            "729.33",
            "734.07",
            "27932.69",
            "20514354.85",
            "13580",
        ])
    }

    #[test]
    fn from_record_extracts_all_columns() {
        let bar = Bar::from_record(2, &sample_record(), &BarColumns::default()).unwrap();
        assert_eq!(bar.date, "2021-01-01 00:00:00");
        assert_eq!(bar.open, 736.42);
        assert_eq!(bar.high, 739.00);
        assert_eq!(bar.low, 729.33);
        assert_eq!(bar.close, 734.07);
        assert_eq!(bar.base_volume, 27932.69);
        assert_eq!(bar.quote_volume, 20514354.85);
        assert_eq!(bar.trade_count, 13580);
    }

    #[test]
    fn from_record_missing_column() {
        let mut rec = sample_record();
        rec.remove("low");
        let err = Bar::from_record(9, &rec, &BarColumns::default()).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                line: 9,
                field: "low".into(),
            }
        );
    }

    #[test]
    fn from_record_wrong_kind() {
        let mut rec = sample_record();
        rec.insert("high".into(), FieldValue::Text("739".into()));
        let err = Bar::from_record(2, &rec, &BarColumns::default()).unwrap_err();
        assert!(matches!(err, RecordError::Coercion { kind: "a real number", .. }));
    }
}
