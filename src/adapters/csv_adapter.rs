//! CSV bar source.
//!
//! Reads the header eagerly, then one record per `next_bar` call.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::error::BarsimError;
use crate::domain::ohlcv::Bar;
use crate::domain::schema::{FieldSchema, Record};
use crate::ports::data_port::BarSource;

pub struct CsvBarSource<R: io::Read = File> {
    reader: csv::Reader<R>,
    header: Vec<String>,
    schema: FieldSchema,
    record: csv::StringRecord,
    exhausted: bool,
}

impl CsvBarSource<File> {
    pub fn open<P: AsRef<Path>>(path: P, schema: FieldSchema) -> Result<Self, BarsimError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened bar file");
        Self::from_reader(file, schema)
    }
}

impl<R: io::Read> CsvBarSource<R> {
    pub fn from_reader(rdr: R, schema: FieldSchema) -> Result<Self, BarsimError> {
        // flexible: field-count mismatches are reported by the schema with line numbers
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);
        let header = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(CsvBarSource {
            reader,
            header,
            schema,
            record: csv::StringRecord::new(),
            exhausted: false,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Next raw record with its 1-based line number.
    pub fn next_record(&mut self) -> Result<Option<(u64, Record)>, BarsimError> {
        if self.exhausted {
            return Ok(None);
        }
        if !self.reader.read_record(&mut self.record).map_err(csv_error)? {
            self.exhausted = true;
            return Ok(None);
        }

        let line = self.record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = self.record.iter().collect();
        let record = self.schema.parse_record(line, &self.header, &fields)?;
        Ok(Some((line, record)))
    }
}

impl<R: io::Read> BarSource for CsvBarSource<R> {
    fn next_bar(&mut self) -> Result<Option<Bar>, BarsimError> {
        match self.next_record()? {
            Some((line, record)) => Ok(Some(Bar::from_record(line, &record, self.schema.columns())?)),
            None => Ok(None),
        }
    }
}

fn csv_error(err: csv::Error) -> BarsimError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => BarsimError::Io(e),
        _ => BarsimError::Csv { reason },
    }
}
