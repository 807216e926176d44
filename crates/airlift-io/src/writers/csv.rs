//! CSV writer using the canonical headers of the columns present.

use std::fs::File;
use std::io::Write;

use airlift_core::schema::{Column, Schema};
use airlift_core::types::AirportRecord;

use crate::error::Result;
use crate::writers::cell_text;

pub struct CsvWriter<W: Write> {
    inner: csv::Writer<W>,
    columns: Vec<Column>,
    wrote_header: bool,
}

impl CsvWriter<File> {
    pub fn to_path(path: &str, schema: &Schema) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f, schema))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W, schema: &Schema) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
            columns: schema.columns.clone(),
            wrote_header: false,
        }
    }

    pub fn write_rows<'a, I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a AirportRecord>,
    {
        if !self.wrote_header {
            self.inner
                .write_record(self.columns.iter().map(|c| c.header()))?;
            self.wrote_header = true;
        }
        let mut n = 0;
        for rec in rows {
            self.inner
                .write_record(self.columns.iter().map(|c| cell_text(rec, *c)))?;
            n += 1;
        }
        self.inner.flush()?;
        Ok(n)
    }
}
