//! Streaming NDJSON writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde_json::Map;

use airlift_core::schema::{Column, Schema};
use airlift_core::types::AirportRecord;

use crate::error::Result;
use crate::writers::cell_json;

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
    // schema order keeps keys stable across calls
    columns: Vec<Column>,
}

impl JsonlWriter<File> {
    pub fn to_path(path: &str, schema: &Schema) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f, schema))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W, schema: &Schema) -> Self {
        Self {
            writer: BufWriter::new(writer),
            columns: schema.columns.clone(),
        }
    }

    /// Write rows as one JSON object per line, keyed by the source headers.
    pub fn write_rows<'a, I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a AirportRecord>,
    {
        let mut n = 0;
        for rec in rows {
            let mut obj = Map::new();
            for col in &self.columns {
                obj.insert(col.header().to_string(), cell_json(rec, *col));
            }
            let line = serde_json::to_string(&obj)?;
            writeln!(self.writer, "{}", line)?;
            n += 1;
        }
        self.writer.flush()?;
        Ok(n)
    }
}
