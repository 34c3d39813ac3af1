use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use recsynth_core::{Field, RecordSet};

/// Write a record set as CSV and return the number of bytes written.
pub fn write_records_csv(path: &Path, records: &RecordSet) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = write_records(CountingWriter::new(writer), records)?;
    Ok(counting.bytes_written())
}

/// Write a record set as CSV into `writer`.
///
/// The first column holds the row key: the index field when one is set
/// (named after it), otherwise the row position under an empty header. The
/// remaining fields follow in schema order.
pub fn write_records<W: Write>(writer: W, records: &RecordSet) -> Result<W, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let index = records.index();
    let columns: Vec<Field> = records
        .fields()
        .into_iter()
        .filter(|field| Some(*field) != index)
        .collect();

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(index.map(Field::as_str).unwrap_or_default());
    header.extend(columns.iter().map(|field| field.as_str()));
    writer.write_record(&header)?;

    for (key, row) in records.keys().zip(records.rows()) {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(key.to_string());
        record.extend(columns.iter().map(|field| {
            row.record
                .get(*field)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    writer.into_inner().map_err(|err| err.into_error().into())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
