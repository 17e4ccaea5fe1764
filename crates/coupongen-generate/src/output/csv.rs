use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write codes as single-field CSV records, one per line, without a header.
///
/// Fields holding the delimiter, quotes or line breaks are quoted. Returns
/// the number of bytes written.
pub fn write_codes_csv(path: &Path, codes: &[String]) -> Result<u64, csv::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(csv::Error::from)?;
        }
    }

    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(counting);

    for code in codes {
        writer.write_record([code.as_str()])?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

/// Read back a file produced by [`write_codes_csv`].
///
/// Every record must hold exactly one field.
pub fn read_codes(path: &Path) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut codes = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != 1 {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(csv::Error::from(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {line}: expected 1 field, found {}", record.len()),
            )));
        }
        codes.push(record[0].to_string());
    }
    Ok(codes)
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
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
