//! Newline-delimited JSON rendering and output.
//!
//! The whole corpus is rendered into one buffer before anything is written.
//! Records are separated by `\n` with no newline after the last one.
//! Each record is one line with `", "` between members and `": "` after
//! keys:
//!
//! ```text
//! {"timestamp": 100000, "ip": "10.0.0.1", "endpoint": "/example/endpoint1", "status_code": "200", ...}
//! ```

use crate::corpus::Record;
use crate::error::Result;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Serializer;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Rough size of one serialized record, used to presize the buffer
const RECORD_SIZE_HINT: usize = 192;

/// Single-line JSON with a space after each `,` and `:`
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

/// Render records as newline-separated single-line JSON objects
pub fn render<'a, I>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Record<'a>>,
{
    let records = records.into_iter();
    let mut buffer = Vec::with_capacity(records.size_hint().0 * RECORD_SIZE_HINT);
    for (i, record) in records.enumerate() {
        if i > 0 {
            buffer.push(b'\n');
        }
        let mut serializer = Serializer::with_formatter(&mut buffer, SpacedFormatter);
        record.serialize(&mut serializer)?;
    }
    Ok(buffer)
}

/// Write the rendered corpus to `path`, replacing any existing file
pub fn write_corpus(path: &Path, buffer: &[u8]) -> Result<()> {
    fs::write(path, buffer)?;
    Ok(())
}

/// Print the rendered corpus followed by a newline
pub fn echo<W: Write + ?Sized>(out: &mut W, buffer: &[u8]) -> Result<()> {
    out.write_all(buffer)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
