use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use super::codec::{RECORD_TERMINATOR, decode_record};
use crate::error::{Error, Result};
use crate::models::FileRecord;

/// Sequential reader over index records that knows the byte offset of each one.
///
/// The offset returned with a record can later be passed to [`RecordStream::seek_to`]
/// to read that same record again, as long as the index has not been rebuilt.
pub struct RecordStream<R> {
    reader: BufReader<R>,
    offset: u64,
    line: Vec<u8>,
}

impl<R: Read + Seek> RecordStream<R> {
    /// Wrap `reader`. Reading starts at its current position.
    pub fn new(mut reader: R) -> Result<Self> {
        let offset = reader
            .stream_position()
            .map_err(|e| stream_io("Failed to query stream position", e))?;
        Ok(Self { reader: BufReader::new(reader), offset, line: Vec::new() })
    }

    /// Move the cursor to an absolute byte offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.offset = self
            .reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| stream_io(format!("Failed to seek to byte offset {offset}"), e))?;
        Ok(())
    }

    /// Byte offset the next read starts from.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether a non-blank line follows, without decoding it.
    ///
    /// Blank lines in front of it are consumed.
    pub fn has_more(&mut self) -> Result<bool> {
        loop {
            let offset = self.offset;
            let buf = self.reader.fill_buf().map_err(|e| {
                stream_io(format!("Failed to read record at byte offset {offset}"), e)
            })?;
            if buf.is_empty() {
                return Ok(false);
            }
            if !buf.iter().all(u8::is_ascii_whitespace) {
                return Ok(true);
            }

            let consumed = buf.len();
            self.reader.consume(consumed);
            self.offset += consumed as u64;
        }
    }

    /// Decode the next record together with the offset it started at.
    ///
    /// Returns `Ok(None)` at end of stream. A malformed line is [`Error::Decode`].
    pub fn next_record(&mut self) -> Result<Option<(u64, FileRecord)>> {
        loop {
            let start = self.offset;
            self.line.clear();
            let read = self.reader.read_until(RECORD_TERMINATOR, &mut self.line).map_err(|e| {
                stream_io(format!("Failed to read record at byte offset {start}"), e)
            })?;
            if read == 0 {
                return Ok(None);
            }
            self.offset += read as u64;

            // Blank lines carry no record
            if self.line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let record = decode_record(&self.line)
                .map_err(|source| Error::Decode { offset: start, source })?;
            return Ok(Some((start, record)));
        }
    }
}

impl<R: Read + Seek> Iterator for RecordStream<R> {
    type Item = Result<(u64, FileRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn stream_io(message: impl Into<String>, source: io::Error) -> Error {
    Error::Io { message: message.into(), path: None, source }
}
