use crate::error::{Error, Result};
use crate::models::FileRecord;

/// Byte that ends every record in the index file.
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Encode a record as one index line, terminator included.
pub fn encode_record(record: &FileRecord) -> Result<Vec<u8>> {
    let mut line = serde_json::to_vec(record).map_err(Error::Encode)?;
    line.push(RECORD_TERMINATOR);
    Ok(line)
}

/// Decode one index line. Surrounding whitespace (the terminator, a `\r`) is ignored.
pub fn decode_record(line: &[u8]) -> serde_json::Result<FileRecord> {
    serde_json::from_slice(line)
}
