//! The index file: one JSON-encoded [`FileRecord`](crate::models::FileRecord) per line.
//!
//! Records carry no surrounding structure, so any line start is a valid place to resume
//! reading. That is what makes a record's byte offset usable as its id:
//!
//! - [`codec`] turns one record into one line and back
//! - [`stream`] reads records sequentially while reporting where each one started

pub mod codec;
pub mod stream;

pub use codec::{RECORD_TERMINATOR, decode_record, encode_record};
pub use stream::RecordStream;
