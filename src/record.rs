//! Record Codec
//!
//! Self-delimiting binary encoding of a single key-value entry.
//!
//! ## Record Format
//! ```text
//! ┌──────────────────┬──────────────────┬───────────┬─────────────┐
//! │ KeyLen: u64 (BE) │ ValLen: u64 (BE) │ Key bytes │ Value bytes │
//! └──────────────────┴──────────────────┴───────────┴─────────────┘
//! ```
//!
//! Records are concatenated back to back with no padding, so the next record
//! starts exactly `HEADER_SIZE + key_len + value_len` bytes after the current one.

use std::cmp::Ordering;

use bytes::{Buf, BufMut};

use crate::error::{LsdbError, Result};

/// Header size: KeyLen (8) + ValLen (8) = 16 bytes
pub const HEADER_SIZE: usize = 16;

/// Number of bytes `encode(key, value)` produces
pub fn encoded_len(key: &[u8], value: &[u8]) -> usize {
    HEADER_SIZE + key.len() + value.len()
}

/// Encode one record into a fresh buffer
pub fn encode(key: &[u8], value: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(key, value));
    encode_into(&mut buf, key, value);
    buf
}

/// Append one encoded record to `buf`
pub fn encode_into<B: BufMut>(buf: &mut B, key: &[u8], value: &[u8]) {
    buf.put_u64(key.len() as u64);
    buf.put_u64(value.len() as u64);
    buf.put_slice(key);
    buf.put_slice(value);
}

/// Decode the record starting at `offset`
///
/// Returns the record (borrowing from `bytes`) and the number of bytes it
/// occupies, header included.
pub fn decode(bytes: &[u8], offset: usize) -> Result<(RecordRef<'_>, usize)> {
    let remaining = bytes.get(offset..).ok_or_else(|| {
        malformed(
            offset,
            format!("offset is past the end of a {}-byte buffer", bytes.len()),
        )
    })?;

    if remaining.len() < HEADER_SIZE {
        return Err(malformed(
            offset,
            format!(
                "incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                remaining.len()
            ),
        ));
    }

    let mut header = &remaining[..HEADER_SIZE];
    let declared_key_len = header.get_u64();
    let declared_value_len = header.get_u64();
    let body = &remaining[HEADER_SIZE..];

    let key_len = usize::try_from(declared_key_len)
        .ok()
        .filter(|&len| len <= body.len())
        .ok_or_else(|| {
            malformed(
                offset,
                format!(
                    "key length {} exceeds the {} bytes remaining",
                    declared_key_len,
                    body.len()
                ),
            )
        })?;

    let value_len = usize::try_from(declared_value_len)
        .ok()
        .filter(|&len| len <= body.len() - key_len)
        .ok_or_else(|| {
            malformed(
                offset,
                format!(
                    "value length {} exceeds the {} bytes remaining after the key",
                    declared_value_len,
                    body.len() - key_len
                ),
            )
        })?;

    let record = RecordRef {
        key: &body[..key_len],
        value: &body[key_len..key_len + value_len],
    };

    Ok((record, HEADER_SIZE + key_len + value_len))
}

/// Lexicographic comparison of a lookup key against a decoded record's key
pub fn compare_key(target: &[u8], record: &RecordRef<'_>) -> Ordering {
    target.cmp(record.key)
}

fn malformed(offset: usize, reason: String) -> LsdbError {
    LsdbError::MalformedRecord { offset, reason }
}

// =============================================================================
// Record Types
// =============================================================================

/// A record borrowed from an encoded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef<'a> {
    pub key: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> RecordRef<'a> {
    /// Serialized length of this record
    pub fn encoded_len(&self) -> usize {
        encoded_len(self.key, self.value)
    }

    /// Copy the key and value out of the underlying buffer
    pub fn to_record(&self) -> Record {
        Record::new(self.key.to_vec(), self.value.to_vec())
    }
}

/// An owned key-value record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Record {
    pub fn new(key: Vec<u8>, value: Vec<u8>) -> Self {
        Self { key, value }
    }

    pub fn encoded_len(&self) -> usize {
        encoded_len(&self.key, &self.value)
    }

    pub fn encode(&self) -> Vec<u8> {
        encode(&self.key, &self.value)
    }

    pub fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef {
            key: &self.key,
            value: &self.value,
        }
    }
}

// =============================================================================
// Record Iterator
// =============================================================================

/// Iterator over every record of an encoded buffer, starting at offset 0
///
/// Yields `(offset, record)` pairs. After the first malformed record the
/// iterator yields that error once and then stops.
pub struct RecordIter<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> RecordIter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<(usize, RecordRef<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }

        match decode(self.bytes, self.offset) {
            Ok((record, consumed)) => {
                let offset = self.offset;
                self.offset += consumed;
                Some(Ok((offset, record)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
