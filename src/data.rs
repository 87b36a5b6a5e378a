use std::{cmp::Ordering, fmt::Debug};

use log::warn;

use crate::{Error, Result};

/// An owned, opaque byte payload.
///
/// Its length tag is the length of its buffer, so the two can never drift
/// apart, not even when the tree swaps payloads of different sizes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Data {
    buffer: Box<[u8]>,
}

impl Data {
    /// Copies `bytes` into a buffer of its own.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let mut buffer = reserve(bytes.len())?;
        buffer.extend_from_slice(bytes);
        Ok(Data {
            buffer: buffer.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte-wise comparator: the common prefix decides, and a buffer sorts
    /// before any longer buffer it is a prefix of.
    pub fn compare(a: &Data, b: &Data) -> Ordering {
        a.buffer.cmp(&b.buffer)
    }
}

fn reserve(size: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if buffer.try_reserve_exact(size).is_err() {
        warn!("payload allocation of {size} bytes failed");
        return Err(Error::AllocationFailure {
            what: "a payload",
            size,
        });
    }
    Ok(buffer)
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Data({:02x?})", self.buffer))
    }
}
