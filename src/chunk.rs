//! Splitting a print request body into GATT-sized writes.
//!
//! Each chunk is an index byte followed by up to [`CHUNK_DATA_SIZE`] body
//! bytes. The last chunk also carries the `12 34` magic, which tells the
//! printer the job is complete.

use log::debug;

use crate::error::{Error, Result};
use crate::payload::MAGIC;

pub const CHUNK_DATA_SIZE: usize = 500;

/// Index value the vendor app never uses for a chunk (it is the `ESC` byte);
/// chunks from here on are numbered one higher.
const SKIPPED_INDEX: usize = 0x1B;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    index: u8,
    data: Vec<u8>,
    last: bool,
}

impl Chunk {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Wire form: index, data, and the magic trailer on the last chunk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.data.len() + MAGIC.len());
        buf.push(self.index);
        buf.extend_from_slice(&self.data);
        if self.last {
            buf.extend_from_slice(&MAGIC);
        }
        buf
    }
}

/// Index byte of the `position`-th chunk, or `None` when it does not fit.
fn chunk_index(position: usize) -> Option<u8> {
    let index = if position >= SKIPPED_INDEX {
        position + 1
    } else {
        position
    };
    if index > u8::MAX as usize {
        None
    } else {
        Some(index as u8)
    }
}

/// Split `payload` into `ceil(len / chunk_data_size)` chunks.
///
/// An empty payload yields no chunks. A payload needing an index beyond
/// `0xFF` fails with [`Error::TooManyChunks`]: what the printer expects past
/// that point is unknown, so indexes are never wrapped.
pub fn split(payload: &[u8], chunk_data_size: usize) -> Result<Vec<Chunk>> {
    if chunk_data_size == 0 {
        return Err(Error::InvalidArgument(
            "chunk data size must be at least 1".to_string(),
        ));
    }

    let remainder = (payload.len() % chunk_data_size != 0) as usize;
    let count = payload.len() / chunk_data_size + remainder;
    if count > 0 && chunk_index(count - 1).is_none() {
        return Err(Error::TooManyChunks(count));
    }

    let chunks = payload
        .chunks(chunk_data_size)
        .enumerate()
        .map(|(position, data)| {
            let index = chunk_index(position).ok_or(Error::TooManyChunks(count))?;
            Ok(Chunk {
                index,
                data: data.to_vec(),
                last: position + 1 == count,
            })
        })
        .collect::<Result<Vec<Chunk>>>()?;

    debug!(
        "split {} bytes into {} chunks of up to {} bytes",
        payload.len(),
        chunks.len(),
        chunk_data_size
    );
    Ok(chunks)
}

/// Concatenate the data of `chunks`, dropping index bytes and the trailer.
pub fn reassemble(chunks: &[Chunk]) -> Vec<u8> {
    chunks
        .iter()
        .flat_map(|chunk| chunk.data().iter().copied())
        .collect()
}
