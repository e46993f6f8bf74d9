//! Greedy size-bounded chunking of records into batches.
//!
//! Sizes are measured as compact JSON (UTF-8, non-ASCII left unescaped). The running
//! total of a batch includes its list framing: two bytes for `[` and `]` plus one
//! `,` between consecutive records, so a batch's serialized item list stays within
//! `max_bytes`. The only batches allowed past the limit hold a single record that is
//! too large to fit anywhere else.

use crate::error::Result;
use crate::types::{PlannedBatch, Record};
use serde::Serialize;
use std::io;

const LIST_FRAMING: usize = 2;
const SEPARATOR: usize = 1;

#[derive(Default)]
struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Compact JSON byte length of `value`, without allocating the encoding
pub fn serialized_len<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    let mut counter = ByteCounter::default();
    serde_json::to_writer(&mut counter, value)?;
    Ok(counter.0)
}

/// Batches from the chunker, with the plan that describes them
#[derive(Debug, Default)]
pub struct Chunked {
    pub batches: Vec<Vec<Record>>,
    pub planned: Vec<PlannedBatch>,
}

/// Partition `records` into ordered batches whose serialized lists fit `max_bytes`.
///
/// A record is appended to the running batch unless that would push the batch
/// over the limit, in which case the batch is closed and the record starts the next
/// one. An empty batch is never emitted, so an oversized record always lands
/// alone in its own batch. The running total is the exact size of the batch's
/// serialized list, so the plan comes out of the same scan.
pub fn chunk_and_plan(records: Vec<Record>, max_bytes: usize) -> Result<Chunked> {
    let mut chunked = Chunked::default();
    let mut current: Vec<Record> = Vec::new();
    let mut current_size = LIST_FRAMING;

    for record in records {
        let len = serialized_len(&record)?;

        if !current.is_empty() && current_size + SEPARATOR + len > max_bytes {
            chunked.close(std::mem::take(&mut current), current_size);
            current_size = LIST_FRAMING;
        }

        if !current.is_empty() {
            current_size += SEPARATOR;
        }
        current_size += len;
        current.push(record);
    }

    if !current.is_empty() {
        chunked.close(current, current_size);
    }

    Ok(chunked)
}

/// Like `chunk_and_plan`, keeping only the batches
pub fn chunk_by_size(records: Vec<Record>, max_bytes: usize) -> Result<Vec<Vec<Record>>> {
    Ok(chunk_and_plan(records, max_bytes)?.batches)
}

impl Chunked {
    fn close(&mut self, batch: Vec<Record>, list_bytes: usize) {
        self.planned.push(PlannedBatch {
            batch_number: self.batches.len() + 1,
            item_count: batch.len(),
            list_bytes,
        });
        self.batches.push(batch);
    }
}
