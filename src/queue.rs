//! A growable FIFO queue of decoded values.
//!
//! Capacity is fixed between explicit [`resize`](ValueQueue::resize) calls;
//! the grow-by-factor policy deliberately lives in the calling engine, not
//! here.

use crate::CodecError;

/// Fixed-capacity ring buffer of `u64` values with used-count tracking.
///
/// Invariant: `len() <= capacity()`.
#[derive(Debug, Clone)]
pub struct ValueQueue {
    buf: Vec<u64>,
    head: usize,
    used: usize,
}

impl ValueQueue {
    /// Creates a queue holding at most `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        ValueQueue {
            buf: vec![0; capacity],
            head: 0,
            used: 0,
        }
    }

    /// Maximum number of values the queue can hold without a resize.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.used
    }

    /// True when no values are stored.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// True when the used count has reached the capacity.
    pub fn is_full(&self) -> bool {
        self.used == self.buf.len()
    }

    /// Appends a value; fails with [`CodecError::Overflow`] when full.
    pub fn enqueue(&mut self, value: u64) -> Result<(), CodecError> {
        if self.is_full() {
            return Err(CodecError::Overflow);
        }
        let tail = (self.head + self.used) % self.buf.len();
        self.buf[tail] = value;
        self.used += 1;
        Ok(())
    }

    /// Removes and returns the oldest value, or `None` when empty.
    pub fn try_dequeue(&mut self) -> Option<u64> {
        if self.used == 0 {
            return None;
        }
        let value = self.buf[self.head];
        self.head = (self.head + 1) % self.buf.len();
        self.used -= 1;
        Some(value)
    }

    /// Reallocates to `new_capacity`, preserving the stored values
    /// contiguously from the front of the new backing store.
    ///
    /// Fails with [`CodecError::Domain`] when `new_capacity` is below the
    /// used count.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), CodecError> {
        if new_capacity < self.used {
            return Err(CodecError::Domain("queue resize below its used count"));
        }
        let mut buf = vec![0; new_capacity];
        for slot in buf.iter_mut().take(self.used) {
            *slot = self.buf[self.head];
            self.head = (self.head + 1) % self.buf.len();
        }
        self.buf = buf;
        self.head = 0;
        Ok(())
    }

    /// Drains the queue into a `Vec`, oldest value first.
    pub fn into_vec(mut self) -> Vec<u64> {
        let mut values = Vec::with_capacity(self.used);
        while let Some(value) = self.try_dequeue() {
            values.push(value);
        }
        values
    }
}
