//! Shared pool of reusable byte buffers.
//!
//! Part generators render into scratch buffers checked out from here. A
//! checked-out buffer is owned exclusively by its [`PooledBuffer`] guard and
//! goes back to the pool, cleared, when the guard is dropped. Callers that need
//! the bytes afterwards must copy them out with [`PooledBuffer::to_vec`] first.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};

/// Number of idle buffers the shared pool retains.
const DEFAULT_MAX_IDLE: usize = 32;

/// Capacity a fresh buffer starts with.
const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Buffers that grew beyond this are dropped instead of being retained.
const MAX_RETAINED_CAPACITY: usize = 4 * 1024 * 1024;

static SHARED_POOL: Lazy<BufferPool> = Lazy::new(|| BufferPool::new(DEFAULT_MAX_IDLE));

/// A bounded pool of `Vec<u8>` scratch buffers.
#[derive(Debug)]
pub struct BufferPool {
    idle: Mutex<Vec<Vec<u8>>>,
    max_idle: usize,
}

impl BufferPool {
    /// Create a pool that keeps at most `max_idle` buffers around.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
        }
    }

    /// Process-wide pool shared by all writers.
    pub fn shared() -> &'static BufferPool {
        &SHARED_POOL
    }

    /// Take an empty buffer out of the pool, allocating one if none is idle.
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let buf = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(DEFAULT_BUFFER_CAPACITY));
        PooledBuffer {
            buf: Some(buf),
            pool: self,
        }
    }

    /// Number of buffers currently idle in the pool.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn give_back(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
        // Pool is full, buffer is dropped
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

/// Exclusive handle on a pooled buffer.
///
/// Dereferences to `Vec<u8>` and implements both [`io::Write`] and
/// [`fmt::Write`], so XML can be rendered straight into it.
pub struct PooledBuffer<'a> {
    buf: Option<Vec<u8>>,
    pool: &'a BufferPool,
}

impl PooledBuffer<'_> {
    /// Copy the current contents out. The pooled storage stays with the guard.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Append a string slice.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        // Only `None` once `drop` has started
        self.buf.as_ref().unwrap_or(&EMPTY)
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buf.get_or_insert_with(Vec::new)
    }
}

static EMPTY: Vec<u8> = Vec::new();

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.give_back(buf);
        }
    }
}

impl io::Write for PooledBuffer<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for PooledBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer").field("len", &self.len()).finish()
    }
}
