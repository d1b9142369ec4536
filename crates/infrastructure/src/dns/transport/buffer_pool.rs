use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const MIN_CLASS_SIZE: usize = 512;

/// Reusable byte buffers for outgoing queries and incoming datagrams.
///
/// Buffers are grouped by power-of-two size class so a released buffer can
/// serve any later request of the same class. A `PooledBuffer` returns itself
/// to the pool when dropped, so every exit path of the caller releases it.
pub struct BufferPool {
    classes: DashMap<usize, Vec<Vec<u8>>, FxBuildHasher>,
    max_per_class: usize,
    total_created: AtomicU64,
    total_reused: AtomicU64,
}

impl BufferPool {
    pub fn new(max_per_class: usize) -> Self {
        Self {
            classes: DashMap::with_hasher(FxBuildHasher),
            max_per_class,
            total_created: AtomicU64::new(0),
            total_reused: AtomicU64::new(0),
        }
    }

    /// Hands out a zeroed buffer of exactly `len` bytes.
    pub fn acquire(&self, len: usize) -> PooledBuffer<'_> {
        let class = size_class(len);

        let reused = self
            .classes
            .get_mut(&class)
            .and_then(|mut entry| entry.pop());

        let mut buf = match reused {
            Some(buf) => {
                self.total_reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => {
                self.total_created.fetch_add(1, Ordering::Relaxed);
                Vec::with_capacity(class)
            }
        };

        buf.clear();
        buf.resize(len, 0);

        PooledBuffer {
            buf,
            class,
            pool: self,
        }
    }

    fn release(&self, class: usize, buf: Vec<u8>) {
        let mut entry = self.classes.entry(class).or_default();
        if entry.len() < self.max_per_class {
            entry.push(buf);
        } else {
            debug!(class, "Buffer pool class full, dropping buffer");
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_created: self.total_created.load(Ordering::Relaxed),
            total_reused: self.total_reused.load(Ordering::Relaxed),
            total_pooled: self.classes.iter().map(|e| e.len()).sum(),
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(32)
    }
}

fn size_class(len: usize) -> usize {
    len.max(MIN_CLASS_SIZE).next_power_of_two()
}

pub struct PooledBuffer<'a> {
    buf: Vec<u8>,
    class: usize,
    pool: &'a BufferPool,
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("class", &self.class)
            .field("len", &self.buf.len())
            .finish()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(self.class, std::mem::take(&mut self.buf));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    pub total_created: u64,
    pub total_reused: u64,
    pub total_pooled: usize,
}
