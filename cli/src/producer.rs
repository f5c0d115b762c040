use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use tiletrans_engine::{Complex, Element, StreamSource};
use tracing::debug;

/// Element values derived from their row-major stream index, so the output can be checked
/// position by position.
pub trait TestPattern: Element + PartialEq + core::fmt::Debug {
    /// Indices below this map to pairwise distinct values.
    const DISTINCT: u64;

    fn at(index: usize) -> Self;
}

impl TestPattern for u32 {
    const DISTINCT: u64 = 1 << 32;

    fn at(index: usize) -> Self {
        index as u32
    }
}

impl TestPattern for Complex<f32> {
    // Integers are exact in f32 up to 2^24.
    const DISTINCT: u64 = 1 << 24;

    fn at(index: usize) -> Self {
        let re = index as f32;
        Self::new(re, re + 0.5)
    }
}

impl TestPattern for Complex<i16> {
    const DISTINCT: u64 = 1 << 32;

    fn at(index: usize) -> Self {
        Self::new(index as i16, (index >> 16) as i16)
    }
}

/// Reads from the receiving end of a bounded channel.
///
/// `read` blocks while the producer is behind; once every sender is gone the stream is exhausted.
#[derive(Debug)]
pub struct ChannelSource<E> {
    rx: Receiver<E>,
    consumed: usize,
}

impl<E> ChannelSource<E> {
    pub const fn new(rx: Receiver<E>) -> Self {
        Self { rx, consumed: 0 }
    }
}

impl<E> StreamSource<E> for ChannelSource<E> {
    fn read(&mut self) -> Option<E> {
        let value = self.rx.recv().ok()?;
        self.consumed += 1;
        Some(value)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}

/// A bounded pipe holding at most `depth` in-flight elements.
pub fn pipe<E>(depth: usize) -> (SyncSender<E>, ChannelSource<E>) {
    let (tx, rx) = sync_channel(depth);
    (tx, ChannelSource::new(rx))
}

/// Pushes the first `count` pattern elements in row-major order, returning how many were sent.
///
/// Stops early if the consumer hangs up.
pub fn produce<E: TestPattern>(tx: SyncSender<E>, count: usize) -> usize {
    for index in 0..count {
        if tx.send(E::at(index)).is_err() {
            debug!(sent = index, count, "consumer hung up");
            return index;
        }
    }
    count
}
