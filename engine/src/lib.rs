//! A streaming matrix transpose built from a pair of ping-pong tile buffers.
//!
//! A row-major element stream is consumed one tile row at a time into the buffer currently
//! designated for filling, while the buffer filled during the previous iteration is drained to
//! output memory in transposed, burst-friendly order.

#![no_std]

extern crate alloc;

pub mod buffer;
pub mod config;
pub mod direct;
pub mod element;
pub mod engine;
pub mod error;
mod join;
pub mod loader;
pub mod mapper;
pub mod memory;
pub mod scheduler;
pub mod store;
pub mod stream;

pub use buffer::{BufferId, PingPongBuffers, TileBuffer};
pub use config::{Dimensions, EngineConfig, RemainderPolicy};
pub use direct::{transpose_direct, transpose_in_memory};
pub use element::{Complex, Element};
pub use engine::{TransposeEngine, TransposeReport};
pub use error::{ConfigError, StoreError, TransposeError};
pub use loader::TileLoader;
pub use mapper::AddressMapper;
pub use memory::OutputMemory;
pub use scheduler::{BandAssignment, PingPongScheduler, SchedulerState, Step};
pub use store::{DrainStats, TileStore};
pub use stream::{IterSource, SliceSource, StreamSource};
