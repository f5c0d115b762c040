//! The ping-pong control loop.
//!
//! A depth-one software pipeline over tile rows: iteration `t` fills tile row `t` into one buffer
//! while tile row `t - 1`, filled during the previous iteration, drains from the other. The first
//! iteration only fills, the last only drains, and the buffer roles swap after every iteration.

use crate::buffer::BufferId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// Iteration `t` has been handed out.
    Running(usize),
    Done,
}

/// A tile row bound to the buffer it occupies during one iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BandAssignment {
    pub row_block: usize,
    pub buffer: BufferId,
}

/// The work of one scheduler iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub iteration: usize,
    /// Buffer designated for filling this iteration; the other one drains.
    pub filling: BufferId,
    pub fill_row_block: Option<usize>,
    pub drain_row_block: Option<usize>,
}

impl Step {
    #[must_use]
    pub const fn draining(&self) -> BufferId {
        self.filling.other()
    }

    #[must_use]
    pub fn fill(&self) -> Option<BandAssignment> {
        self.fill_row_block.map(|row_block| BandAssignment {
            row_block,
            buffer: self.filling,
        })
    }

    #[must_use]
    pub fn drain(&self) -> Option<BandAssignment> {
        self.drain_row_block.map(|row_block| BandAssignment {
            row_block,
            buffer: self.draining(),
        })
    }
}

/// Hands out the [`Step`]s of one run, `total_bands + 1` of them.
#[derive(Clone, Debug)]
pub struct PingPongScheduler {
    total_bands: usize,
    filling: BufferId,
    state: SchedulerState,
}

impl PingPongScheduler {
    #[must_use]
    pub const fn new(total_bands: usize) -> Self {
        Self {
            total_bands,
            filling: BufferId::Ping,
            state: SchedulerState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Iterations of a complete run: one per tile row plus the final drain.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.total_bands + 1
    }

    const fn remaining(&self) -> usize {
        match self.state {
            SchedulerState::Idle => self.iterations(),
            SchedulerState::Running(t) => self.total_bands - t,
            SchedulerState::Done => 0,
        }
    }
}

impl Iterator for PingPongScheduler {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let iteration = match self.state {
            SchedulerState::Idle => 0,
            SchedulerState::Running(t) if t < self.total_bands => t + 1,
            SchedulerState::Running(_) | SchedulerState::Done => {
                self.state = SchedulerState::Done;
                return None;
            }
        };
        let step = Step {
            iteration,
            filling: self.filling,
            fill_row_block: (iteration < self.total_bands).then_some(iteration),
            drain_row_block: iteration.checked_sub(1),
        };
        self.filling = self.filling.other();
        self.state = SchedulerState::Running(iteration);
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PingPongScheduler {}
