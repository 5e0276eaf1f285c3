//! # Task System Core Traits
//!
//! This module defines the unit of work the cooperative scheduler runs.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called once per tick, on the simulation
//!    thread, in publish order
//! 3. The task reports whether it wants to run again
//! 4. Tasks reporting `TaskStatus::Done` are dropped from the schedule
//!
//! ## Budget
//! `process()` must finish within one tick: it may not block and should do a
//! bounded amount of work, typically one chunk rebuild.

/// What a task wants after running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Run again next tick.
    Continue,
    /// Remove the task from the schedule.
    Done,
}

/// A unit of work run by the `TaskManager`.
///
/// Tasks own handles to the state they work on (usually `StResource`s shared
/// with the engine state) rather than borrowing it.
pub trait Task {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Runs one bounded step of the task.
    fn process(&mut self) -> TaskStatus;
}
