//! # Task Management System
//!
//! A discrete-step scheduler for the simulation thread. All world mutation and
//! mesh rebuilding happens on one thread, so instead of a worker pool the
//! manager runs every scheduled task once per tick, in the order they were
//! published.
//!
//! ## Architecture Overview
//! - `TaskManager`: holds the scheduled tasks and runs them on `tick()`
//! - `Task`: a unit of work doing a bounded step each tick
//! - `TaskStatus`: whether a task stays scheduled
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. Every `tick()` calls `Task::process` on each task in publish order
//! 3. Tasks returning `TaskStatus::Done` are dropped after their step
//!
//! ## Example Usage
//! ```rust
//! use dorfdelf::engine_state::task_management::{
//!     task::{Task, TaskStatus},
//!     TaskManager,
//! };
//!
//! struct Countdown(u32);
//!
//! impl Task for Countdown {
//!     fn name(&self) -> &str {
//!         "countdown"
//!     }
//!
//!     fn process(&mut self) -> TaskStatus {
//!         self.0 -= 1;
//!         if self.0 == 0 { TaskStatus::Done } else { TaskStatus::Continue }
//!     }
//! }
//!
//! let mut task_manager = TaskManager::new();
//! task_manager.publish_task(Box::new(Countdown(2)));
//! task_manager.tick();
//! task_manager.tick();
//! assert!(task_manager.is_empty());
//! ```

pub mod task;

use log::debug;
use task::{Task, TaskStatus};

/// Runs scheduled tasks once per tick.
#[derive(Default)]
pub struct TaskManager {
    tasks: Vec<Box<dyn Task>>,
    ticks: u64,
}

impl TaskManager {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        TaskManager::default()
    }

    /// Schedules `task` to run from the next tick on, after every task
    /// published before it.
    pub fn publish_task(&mut self, task: Box<dyn Task>) {
        debug!("Scheduled task {}", task.name());
        self.tasks.push(task);
    }

    /// Runs every scheduled task once and retires the finished ones.
    ///
    /// # Returns
    /// The number of tasks that ran.
    pub fn tick(&mut self) -> usize {
        let ran = self.tasks.len();
        self.tasks.retain_mut(|task| match task.process() {
            TaskStatus::Continue => true,
            TaskStatus::Done => {
                debug!("Task {} finished", task.name());
                false
            }
        });
        self.ticks += 1;
        ran
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StResource;

    struct Recorder {
        id: u32,
        log: StResource<Vec<u32>>,
        runs: u32,
    }

    impl Task for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn process(&mut self) -> TaskStatus {
            self.log.get_mut().push(self.id);
            self.runs -= 1;
            if self.runs == 0 {
                TaskStatus::Done
            } else {
                TaskStatus::Continue
            }
        }
    }

    #[test]
    fn tasks_run_in_publish_order() {
        let log = StResource::new(Vec::new());
        let mut manager = TaskManager::new();
        for id in 0..3 {
            manager.publish_task(Box::new(Recorder {
                id,
                log: log.clone(),
                runs: 2,
            }));
        }

        assert_eq!(manager.tick(), 3);
        assert_eq!(*log.get(), vec![0, 1, 2]);
    }

    #[test]
    fn finished_tasks_are_retired() {
        let log = StResource::new(Vec::new());
        let mut manager = TaskManager::new();
        manager.publish_task(Box::new(Recorder {
            id: 7,
            log: log.clone(),
            runs: 1,
        }));
        manager.publish_task(Box::new(Recorder {
            id: 8,
            log: log.clone(),
            runs: 3,
        }));

        manager.tick();
        assert_eq!(manager.len(), 1);
        manager.tick();
        manager.tick();
        assert!(manager.is_empty());
        assert_eq!(manager.tick(), 0);
        assert_eq!(*log.get(), vec![7, 8, 8, 8]);
        assert_eq!(manager.ticks(), 4);
    }
}
