//! Task tracking for long-running work started by commands.
//!
//! Commands create tasks through the [`TaskRegistry`] handed to them in the
//! execution context. When the command returns (or fails, or panics) the
//! orchestrator calls [`TaskRegistry::cleanup_all`] once: anything still
//! running is marked failed, then every task is cleared.

mod chain;
mod task;

use std::sync::Arc;

use parking_lot::Mutex;

pub use chain::TaskChain;
pub use task::{Task, TaskOutcome, TaskProgress, TaskState};

/// Ordered set of every task created during one invocation.
///
/// Constructor-injected rather than global; clones share the same set.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a task. Registering the same task twice keeps one entry.
    pub fn register(&self, task: Task) {
        let mut tasks = self.tasks.lock();
        if !tasks.iter().any(|t| t.id() == task.id()) {
            tasks.push(task);
        }
    }

    pub fn register_all(&self, tasks: impl IntoIterator<Item = Task>) {
        for task in tasks {
            self.register(task);
        }
    }

    /// Create and register an idle task.
    pub fn create(&self, message: impl Into<String>) -> Task {
        let task = Task::new(message);
        self.register(task.clone());
        task
    }

    /// Snapshot of registered tasks in insertion order.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Force-fail running tasks, then clear every task, in insertion order.
    pub fn cleanup_all(&self) {
        // Snapshot first so task locks are never taken under the registry lock
        let tasks = self.tasks();

        for task in &tasks {
            if task.is_running() {
                tracing::warn!(
                    task = %task.id(),
                    message = %task.message(),
                    "Task still running at exit, marking failed"
                );
                task.fail();
            }
            task.clear();
        }

        tracing::debug!(count = tasks.len(), "Tasks cleaned up");
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.tasks.lock().len())
            .finish()
    }
}
