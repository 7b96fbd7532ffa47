use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Lifecycle state of a [`Task`].
///
/// `Idle → Running → (Succeeded | Failed) → Cleared`; `Cleared` is reachable
/// from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Succeeded,
    Failed,
    Cleared,
}

/// How a task finished, kept after it is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed,
}

/// Progress counter for long-running work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub done: u64,
    pub total: u64,
}

/// Handle to one tracked unit of long-running work.
///
/// Cheap to clone; all clones share state. Only the task's owner drives
/// `start`/`succeed`/`fail`; clearing belongs to the registry.
#[derive(Clone)]
pub struct Task {
    inner: Arc<Mutex<TaskInner>>,
}

struct TaskInner {
    id: Uuid,
    message: String,
    state: TaskState,
    outcome: Option<TaskOutcome>,
    progress: Option<TaskProgress>,
    /// Background work owned by the task, aborted on clear.
    work: Vec<AbortHandle>,
    on_clear: Vec<Box<dyn FnOnce() + Send>>,
}

impl Task {
    /// Create an idle task. It is not tracked until registered.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TaskInner {
                id: Uuid::new_v4(),
                message: message.into(),
                state: TaskState::Idle,
                outcome: None,
                progress: None,
                work: Vec::new(),
                on_clear: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.lock().id
    }

    pub fn message(&self) -> String {
        self.inner.lock().message.clone()
    }

    pub fn state(&self) -> TaskState {
        self.inner.lock().state
    }

    pub fn outcome(&self) -> Option<TaskOutcome> {
        self.inner.lock().outcome
    }

    pub fn progress(&self) -> Option<TaskProgress> {
        self.inner.lock().progress
    }

    pub fn is_running(&self) -> bool {
        self.state() == TaskState::Running
    }

    /// Idle → Running. Any other state is left alone.
    pub fn start(&self) -> &Self {
        let mut inner = self.inner.lock();
        if inner.state == TaskState::Idle {
            inner.state = TaskState::Running;
            tracing::debug!(task = %inner.id, message = %inner.message, "Task started");
        }
        self
    }

    /// Update the message shown for this task.
    pub fn msg(&self, message: impl Into<String>) -> &Self {
        self.inner.lock().message = message.into();
        self
    }

    pub fn set_progress(&self, done: u64, total: u64) -> &Self {
        self.inner.lock().progress = Some(TaskProgress { done, total });
        self
    }

    /// Attach background work; it is aborted when the task is cleared.
    pub fn track(&self, work: AbortHandle) -> &Self {
        let mut inner = self.inner.lock();
        if inner.state == TaskState::Cleared {
            work.abort();
        } else {
            inner.work.push(work);
        }
        self
    }

    /// Run `hook` once when the task is cleared, or right away if it already is.
    ///
    /// Hooks run after the task's lock is released and may inspect the task.
    pub fn on_clear(&self, hook: impl FnOnce() + Send + 'static) -> &Self {
        let mut inner = self.inner.lock();
        if inner.state == TaskState::Cleared {
            drop(inner);
            hook();
        } else {
            inner.on_clear.push(Box::new(hook));
        }
        self
    }

    /// Running → Succeeded.
    pub fn succeed(&self) -> &Self {
        self.finish(TaskOutcome::Succeeded);
        self
    }

    /// Running → Failed.
    pub fn fail(&self) -> &Self {
        self.finish(TaskOutcome::Failed);
        self
    }

    fn finish(&self, outcome: TaskOutcome) {
        let mut inner = self.inner.lock();
        if inner.state != TaskState::Running {
            return;
        }
        inner.state = match outcome {
            TaskOutcome::Succeeded => TaskState::Succeeded,
            TaskOutcome::Failed => TaskState::Failed,
        };
        inner.outcome = Some(outcome);
        tracing::debug!(task = %inner.id, ?outcome, "Task finished");
    }

    /// Any state → Cleared, releasing tracked work. No-op when already cleared.
    pub(crate) fn clear(&self) {
        let hooks = {
            let mut inner = self.inner.lock();
            if inner.state == TaskState::Cleared {
                return;
            }
            for work in inner.work.drain(..) {
                work.abort();
            }
            inner.state = TaskState::Cleared;
            inner.progress = None;
            std::mem::take(&mut inner.on_clear)
        };
        for hook in hooks {
            hook();
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Task")
            .field("id", &inner.id)
            .field("message", &inner.message)
            .field("state", &inner.state)
            .field("outcome", &inner.outcome)
            .finish()
    }
}
