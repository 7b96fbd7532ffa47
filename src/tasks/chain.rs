use crate::tasks::{Task, TaskRegistry};

/// A sequence of tasks where each step finishes the previous one.
#[derive(Debug)]
pub struct TaskChain {
    registry: TaskRegistry,
    current: Option<Task>,
}

impl TaskChain {
    pub fn new(registry: TaskRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    /// Succeed the current step and start a new one.
    pub fn next(&mut self, message: impl Into<String>) -> Task {
        if let Some(previous) = self.current.take() {
            previous.succeed();
        }
        let task = self.registry.create(message);
        task.start();
        self.current = Some(task.clone());
        task
    }

    /// Current step, if any.
    pub fn current(&self) -> Option<&Task> {
        self.current.as_ref()
    }

    /// Succeed the current step.
    pub fn end(&mut self) {
        if let Some(task) = self.current.take() {
            task.succeed();
        }
    }

    /// Fail the current step.
    pub fn fail(&mut self) {
        if let Some(task) = self.current.take() {
            task.fail();
        }
    }
}
