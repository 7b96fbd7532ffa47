use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunPhase {
    Start = 0,
    ConfigLoaded = 1,
    CollaboratorsReady = 2,
    ArgsResolved = 3,
    CommandResolved = 4,
    Executing = 5,
    Succeeded = 6,
    Failed = 7,
    CleanedUp = 8,
    ConfigSaved = 9,
    Done = 10,
}

impl RunPhase {
    /// Phases that end command execution.
    pub fn is_outcome(self) -> bool {
        matches!(self, RunPhase::Succeeded | RunPhase::Failed)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered record of the phases one run went through.
#[derive(Debug, Clone)]
pub struct PhaseLog {
    history: Vec<RunPhase>,
}

impl PhaseLog {
    pub fn new() -> Self {
        Self {
            history: vec![RunPhase::Start],
        }
    }

    /// Advance to next phase
    pub fn advance(&mut self, phase: RunPhase) {
        tracing::debug!(%phase, "Run phase");
        self.history.push(phase);
    }

    /// Get current phase
    pub fn current(&self) -> RunPhase {
        self.history.last().copied().unwrap_or(RunPhase::Start)
    }

    pub fn history(&self) -> &[RunPhase] {
        &self.history
    }

    /// How many times `phase` was entered.
    pub fn count(&self, phase: RunPhase) -> usize {
        self.history.iter().filter(|p| **p == phase).count()
    }

    pub fn reached(&self, phase: RunPhase) -> bool {
        self.count(phase) > 0
    }
}

impl Default for PhaseLog {
    fn default() -> Self {
        Self::new()
    }
}
