//! Progress reporting for roster imports
//!
//! Provides a simple API for displaying application state:
//! - Current phase (Retrieving, Normalizing, Computing, Persisting)
//! - Info line (source, batch id)
//! - Activity log

/// Application phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Retrieving,
    Normalizing,
    Computing,
    Persisting,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Retrieving => write!(f, "Retrieving roster"),
            Phase::Normalizing => write!(f, "Normalizing columns"),
            Phase::Computing => write!(f, "Computing type matchups"),
            Phase::Persisting => write!(f, "Storing batch"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - allows both console output and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn log(&mut self, message: impl Into<String>);
}

/// Prints phases and log lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleUi {
    phase: Option<Phase>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        if self.phase != Some(phase) {
            println!("==> {}", phase);
            self.phase = Some(phase);
        }
    }

    fn set_info(&mut self, info: impl Into<String>) {
        println!("    {}", info.into());
    }

    fn log(&mut self, message: impl Into<String>) {
        println!("  - {}", message.into());
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn log(&mut self, _message: impl Into<String>) {}
}

/// Records every call, for asserting on the reported progress
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub phases: Vec<Phase>,
    pub messages: Vec<String>,
}

impl Ui for RecordingUi {
    fn set_phase(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.messages.push(info.into());
    }

    fn log(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}
