use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::steps::Step;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("cargo {step} failed{}", exit_suffix(.code))]
    StepFailed { step: Step, code: Option<i32> },

    #[error("failed to run `{program}` for cargo {step}")]
    Spawn {
        step: Step,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl TidyError {
    /// Process exit code for this error. A failed step passes its own code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }

    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::StepFailed { step, .. } | Self::Spawn { step, .. } => Some(*step),
            Self::Config { .. } => None,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".to_string(),
    }
}
