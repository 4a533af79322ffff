use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info};

use crate::config::FmtConfig;
use crate::error::TidyError;
use crate::runner::{CommandRunner, Invocation};
use crate::snapshot::Snapshot;
use crate::steps::Step;

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub command: String,
    /// `None` for dry runs and for processes killed by a signal.
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    /// `.rs` files that differ after this step, relative to the root.
    pub changed_files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub dry_run: bool,
    pub steps: Vec<StepOutcome>,
    pub failed_step: Option<Step>,
    pub error: Option<String>,
    #[serde(skip)]
    failure: Option<TidyError>,
}

impl RunReport {
    fn new(dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            steps: Vec::new(),
            failed_step: None,
            error: None,
            failure: None,
        }
    }

    fn fail(&mut self, err: TidyError) {
        self.success = false;
        self.failed_step = err.step();
        self.error = Some(err.to_string());
        self.failure = Some(err);
    }

    pub const fn failure(&self) -> Option<&TidyError> {
        self.failure.as_ref()
    }

    pub fn exit_code(&self) -> i32 {
        self.failure.as_ref().map_or(0, TidyError::exit_code)
    }

    pub fn into_result(self) -> Result<Self, TidyError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Every file touched by any step, deduplicated, in step order.
    pub fn changed_files(&self) -> Vec<&PathBuf> {
        let mut seen = Vec::new();
        for path in self.steps.iter().flat_map(|s| &s.changed_files) {
            if !seen.contains(&path) {
                seen.push(path);
            }
        }
        seen
    }
}

pub fn invocation(config: &FmtConfig, step: Step) -> Invocation {
    Invocation {
        program: config.cargo.clone(),
        args: step.args(config.flags),
        workdir: config.root.clone(),
    }
}

/// Run clippy --fix, cargo fix and cargo fmt in that order, stopping at the first failure.
pub fn run(config: &FmtConfig, runner: &mut impl CommandRunner) -> RunReport {
    let mut report = RunReport::new(config.dry_run);

    if config.dry_run {
        for step in Step::ALL {
            let inv = invocation(config, step);
            if !config.json {
                println!("{}", inv.command_line());
            }
            report.steps.push(StepOutcome {
                step,
                command: inv.command_line(),
                exit_code: None,
                duration_ms: 0,
                changed_files: Vec::new(),
            });
        }
        return report;
    }

    let mut before = Snapshot::capture(&config.root);
    info!(files = before.len(), root = %config.root.display(), "captured source snapshot");

    for step in Step::ALL {
        let inv = invocation(config, step);
        if !config.json {
            println!("Running {step}...");
        }
        info!(command = %inv.command_line(), "running {step}");

        let started = Instant::now();
        let status = match runner.run(&inv) {
            Ok(status) => status,
            Err(source) => {
                error!("failed to run `{}` for cargo {step}: {source}", inv.program);
                report.fail(TidyError::Spawn { step, program: inv.program.clone(), source });
                return report;
            }
        };
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let after = Snapshot::capture(&config.root);
        let changed_files = before.changed_files(&after);
        for path in &changed_files {
            info!("{step} changed {}", path.display());
        }
        before = after;

        report.steps.push(StepOutcome {
            step,
            command: inv.command_line(),
            exit_code: status.code,
            duration_ms,
            changed_files,
        });

        if !status.success() {
            let err = TidyError::StepFailed { step, code: status.code };
            error!("{err}");
            report.fail(err);
            return report;
        }
    }

    if !config.json {
        println!("Done.");
    }
    report
}
