use std::fmt;

use serde::Serialize;

/// One stage of `cargo tidy fmt`, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    LintFix,
    CompilerFix,
    Format,
}

/// Options that change the argument vectors. Everything else is fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepFlags {
    pub pedantic: bool,
    pub allow_no_vcs: bool,
}

impl Step {
    pub const ALL: [Self; 3] = [Self::LintFix, Self::CompilerFix, Self::Format];

    pub const fn name(self) -> &'static str {
        match self {
            Self::LintFix => "clippy --fix",
            Self::CompilerFix => "fix",
            Self::Format => "fmt",
        }
    }

    /// Arguments passed to cargo for this step.
    pub fn args(self, flags: StepFlags) -> Vec<String> {
        let mut args: Vec<&str> = match self {
            Self::LintFix => vec!["clippy", "--fix", "--allow-dirty"],
            Self::CompilerFix => vec!["fix", "--allow-dirty"],
            Self::Format => return vec!["fmt".to_string()],
        };

        if flags.allow_no_vcs {
            args.push("--allow-no-vcs");
        }

        if self == Self::LintFix {
            args.extend(["--all-targets", "--all-features", "--", "-D", "warnings"]);
            args.extend(["-W", "clippy::nursery"]);
            if flags.pedantic {
                args.extend(["-W", "clippy::pedantic"]);
            }
        }

        args.into_iter().map(String::from).collect()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
