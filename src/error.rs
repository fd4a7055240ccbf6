use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Step of a property check, reported with internal and resource failures.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Reachability,
    CycleSearch,
    Anchor,
    Prefix,
    Loop,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Reachability => "reachability",
            Phase::CycleSearch => "cycle search",
            Phase::Anchor => "anchor selection",
            Phase::Prefix => "prefix construction",
            Phase::Loop => "loop construction",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Syntax error at {line}:{column}: {message}")]
    Parse { line: usize, column: usize, message: String },

    #[error("Undeclared variable '{0}'")]
    UndeclaredVariable(String),

    #[error("Variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    #[error("Number {0} is not a boolean constant (only 0 and 1 are)")]
    NonBooleanNumber(i64),

    #[error("Unsupported section '{0}'")]
    UnsupportedSection(String),

    #[error("Variable '{name}' has unsupported type '{ty}' (only boolean is supported)")]
    UnsupportedType { name: String, ty: String },

    #[error("'{0}' is not allowed in a state expression")]
    NotAStateExpression(String),

    #[error("Input variable '{0}' is not allowed in a state expression")]
    InputInStateExpression(String),

    #[error("Internal error during {phase}: no {what} in a set that should be non-empty")]
    EmptySample { phase: Phase, what: &'static str },

    #[error("Resource limit exceeded during {phase}: {reason}")]
    ResourceExhausted { phase: Phase, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
