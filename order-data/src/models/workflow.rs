use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::order::Tone;

/// Status of the asynchronous workflow execution attached to an order,
/// as returned by `GET /status/{execution_ref}`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WorkflowExecution {
    pub status: ExecutionState,

    #[serde(default)]
    pub execution_arn: Option<String>,

    #[serde(default)]
    pub execution_name: Option<String>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub stop_date: Option<String>,

    #[serde(default)]
    pub input: Option<Value>,

    #[serde(default)]
    pub output: Option<Value>,
}

/// The five documented execution states, plus a fallback for anything
/// the workflow service may add later.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionState {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
    #[serde(other)]
    Unknown,
}

impl ExecutionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionState::Running => "RUNNING",
            ExecutionState::Succeeded => "SUCCEEDED",
            ExecutionState::Failed => "FAILED",
            ExecutionState::TimedOut => "TIMED_OUT",
            ExecutionState::Aborted => "ABORTED",
            ExecutionState::Unknown => "UNKNOWN",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionState::Running | ExecutionState::Unknown)
    }

    pub fn tone(&self) -> Tone {
        match self {
            ExecutionState::Running => Tone::Info,
            ExecutionState::Succeeded => Tone::Success,
            ExecutionState::Failed => Tone::Danger,
            ExecutionState::TimedOut => Tone::Warning,
            ExecutionState::Aborted => Tone::Dark,
            ExecutionState::Unknown => Tone::Secondary,
        }
    }
}

impl std::fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
