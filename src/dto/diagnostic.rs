//! Report returned by the storage diagnostic.

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of one diagnostic step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step completed.
    Success,
    /// Step completed with something worth a look.
    Warning,
    /// Step failed.
    Error,
    /// Step not run because an earlier one failed.
    Skipped,
}

/// Result of one step of the storage diagnostic.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiagnosticStep {
    /// Outcome of the step.
    pub status: StepStatus,
    /// Human readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Duration of the step in milliseconds, when timed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
}

impl DiagnosticStep {
    /// Untimed step with a message.
    pub fn new(status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            time_ms: None,
        }
    }

    /// Attach the step duration.
    pub fn timed(mut self, time_ms: u64) -> Self {
        self.time_ms = Some(time_ms);
        self
    }
}

/// Overall verdict of the storage diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Every step succeeded.
    Success,
    /// Some steps failed but the remote store answered.
    Partial,
    /// The remote store could not be reached.
    Error,
}

/// Step by step report of `/diagnostic/storage`, steps in execution order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiagnosticReport {
    /// RFC 3339 time the diagnostic ran.
    pub timestamp: String,
    /// Configured storage backend.
    pub backend: String,
    /// Degraded flag when the diagnostic started.
    pub degraded: bool,
    /// Step results keyed by step name.
    #[schema(value_type = Object)]
    pub steps: IndexMap<String, DiagnosticStep>,
    /// Verdict derived from the steps.
    pub overall_status: OverallStatus,
}
