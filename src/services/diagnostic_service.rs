//! Step by step probe of the storage tiers behind `/diagnostic/storage`.

use std::{future::Future, time::SystemTime};

use indexmap::IndexMap;
use tokio::time::Instant;

use crate::{
    dao::show_store::StorageBackend,
    dto::{
        diagnostic::{DiagnosticReport, DiagnosticStep, OverallStatus, StepStatus},
        format_system_time,
    },
    services::bounded::{BoundedCallError, call_with_timeout},
    state::SharedState,
};

/// Probe the configured backend and the local fallback file.
///
/// Remote steps run even in degraded mode; each one is bounded by the read timeout.
pub async fn diagnose(state: &SharedState) -> DiagnosticReport {
    let mut steps = IndexMap::new();
    let limit = state.config().remote_read_timeout();

    let configured = StorageBackend::from_env();
    steps.insert(
        "backend_config".to_owned(),
        match &configured {
            Ok(backend) => {
                DiagnosticStep::new(StepStatus::Success, format!("backend `{backend}`"))
            }
            Err(err) => DiagnosticStep::new(StepStatus::Error, err.to_string()),
        },
    );

    let store = state.show_store().await;
    let backend = match (&store, &configured) {
        (Some(store), _) => store.backend_name().to_owned(),
        (None, Ok(backend)) => backend.to_string(),
        (None, Err(_)) => "unknown".to_owned(),
    };

    let mut remote_reachable = false;
    match store {
        None => {
            steps.insert(
                "connection".to_owned(),
                DiagnosticStep::new(StepStatus::Error, "no show store connected (degraded mode)"),
            );
            for name in ["ping", "list_shows", "show_questions"] {
                steps.insert(
                    name.to_owned(),
                    DiagnosticStep::new(StepStatus::Skipped, "no show store connected"),
                );
            }
        }
        Some(store) => {
            steps.insert(
                "connection".to_owned(),
                DiagnosticStep::new(StepStatus::Success, format!("connected to {backend}")),
            );

            let (ping, elapsed) =
                timed(call_with_timeout("health_check", limit, store.health_check())).await;
            remote_reachable = ping.is_ok();
            steps.insert(
                "ping".to_owned(),
                outcome_step(ping.map(|()| "pong".to_owned()), elapsed),
            );

            let (shows, elapsed) =
                timed(call_with_timeout("list_shows", limit, store.list_shows())).await;
            let first_show = shows.as_ref().ok().and_then(|shows| shows.first().cloned());
            steps.insert(
                "list_shows".to_owned(),
                outcome_step(shows.map(|shows| format!("{} shows", shows.len())), elapsed),
            );

            let questions_step = match first_show {
                Some(show_id) => {
                    let (questions, elapsed) = timed(call_with_timeout(
                        "list_questions",
                        limit,
                        store.list_questions(show_id.clone()),
                    ))
                    .await;
                    outcome_step(
                        questions.map(|questions| {
                            format!("{} questions for `{show_id}`", questions.len())
                        }),
                        elapsed,
                    )
                }
                None => DiagnosticStep::new(StepStatus::Skipped, "no show to inspect"),
            };
            steps.insert("show_questions".to_owned(), questions_step);
        }
    }

    let local = state.local_store();
    let local_step = match local.read_persisted() {
        Ok(mapping) => DiagnosticStep::new(
            StepStatus::Success,
            format!("{} entries in `{}`", mapping.len(), local.path().display()),
        ),
        Err(err) => DiagnosticStep::new(StepStatus::Warning, err.to_string()),
    };
    steps.insert("local_store".to_owned(), local_step);

    let overall_status = overall(remote_reachable, &steps);
    DiagnosticReport {
        timestamp: format_system_time(SystemTime::now()),
        backend,
        degraded: state.is_degraded(),
        steps,
        overall_status,
    }
}

async fn timed<T>(future: impl Future<Output = T>) -> (T, u64) {
    let started = Instant::now();
    let value = future.await;
    (value, started.elapsed().as_millis() as u64)
}

fn outcome_step(outcome: Result<String, BoundedCallError>, elapsed_ms: u64) -> DiagnosticStep {
    match outcome {
        Ok(message) => DiagnosticStep::new(StepStatus::Success, message),
        Err(err) => DiagnosticStep::new(StepStatus::Error, err.to_string()),
    }
    .timed(elapsed_ms)
}

fn overall(remote_reachable: bool, steps: &IndexMap<String, DiagnosticStep>) -> OverallStatus {
    if !remote_reachable {
        return OverallStatus::Error;
    }
    let all_good = steps
        .values()
        .all(|step| matches!(step.status, StepStatus::Success | StepStatus::Skipped));
    if all_good {
        OverallStatus::Success
    } else {
        OverallStatus::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Behavior, FakeShowStore, question, test_state};

    fn step_names(report: &DiagnosticReport) -> Vec<&str> {
        report.steps.keys().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn healthy_store_reports_success_in_step_order() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1"), question("q2")]);
        let (state, _dir) = test_state(Some(store)).await;

        let report = diagnose(&state).await;

        assert_eq!(
            step_names(&report),
            ["backend_config", "connection", "ping", "list_shows", "show_questions", "local_store"]
        );
        assert_eq!(report.backend, "fake");
        assert_eq!(
            report.steps["show_questions"].message.as_deref(),
            Some("2 questions for `master_chef`")
        );
        assert!(report.steps["ping"].time_ms.is_some());
    }

    #[tokio::test]
    async fn missing_store_is_an_error_with_skipped_remote_steps() {
        let (state, _dir) = test_state(None).await;

        let report = diagnose(&state).await;

        assert_eq!(report.overall_status, OverallStatus::Error);
        assert!(report.degraded);
        assert_eq!(report.steps["connection"].status, StepStatus::Error);
        assert_eq!(report.steps["list_shows"].status, StepStatus::Skipped);
        assert_eq!(report.steps["local_store"].status, StepStatus::Success);
    }

    #[tokio::test]
    async fn failing_store_is_reported_as_error() {
        let store = FakeShowStore::new();
        store.set_behavior(Behavior::Failing);
        let (state, _dir) = test_state(Some(store)).await;

        let report = diagnose(&state).await;

        assert_eq!(report.overall_status, OverallStatus::Error);
        assert_eq!(report.steps["ping"].status, StepStatus::Error);
    }

    #[tokio::test]
    async fn corrupt_local_file_makes_the_report_partial() {
        let (state, _dir) = test_state(Some(FakeShowStore::new())).await;
        std::fs::write(state.local_store().path(), "{not json").unwrap();

        let report = diagnose(&state).await;

        assert_eq!(report.steps["local_store"].status, StepStatus::Warning);
        assert_ne!(report.overall_status, OverallStatus::Success);
    }
}
