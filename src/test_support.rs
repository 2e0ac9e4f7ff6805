//! Fakes shared by the unit tests.

use std::{
    collections::HashMap,
    future, io,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::{
        models::{QuestionEntity, ShowStatusEntity},
        show_store::ShowStore,
        storage::{StorageError, StorageResult},
    },
    state::{AppState, SharedState},
};

/// Remote time limit used by test states.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(50);

/// Directory under the system temp dir, removed on drop.
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("syncplay-{label}-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// How the fake remote store answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Healthy,
    Failing,
    Hanging,
}

/// In-memory [`ShowStore`] whose availability can be switched at runtime.
pub struct FakeShowStore {
    behavior: Mutex<Behavior>,
    questions: Mutex<HashMap<String, Vec<QuestionEntity>>>,
    statuses: Mutex<HashMap<String, ShowStatusEntity>>,
    calls: AtomicUsize,
}

impl FakeShowStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            behavior: Mutex::new(Behavior::Healthy),
            questions: Mutex::new(HashMap::new()),
            statuses: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn set_questions(&self, show_id: &str, questions: Vec<QuestionEntity>) {
        self.questions
            .lock()
            .unwrap()
            .insert(show_id.to_owned(), questions);
    }

    pub fn set_status(&self, show_id: &str, current_question_id: Option<&str>) {
        let status = ShowStatusEntity {
            show_id: show_id.to_owned(),
            current_question_id: current_question_id.map(str::to_owned),
            updated_at: std::time::SystemTime::now(),
        };
        self.statuses
            .lock()
            .unwrap()
            .insert(show_id.to_owned(), status);
    }

    pub fn status_of(&self, show_id: &str) -> Option<ShowStatusEntity> {
        self.statuses.lock().unwrap().get(show_id).cloned()
    }

    /// Number of remote operations issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn behavior(&self) -> Behavior {
        *self.behavior.lock().unwrap()
    }

    fn respond<T: Send + 'static>(&self, value: T) -> BoxFuture<'static, StorageResult<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior() {
            Behavior::Healthy => Box::pin(future::ready(Ok(value))),
            Behavior::Failing => Box::pin(future::ready(Err(StorageError::unavailable(
                "fake store offline".into(),
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            )))),
            Behavior::Hanging => Box::pin(future::pending()),
        }
    }
}

impl ShowStore for FakeShowStore {
    fn backend_name(&self) -> &'static str {
        "fake"
    }

    fn list_shows(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let mut shows: Vec<String> = self.questions.lock().unwrap().keys().cloned().collect();
        shows.sort();
        self.respond(shows)
    }

    fn list_questions(
        &self,
        show_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let questions = self
            .questions
            .lock()
            .unwrap()
            .get(&show_id)
            .cloned()
            .unwrap_or_default();
        self.respond(questions)
    }

    fn find_status(
        &self,
        show_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<ShowStatusEntity>>> {
        let status = self.status_of(&show_id);
        self.respond(status)
    }

    fn save_status(&self, status: ShowStatusEntity) -> BoxFuture<'static, StorageResult<()>> {
        if self.behavior() == Behavior::Healthy {
            self.statuses
                .lock()
                .unwrap()
                .insert(status.show_id.clone(), status);
        }
        self.respond(())
    }

    fn save_show(&self, show_id: String) -> BoxFuture<'static, StorageResult<()>> {
        if self.behavior() == Behavior::Healthy {
            self.questions.lock().unwrap().entry(show_id).or_default();
        }
        self.respond(())
    }

    fn save_question(
        &self,
        show_id: String,
        question: QuestionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        if self.behavior() == Behavior::Healthy {
            self.questions
                .lock()
                .unwrap()
                .entry(show_id)
                .or_default()
                .push(question);
        }
        self.respond(())
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.respond(())
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.respond(())
    }
}

/// Build a question with predictable content.
pub fn question(id: &str) -> QuestionEntity {
    QuestionEntity {
        id: id.to_owned(),
        text: format!("Question {id}?"),
        options: vec!["yes".into(), "no".into()],
        correct: "yes".into(),
    }
}

/// State with short remote timeouts and a private local store file.
///
/// The returned [`TempDir`] must outlive the state.
pub async fn test_state(store: Option<Arc<FakeShowStore>>) -> (SharedState, TempDir) {
    let dir = TempDir::new("state");
    let config = AppConfig::default()
        .with_local_store_path(dir.path().join("active_questions.json"))
        .with_remote_timeouts(TEST_TIMEOUT, TEST_TIMEOUT, TEST_TIMEOUT);
    let state = AppState::new(config, None);
    if let Some(store) = store {
        state.install_show_store(store).await;
    }
    (state, dir)
}
