use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tokio::sync::RwLock;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        MongoQuestionDocument, MongoShowDocument, MongoStatusDocument, doc_id, question_key,
    },
};
use crate::dao::{
    models::{QuestionEntity, ShowStatusEntity},
    show_store::ShowStore,
    storage::StorageResult,
};

const SHOW_COLLECTION_NAME: &str = "shows";
const QUESTION_COLLECTION_NAME: &str = "questions";
const STATUS_COLLECTION_NAME: &str = "show_status";

/// Show store backed by three MongoDB collections: shows, questions and statuses.
#[derive(Clone)]
pub struct MongoShowStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    database: RwLock<Database>,
    config: MongoConfig,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = self.database.read().await.clone();

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (_client, database) = establish_connection(&self.config).await?;
        *self.database.write().await = database;
        Ok(())
    }
}

impl MongoShowStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (_client, database) = establish_connection(&config).await?;

        let inner = Arc::new(MongoInner {
            database: RwLock::new(database),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let questions = self.question_collection().await;
        let index = IndexModel::builder()
            .keys(doc! {"show_id": 1, "question_id": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("question_show_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        questions
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: QUESTION_COLLECTION_NAME,
                index: "show_id,question_id",
                source,
            })?;

        Ok(())
    }

    async fn show_collection(&self) -> Collection<MongoShowDocument> {
        let guard = self.inner.database.read().await;
        guard.collection::<MongoShowDocument>(SHOW_COLLECTION_NAME)
    }

    async fn question_collection(&self) -> Collection<MongoQuestionDocument> {
        let guard = self.inner.database.read().await;
        guard.collection::<MongoQuestionDocument>(QUESTION_COLLECTION_NAME)
    }

    async fn status_collection(&self) -> Collection<MongoStatusDocument> {
        let guard = self.inner.database.read().await;
        guard.collection::<MongoStatusDocument>(STATUS_COLLECTION_NAME)
    }

    async fn list_shows(&self) -> MongoResult<Vec<String>> {
        let documents: Vec<MongoShowDocument> = self
            .show_collection()
            .await
            .find(doc! {})
            .sort(doc! {"_id": 1})
            .await
            .map_err(|source| MongoDaoError::ListShows { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListShows { source })?;

        Ok(documents.into_iter().map(|doc| doc.id).collect())
    }

    async fn list_questions(&self, show_id: String) -> MongoResult<Vec<QuestionEntity>> {
        let documents: Vec<MongoQuestionDocument> = self
            .question_collection()
            .await
            .find(doc! {"show_id": show_id.as_str()})
            .sort(doc! {"question_id": 1})
            .await
            .map_err(|source| MongoDaoError::LoadQuestions {
                show_id: show_id.clone(),
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadQuestions {
                show_id: show_id.clone(),
                source,
            })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_status(&self, show_id: String) -> MongoResult<Option<ShowStatusEntity>> {
        let document = self
            .status_collection()
            .await
            .find_one(doc_id(&show_id))
            .await
            .map_err(|source| MongoDaoError::LoadStatus { show_id, source })?;

        Ok(document.map(Into::into))
    }

    async fn save_status(&self, status: ShowStatusEntity) -> MongoResult<()> {
        let show_id = status.show_id.clone();
        let document: MongoStatusDocument = status.into();

        self.status_collection()
            .await
            .replace_one(doc_id(&show_id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveStatus { show_id, source })?;

        Ok(())
    }

    async fn save_show(&self, show_id: String) -> MongoResult<()> {
        let document = MongoShowDocument {
            id: show_id.clone(),
        };

        self.show_collection()
            .await
            .replace_one(doc_id(&show_id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveShow { show_id, source })?;

        Ok(())
    }

    async fn save_question(&self, show_id: String, question: QuestionEntity) -> MongoResult<()> {
        let question_id = question.id.clone();
        let filter = question_key(&show_id, &question_id);
        let document: MongoQuestionDocument = (show_id.clone(), question).into();

        self.question_collection()
            .await
            .replace_one(filter, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveQuestion {
                show_id,
                question_id,
                source,
            })?;

        Ok(())
    }
}

impl ShowStore for MongoShowStore {
    fn backend_name(&self) -> &'static str {
        "mongo"
    }

    fn list_shows(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        Box::pin(async move { store.list_shows().await.map_err(Into::into) })
    }

    fn list_questions(
        &self,
        show_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_questions(show_id).await.map_err(Into::into) })
    }

    fn find_status(
        &self,
        show_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<ShowStatusEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_status(show_id).await.map_err(Into::into) })
    }

    fn save_status(&self, status: ShowStatusEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_status(status).await.map_err(Into::into) })
    }

    fn save_show(&self, show_id: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_show(show_id).await.map_err(Into::into) })
    }

    fn save_question(
        &self,
        show_id: String,
        question: QuestionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .save_question(show_id, question)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.reconnect().await.map_err(Into::into) })
    }
}
