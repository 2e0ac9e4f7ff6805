//! Upsert shows and their question catalogs into the configured remote show store.
//!
//! Usage: `seed-catalog [path]`, reading `data/seed_catalog.json` by default. The file maps
//! show identifiers to arrays of questions.

use std::{env, fs};

use anyhow::Context;
use indexmap::IndexMap;
use syncplay_back::{
    config::AppConfig,
    dao::{
        models::QuestionEntity,
        show_store::{self, StorageBackend},
    },
};
use tracing::info;

const DEFAULT_SEED_PATH: &str = "data/seed_catalog.json";

type SeedCatalog = IndexMap<String, Vec<QuestionEntity>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SEED_PATH.to_owned());
    let contents = fs::read_to_string(&path).with_context(|| format!("reading `{path}`"))?;
    let catalog: SeedCatalog =
        serde_json::from_str(&contents).with_context(|| format!("parsing `{path}`"))?;

    let backend = StorageBackend::from_env().context("selecting storage backend")?;
    let timeouts = AppConfig::load().store_timeouts();
    let store = show_store::connect(backend, timeouts)
        .await
        .with_context(|| format!("connecting to {backend}"))?;

    for (show_id, questions) in catalog {
        store
            .save_show(show_id.clone())
            .await
            .with_context(|| format!("saving show `{show_id}`"))?;
        let count = questions.len();
        for question in questions {
            let question_id = question.id.clone();
            store
                .save_question(show_id.clone(), question)
                .await
                .with_context(|| format!("saving question `{question_id}` of `{show_id}`"))?;
        }
        info!(show_id = %show_id, count, "show seeded");
    }

    Ok(())
}
