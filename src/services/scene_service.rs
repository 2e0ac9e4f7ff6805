use serde_json::Value;
use tracing::warn;

use crate::{error::ServiceError, state::SharedState};

/// First scene listed in the scenes file.
pub async fn exclusive_scene(state: &SharedState) -> Result<Value, ServiceError> {
    let path = state.config().scenes_path();
    let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
        warn!(path = %path.display(), error = %err, "failed to read scenes file");
        ServiceError::Internal(format!("failed to read scenes: {err}"))
    })?;

    let scenes: Vec<Value> = serde_json::from_str(&contents).map_err(|err| {
        warn!(path = %path.display(), error = %err, "scenes file is not a JSON array");
        ServiceError::Internal(format!("failed to parse scenes: {err}"))
    })?;

    scenes
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Internal("scenes file is empty".into()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{config::AppConfig, state::AppState, test_support::TempDir};

    fn state_with_scenes(dir: &TempDir, contents: Option<&str>) -> SharedState {
        let path = dir.path().join("scenes.json");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        let config = AppConfig::default()
            .with_local_store_path(dir.path().join("active.json"))
            .with_scenes_path(path);
        AppState::new(config, None)
    }

    #[tokio::test]
    async fn returns_first_scene() {
        let dir = TempDir::new("scenes");
        let state = state_with_scenes(
            &dir,
            Some(r#"[{"id": "s1", "title": "Opening"}, {"id": "s2"}]"#),
        );

        let scene = exclusive_scene(&state).await.unwrap();

        assert_eq!(scene, json!({"id": "s1", "title": "Opening"}));
    }

    #[tokio::test]
    async fn missing_or_invalid_file_is_internal_error() {
        let dir = TempDir::new("scenes");
        let missing = state_with_scenes(&dir, None);
        assert!(matches!(
            exclusive_scene(&missing).await,
            Err(ServiceError::Internal(_))
        ));

        let empty = state_with_scenes(&dir, Some("[]"));
        assert!(matches!(
            exclusive_scene(&empty).await,
            Err(ServiceError::Internal(_))
        ));

        let object = state_with_scenes(&dir, Some(r#"{"id": "s1"}"#));
        assert!(matches!(
            exclusive_scene(&object).await,
            Err(ServiceError::Internal(_))
        ));
    }
}
