//! JSON-file conversation store.
//!
//! One `<session>.json` file per session under the state directory. Writes
//! go to a temporary sibling file first and are renamed into place, so a
//! reader never sees a half-written state.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ConversationState;
use crate::domain::ports::ConversationStore;

#[derive(Debug, Clone)]
pub struct FileConversationStore {
    dir: PathBuf,
}

impl FileConversationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the state file for `session_id`.
    pub fn path_for(&self, session_id: &str) -> DomainResult<PathBuf> {
        validate_session_id(session_id)?;
        Ok(self.dir.join(format!("{session_id}.json")))
    }
}

fn validate_session_id(session_id: &str) -> DomainResult<()> {
    let valid = !session_id.is_empty()
        && session_id.len() <= 128
        && !session_id.starts_with('.')
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::StoreFailed(format!("invalid session id '{session_id}'")))
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> DomainError {
    DomainError::StoreFailed(format!("failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl ConversationStore for FileConversationStore {
    async fn load(&self, session_id: &str) -> DomainResult<Option<ConversationState>> {
        let path = self.path_for(session_id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", &path, &e)),
        };
        let state = serde_json::from_slice(&bytes)?;
        Ok(Some(state))
    }

    async fn save(&self, session_id: &str, state: &ConversationState) -> DomainResult<()> {
        let path = self.path_for(session_id)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error("create", &self.dir, &e))?;

        let json = serde_json::to_vec_pretty(state)?;
        let tmp = self.dir.join(format!(".{session_id}.json.tmp"));
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| io_error("write", &tmp, &e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error("rename", &tmp, &e))?;

        debug!(session = session_id, path = %path.display(), "conversation state saved");
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> DomainResult<()> {
        let path = self.path_for(session_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &path, &e)),
        }
    }
}
