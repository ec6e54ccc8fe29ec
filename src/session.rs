// Session persistence. The stored credential survives restarts; it is
// written on login, removed on logout, and read once at startup.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ChemvizError;

const SESSION_FILE_NAME: &str = "session.json";

/// An authenticated session. Absent means unauthenticated. The token is the
/// sole credential attached to authorized requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// Trait defining the interface for durable session storage.
pub trait SessionStore {
    /// Read the persisted session, if any. A restored session is trusted
    /// without server validation; the first authorized request validates it.
    fn load(&self) -> Result<Option<Session>, ChemvizError>;

    /// Persist the session so it survives a restart.
    fn save(&mut self, session: &Session) -> Result<(), ChemvizError>;

    /// Remove the persisted session.
    fn clear(&mut self) -> Result<(), ChemvizError>;
}

/// File-based implementation of session storage, one JSON file in the
/// platform config directory.
pub struct FileSessionStore {
    storage_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(storage_path: PathBuf) -> Result<Self, ChemvizError> {
        if !storage_path.exists() {
            fs::create_dir_all(&storage_path)
                .map_err(|e| ChemvizError::SessionIOError { source: e })?;
        }
        Ok(Self { storage_path })
    }

    /// Create storage in the default application config directory.
    pub fn new_default() -> Result<Self, ChemvizError> {
        let storage_path = dirs::config_dir()
            .ok_or(ChemvizError::NoConfigDir)?
            .join("chemviz");
        Self::new(storage_path)
    }

    fn session_file(&self) -> PathBuf {
        self.storage_path.join(SESSION_FILE_NAME)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ChemvizError> {
        let path = self.session_file();
        if !path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&path).map_err(|e| ChemvizError::SessionIOError { source: e })?;
        let session = serde_json::from_str(&content)
            .map_err(|e| ChemvizError::SessionSerializeError { source: e })?;
        Ok(Some(session))
    }

    fn save(&mut self, session: &Session) -> Result<(), ChemvizError> {
        let file = fs::File::create(self.session_file())
            .map_err(|e| ChemvizError::SessionIOError { source: e })?;
        serde_json::to_writer(file, session)
            .map_err(|e| ChemvizError::SessionSerializeError { source: e })
    }

    fn clear(&mut self) -> Result<(), ChemvizError> {
        let path = self.session_file();
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path).map_err(|e| ChemvizError::SessionIOError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("chemviz")).unwrap()
    }

    #[test]
    fn load_without_saved_session_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn saved_session_survives_a_new_store_instance() {
        let dir = TempDir::new().unwrap();
        let session = Session {
            token: "abc".to_string(),
            username: "admin".to_string(),
        };
        store_in(&dir).save(&session).unwrap();

        // a fresh store over the same directory models an app restart
        let restored = store_in(&dir).load().unwrap();
        assert_eq!(restored, Some(session));
    }

    #[test]
    fn clear_removes_the_session() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let session = Session {
            token: "abc".to_string(),
            username: "admin".to_string(),
        };
        store.save(&session).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_without_saved_session_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.clear().is_ok());
    }
}
