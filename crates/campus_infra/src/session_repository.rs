use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use campus_domain::{Session, SessionRepository};
use tracing::debug;

/// Keeps the session in a single JSON file, `~/.campus/session.json` by
/// default.
pub struct SessionJsonRepository {
    file_path: PathBuf,
}

impl SessionJsonRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
    }

    /// Writes through a temporary file and a rename so a crash never leaves a
    /// half-written session behind.
    async fn write_file(&self, content: String) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;

        // Token is a credential: user read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&temp_path, permissions).await?;
        }

        tokio::fs::rename(&temp_path, &self.file_path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionRepository for SessionJsonRepository {
    async fn get_session(&self) -> anyhow::Result<Option<Session>> {
        let content = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to read {}", self.file_path.display()));
            }
        };

        let session = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(Some(session))
    }

    async fn store_session(&self, session: &Session) -> anyhow::Result<()> {
        debug!(path = %self.file_path.display(), "Writing session");
        self.write_file(serde_json::to_string_pretty(session)?)
            .await
    }

    async fn clear_session(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
