//! Session persistence between CLI invocations.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fleetdash_common::BackendError;
use fleetdash_common::models::Session;
use fleetdash_common::ports::SessionStore;
use tracing::debug;

/// Stores the session as JSON in a single file, readable by the owner only.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Opens `path` for writing, creating it owner-only on unix.
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);

    let file: fs::File = options.open(path)?;
    // mode() only applies on creation; an existing file keeps its bits otherwise.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

fn storage_error(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::Storage(format!("{}: {e}", path.display()))
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, BackendError> {
        let raw: String = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&self.path, e)),
        };

        let session: Session =
            serde_json::from_str(&raw).map_err(|e| storage_error(&self.path, e))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), BackendError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error(dir, e))?;
        }

        let raw: String =
            serde_json::to_string_pretty(session).map_err(|e| storage_error(&self.path, e))?;
        let mut file: fs::File =
            open_private(&self.path).map_err(|e| storage_error(&self.path, e))?;
        file.write_all(raw.as_bytes())
            .map_err(|e| storage_error(&self.path, e))?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), BackendError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&self.path, e)),
        }
    }
}
