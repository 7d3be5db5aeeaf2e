//! Check-in identity storage and the check-in step itself.
//!
//! A session is one [`CheckinInfo`] record. It is written and cleared as a
//! whole; nothing ever patches a single field. A missing or unreadable
//! record means "not checked in".

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use boothlog_client::StaffingApi;
use boothlog_core::models::{normalize_booth_code, CheckinInfo};

use crate::error::{FlowError, SwitchError};

/// Fixed name of the stored session record.
pub const SESSION_KEY: &str = "checkinInfo";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage for the single check-in record of the current session.
pub trait SessionStore: Send + Sync {
    /// The stored identity, or `None` when absent or unreadable.
    fn load(&self) -> Option<CheckinInfo>;

    /// Replace the stored identity.
    fn save(&self, info: &CheckinInfo) -> Result<(), SessionError>;

    /// Forget the stored identity. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-scoped store. The session ends with the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<CheckinInfo>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(info: CheckinInfo) -> Self {
        Self {
            slot: Mutex::new(Some(info)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<CheckinInfo> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, info: &CheckinInfo) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(info.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// Stores the record as `checkinInfo.json` inside a directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never sees a half-written record.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<CheckinInfo> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read session file");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable session");
                None
            }
        }
    }

    fn save(&self, info: &CheckinInfo) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(info)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Flow steps
// ---------------------------------------------------------------------------

/// The stored identity, or [`FlowError::NotCheckedIn`].
pub fn require_checkin(store: &dyn SessionStore) -> Result<CheckinInfo, FlowError> {
    store.load().ok_or(FlowError::NotCheckedIn)
}

/// Validate a booth/personal code pair and, on success, replace the stored
/// session with the resulting identity.
///
/// On any failure the store is left as it was.
pub async fn check_in(
    api: &dyn StaffingApi,
    store: &dyn SessionStore,
    booth_code: &str,
    personal_code: &str,
) -> Result<CheckinInfo, SwitchError> {
    let booth_code = normalize_booth_code(booth_code);
    if booth_code.is_empty() {
        return Err(SwitchError::MissingBoothCode);
    }
    let personal_code = personal_code.trim();
    if personal_code.is_empty() {
        return Err(SwitchError::MissingPersonalCode);
    }

    let validated = match api.validate_checkin(&booth_code, personal_code).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%booth_code, error = %e, "Check-in rejected");
            return Err(e.into());
        }
    };

    let info = CheckinInfo::from_validation(&booth_code, personal_code, &validated);
    store.save(&info)?;
    tracing::info!(
        %booth_code,
        staff = %info.staff_name,
        event_id = %info.event_id,
        "Checked in",
    );
    Ok(info)
}

/// End the session. There is no way back without a new check-in.
pub fn exit(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.clear()?;
    tracing::info!("Session cleared");
    Ok(())
}
