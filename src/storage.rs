//! Storage layer for referral records
//!
//! Keeps the referred-user → referrer mapping in memory and persists it as a
//! single JSON object on disk. Every new record rewrites the whole file.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error during JSON serialization or deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Referred user id → referrer user id.
pub type ReferralMap = HashMap<String, String>;

/// Interface for referral storage providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferralStorage: Send + Sync {
    /// Record `referrer_id` as the inviter of `referred_id`.
    ///
    /// Returns `Ok(false)` without touching storage when `referred_id` already
    /// has a referrer or when both ids are equal.
    async fn record(&self, referred_id: &str, referrer_id: &str) -> Result<bool, StorageError>;
    /// Get the referrer recorded for a user
    async fn referrer_of(&self, user_id: &str) -> Option<String>;
    /// Number of users referred by `user_id`
    async fn count_referrals_by(&self, user_id: &str) -> usize;
    /// Copy of the whole mapping
    async fn snapshot(&self) -> ReferralMap;
}

/// File-backed referral store.
///
/// Mutation and persistence happen under one lock, so concurrent `/start`
/// events cannot overwrite each other's records.
pub struct JsonFileStore {
    path: PathBuf,
    referrals: Mutex<ReferralMap>,
}

impl JsonFileStore {
    /// Load the store from `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let referrals = match load_json::<ReferralMap>(&path).await? {
            Some(map) => {
                info!(
                    "Loaded {} referral record(s) from {}",
                    map.len(),
                    path.display()
                );
                map
            }
            None => {
                info!(
                    "Referral file {} not found, starting empty.",
                    path.display()
                );
                ReferralMap::new()
            }
        };

        Ok(Self {
            path,
            referrals: Mutex::new(referrals),
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReferralStorage for JsonFileStore {
    async fn record(&self, referred_id: &str, referrer_id: &str) -> Result<bool, StorageError> {
        if referred_id == referrer_id {
            debug!("Ignoring self-referral for user {referred_id}");
            return Ok(false);
        }

        let mut referrals = self.referrals.lock().await;
        if referrals.contains_key(referred_id) {
            debug!("User {referred_id} already has a referrer, ignoring {referrer_id}");
            return Ok(false);
        }

        referrals.insert(referred_id.to_string(), referrer_id.to_string());
        if let Err(e) = save_json(&self.path, &*referrals).await {
            // Keep memory consistent with what is on disk.
            referrals.remove(referred_id);
            warn!("Failed to persist referral {referred_id} -> {referrer_id}: {e}");
            return Err(e);
        }

        info!("Recorded referral {referred_id} -> {referrer_id}");
        Ok(true)
    }

    async fn referrer_of(&self, user_id: &str) -> Option<String> {
        self.referrals.lock().await.get(user_id).cloned()
    }

    async fn count_referrals_by(&self, user_id: &str) -> usize {
        self.referrals
            .lock()
            .await
            .values()
            .filter(|referrer| referrer.as_str() == user_id)
            .count()
    }

    async fn snapshot(&self) -> ReferralMap {
        self.referrals.lock().await.clone()
    }
}

/// Write `data` as JSON to `path`, replacing the previous file atomically.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem step fails.
pub async fn save_json<T: serde::Serialize + Sync>(
    path: &Path,
    data: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_string_pretty(data)?;
    let tmp = temp_path(path);

    tokio::fs::write(&tmp, body).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        match tokio::fs::remove_file(&tmp).await {
            Ok(()) => debug!("Removed {} after failed rename", tmp.display()),
            Err(cleanup) => warn!("Failed to remove {}: {cleanup}", tmp.display()),
        }
        return Err(StorageError::Io(e));
    }

    Ok(())
}

/// Sibling file the JSON is written to before being renamed into place.
fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Load JSON from `path`, returning `None` if the file does not exist.
///
/// # Errors
///
/// Returns an error if reading or JSON deserialization fails.
pub async fn load_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::Io(e)),
    }
}
