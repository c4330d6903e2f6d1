//! Cart persistence
//!
//! The cart is client-local state: it is saved after every mutation and
//! restored on start-up, never synced to the backend before checkout.
//! Concurrent writers (two processes on one file) race; last write wins.

use super::CartState;
use shared::error::{AppError, AppResult};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait CartStorage: Debug + Send + Sync {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> AppResult<Option<CartState>>;
    fn save(&self, state: &CartState) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// JSON file storage
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> AppResult<Option<CartState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)
            .map_err(|e| AppError::storage(format!("Failed to read cart: {e}")))?;
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| AppError::storage(format!("Stored cart is unreadable: {e}")))
    }

    fn save(&self, state: &CartState) -> AppResult<()> {
        self.ensure_dir()
            .map_err(|e| AppError::storage(format!("Failed to create cart dir: {e}")))?;
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| AppError::storage(format!("Failed to encode cart: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::storage(format!("Failed to write cart: {e}")))
    }

    fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| AppError::storage(format!("Failed to delete cart: {e}")))?;
        }
        Ok(())
    }
}

/// Non-persistent storage for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    state: Mutex<Option<CartState>>,
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> AppResult<Option<CartState>> {
        let guard = self
            .state
            .lock()
            .map_err(|_| AppError::storage("Cart storage lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &CartState) -> AppResult<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| AppError::storage("Cart storage lock poisoned"))?;
        *guard = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| AppError::storage("Cart storage lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
