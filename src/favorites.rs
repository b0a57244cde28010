//! Client-owned favorite complexes.
//!
//! The set lives with the client. Nothing here is shared between server
//! requests; the CLI loads it, applies one operation and saves it back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Name of the persisted favorites document
pub const FAVORITES_DOCUMENT: &str = "apt-favorites";

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Apartment ids in the order they were added, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSet {
    favorites: Vec<i32>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I: IntoIterator<Item = i32>>(ids: I) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.add(id);
        }
        set
    }

    pub fn ids(&self) -> &[i32] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn contains(&self, apt_id: i32) -> bool {
        self.favorites.contains(&apt_id)
    }

    /// Returns `false` when the id was already present
    pub fn add(&mut self, apt_id: i32) -> bool {
        if self.contains(apt_id) {
            return false;
        }
        self.favorites.push(apt_id);
        true
    }

    /// Returns `false` when the id was not present
    pub fn remove(&mut self, apt_id: i32) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|id| *id != apt_id);
        before != self.favorites.len()
    }

    /// Flips membership and returns whether the id is now a favorite
    pub fn toggle(&mut self, apt_id: i32) -> bool {
        if self.remove(apt_id) {
            false
        } else {
            self.add(apt_id)
        }
    }
}

/// On-disk shape: `{"state":{"favorites":[...]},"version":0}`
#[derive(Debug, Serialize, Deserialize)]
struct FavoritesDocument {
    state: FavoriteSet,
    #[serde(default)]
    version: u32,
}

#[async_trait::async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn load(&self) -> Result<FavoriteSet, FavoritesError>;
    async fn save(&self, favorites: &FavoriteSet) -> Result<(), FavoritesError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFavoriteStore {
    inner: Arc<RwLock<FavoriteSet>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn load(&self) -> Result<FavoriteSet, FavoritesError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, favorites: &FavoriteSet) -> Result<(), FavoritesError> {
        *self.inner.write().await = favorites.clone();
        Ok(())
    }
}

/// Favorites persisted as a JSON document. A missing file is an empty set.
#[derive(Debug, Clone)]
pub struct JsonFileFavoriteStore {
    path: PathBuf,
}

impl JsonFileFavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is staged in before it replaces the document
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FAVORITES_DOCUMENT.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl FavoriteStore for JsonFileFavoriteStore {
    async fn load(&self) -> Result<FavoriteSet, FavoritesError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No favorites file yet");
                return Ok(FavoriteSet::new());
            }
            Err(e) => return Err(e.into()),
        };
        let doc: FavoritesDocument = serde_json::from_slice(&raw)?;
        // Hand-edited files may repeat ids
        Ok(FavoriteSet::from_ids(doc.state.favorites))
    }

    async fn save(&self, favorites: &FavoriteSet) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let doc = FavoritesDocument {
            state: favorites.clone(),
            version: 0,
        };
        let body = serde_json::to_vec_pretty(&doc)?;

        // Readers only ever see the old document or the complete new one
        let staging = self.staging_path();
        tokio::fs::write(&staging, body).await?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        debug!(path = %self.path.display(), count = favorites.len(), "Saved favorites");
        Ok(())
    }
}
