//! Asset cache with explicit, tracked release.
//!
//! [`AssetCache`] maps logical keys (e.g. `"main_menu_title"`) to a file under
//! the asset root and hands out a fresh instance every time a key is
//! requested. Every instance stays owned by the cache and is addressed by an
//! [`AssetHandle`]; dropping the instance is what releases the underlying
//! resource (raylib unloads a `Texture2D` on drop).
//!
//! Instances can be released one at a time ([`AssetCache::dispose`]), per key
//! ([`AssetCache::dispose_key`]) or all at once at shutdown
//! ([`AssetCache::dispose_all`]). A disposed key can be requested again and a
//! new instance is loaded.
//!
//! Handles carry the identity of the cache that issued them, so a handle
//! from another cache is never mistaken for one of this cache's instances.
//!
//! Note: the texture cache is stored as a non-send resource because raylib
//! textures belong to the thread owning the GL context.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors returned by [`AssetCache`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("no asset registered under key '{0}'")]
    UnknownKey(String),
    #[error("asset instance {id} of '{key}' is not tracked by this cache")]
    NotTracked { key: String, id: u64 },
    #[error("asset instance {id} of '{key}' was already disposed")]
    AlreadyDisposed { key: String, id: u64 },
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },
}

/// Source of per-cache identities.
static NEXT_CACHE_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies one live instance handed out by an [`AssetCache`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle {
    cache: u64,
    key: String,
    id: u64,
}

impl AssetHandle {
    /// Key the instance was requested under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Produces a new resource instance from a file path.
pub trait AssetLoader<T> {
    fn load(&mut self, path: &Path) -> Result<T, AssetError>;
}

impl<T, F> AssetLoader<T> for F
where
    F: FnMut(&Path) -> Result<T, AssetError>,
{
    fn load(&mut self, path: &Path) -> Result<T, AssetError> {
        self(path)
    }
}

/// Loads textures through the raylib handle.
pub struct RaylibTextureLoader<'a> {
    pub rl: &'a mut RaylibHandle,
    pub thread: &'a RaylibThread,
}

impl AssetLoader<Texture2D> for RaylibTextureLoader<'_> {
    fn load(&mut self, path: &Path) -> Result<Texture2D, AssetError> {
        let path_str = path.to_string_lossy();
        self.rl
            .load_texture(self.thread, &path_str)
            .map_err(|e| AssetError::Load {
                path: path_str.to_string(),
                reason: e.to_string(),
            })
    }
}

struct AssetEntry<T> {
    path: PathBuf,
    live: Vec<(u64, T)>,
}

impl<T> AssetEntry<T> {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            live: Vec::new(),
        }
    }

    fn release_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        count
    }
}

/// Per-key registry of live resource instances.
pub struct AssetCache<T> {
    id: u64,
    root: PathBuf,
    entries: FxHashMap<String, AssetEntry<T>>,
    next_id: u64,
}

/// Cache of raylib textures used by the screens.
pub type TextureCache = AssetCache<Texture2D>;

impl<T> AssetCache<T> {
    /// Create an empty cache resolving paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            id: NEXT_CACHE_ID.fetch_add(1, Ordering::Relaxed),
            root: root.into(),
            entries: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Associate `key` with a file relative to the asset root.
    ///
    /// Re-registering a key only changes where future instances are loaded
    /// from; instances already handed out stay tracked.
    pub fn register(&mut self, key: impl Into<String>, relative_path: impl AsRef<Path>) {
        let path = self.root.join(relative_path);
        let key = key.into();
        debug!("Registering asset '{}' -> {}", key, path.display());
        match self.entries.get_mut(&key) {
            Some(entry) => entry.path = path,
            None => {
                self.entries.insert(key, AssetEntry::new(path));
            }
        }
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Load a new instance of `key` and start tracking it.
    ///
    /// Every call loads a distinct instance, even for the same key.
    pub fn get(
        &mut self,
        key: &str,
        loader: &mut impl AssetLoader<T>,
    ) -> Result<AssetHandle, AssetError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| AssetError::UnknownKey(key.to_string()))?;
        let instance = loader.load(&entry.path)?;
        let id = self.next_id;
        self.next_id += 1;
        entry.live.push((id, instance));
        debug!("Loaded asset '{}' instance {} ({} live)", key, id, entry.live.len());
        Ok(AssetHandle {
            cache: self.id,
            key: key.to_string(),
            id,
        })
    }

    /// Borrow the instance behind `handle`, if it is still live.
    pub fn resolve(&self, handle: &AssetHandle) -> Option<&T> {
        if handle.cache != self.id {
            return None;
        }
        self.entries
            .get(&handle.key)?
            .live
            .iter()
            .find(|(id, _)| *id == handle.id)
            .map(|(_, instance)| instance)
    }

    /// Number of live instances of `key` (zero for unknown keys).
    pub fn tracked_count(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, |e| e.live.len())
    }

    /// Number of live instances across all keys.
    pub fn total_tracked(&self) -> usize {
        self.entries.values().map(|e| e.live.len()).sum()
    }

    /// Release one instance and stop tracking it.
    ///
    /// Other instances of the same key are untouched. Handles issued by
    /// another cache are rejected with [`AssetError::NotTracked`].
    pub fn dispose(&mut self, handle: &AssetHandle) -> Result<(), AssetError> {
        let not_tracked = || AssetError::NotTracked {
            key: handle.key.clone(),
            id: handle.id,
        };
        if handle.cache != self.id {
            return Err(not_tracked());
        }
        let entry = self.entries.get_mut(&handle.key).ok_or_else(not_tracked)?;
        match entry.live.iter().position(|(id, _)| *id == handle.id) {
            Some(index) => {
                let (id, instance) = entry.live.swap_remove(index);
                drop(instance);
                debug!("Disposed asset '{}' instance {}", handle.key, id);
                Ok(())
            }
            // Issued here and no longer live.
            None if handle.id < self.next_id => {
                warn!("Asset '{}' instance {} disposed twice", handle.key, handle.id);
                Err(AssetError::AlreadyDisposed {
                    key: handle.key.clone(),
                    id: handle.id,
                })
            }
            None => Err(not_tracked()),
        }
    }

    /// Release every live instance of `key`. Returns how many were released.
    pub fn dispose_key(&mut self, key: &str) -> Result<usize, AssetError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| AssetError::UnknownKey(key.to_string()))?;
        let released = entry.release_all();
        if released > 0 {
            debug!("Disposed {} instance(s) of asset '{}'", released, key);
        }
        Ok(released)
    }

    /// Release every live instance of every registered key.
    ///
    /// Meant to run once at shutdown, before the graphics context goes away.
    pub fn dispose_all(&mut self) -> usize {
        let released: usize = self.entries.values_mut().map(AssetEntry::release_all).sum();
        info!("Released {} asset instance(s)", released);
        released
    }
}
