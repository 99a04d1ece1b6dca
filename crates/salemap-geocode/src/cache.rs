//! Layered pincode → coordinate cache.
//!
//! Two tiers: a process-memory map checked first, and a durable JSON file
//! that survives restarts. The durable file holds a single object mapping
//! pincode to `[lat, lon]`; a missing or corrupt file reads as an empty
//! mapping. Writes go to both tiers, and a durable write failure degrades
//! the entry to session-only caching rather than failing the caller.
//!
//! There is no eviction: unbounded growth is an accepted trade-off at this
//! dataset scale (thousands of pincodes).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use salemap_core::Coordinates;

pub struct CoordinateCache {
    durable_path: Option<PathBuf>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    memory: HashMap<String, Coordinates>,
    durable: HashMap<String, (f64, f64)>,
    durable_loaded: bool,
}

impl CoordinateCache {
    /// Cache backed by a durable JSON file at `path`. The file is read
    /// lazily on the first miss that reaches the durable tier.
    #[must_use]
    pub fn with_durable_path(path: impl Into<PathBuf>) -> Self {
        Self {
            durable_path: Some(path.into()),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Session-only cache with no durable tier. Used in tests and when the
    /// host has no writable storage.
    #[must_use]
    pub fn memory_only() -> Self {
        Self {
            durable_path: None,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Looks up a pincode: memory first, then the durable tier. A durable
    /// hit is promoted into memory.
    pub fn get(&self, pincode: &str) -> Option<Coordinates> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(coords) = inner.memory.get(pincode) {
            return Some(*coords);
        }

        self.ensure_durable_loaded(&mut inner);
        if let Some(&(lat, lon)) = inner.durable.get(pincode) {
            let coords = Coordinates { lat, lon };
            inner.memory.insert(pincode.to_string(), coords);
            return Some(coords);
        }

        None
    }

    /// Writes both tiers. The in-memory write always succeeds; a durable
    /// persist failure is logged and swallowed.
    pub fn set(&self, pincode: &str, coords: Coordinates) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        inner.memory.insert(pincode.to_string(), coords);

        if self.durable_path.is_some() {
            // Load before inserting so the persisted file keeps entries from
            // earlier sessions.
            self.ensure_durable_loaded(&mut inner);
            inner
                .durable
                .insert(pincode.to_string(), (coords.lat, coords.lon));
            self.persist_durable(&inner);
        }
    }

    /// Number of entries currently held in memory.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_durable_loaded(&self, inner: &mut Inner) {
        if inner.durable_loaded {
            return;
        }
        inner.durable_loaded = true;
        let Some(path) = &self.durable_path else {
            return;
        };
        inner.durable = load_durable_map(path);
        tracing::debug!(
            path = %path.display(),
            entries = inner.durable.len(),
            "loaded durable pincode cache"
        );
    }

    fn persist_durable(&self, inner: &Inner) {
        let Some(path) = &self.durable_path else {
            return;
        };
        if let Err(reason) = write_durable_map(path, &inner.durable) {
            tracing::warn!(
                path = %path.display(),
                %reason,
                "durable cache write failed; entry kept in memory only"
            );
        }
    }
}

/// Missing or corrupt files read as an empty mapping, never as an error.
fn load_durable_map(path: &Path) -> HashMap<String, (f64, f64)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&content) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "durable cache file is corrupt; starting empty");
            HashMap::new()
        }
    }
}

fn write_durable_map(path: &Path, map: &HashMap<String, (f64, f64)>) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    let body = serde_json::to_string(map).map_err(|e| e.to_string())?;
    std::fs::write(path, body).map_err(|e| e.to_string())
}
