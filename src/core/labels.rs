//! Label maps and a shared, scoped label store
//!
//! `LabelStore` keeps labels that should be attached to every record while
//! they are set (a tenant id for the lifetime of a worker, a correlation id
//! for one request). Its [`LabelStore::accessor`] plugs into the labels
//! accessor of the formatter, so the store is snapshotted per record.

use super::enrichment::GetLabelsFn;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Caller-defined label name to value pairs
pub type Labels = IndexMap<String, String>;

/// Label name synthesized from the tenant id accessor
pub const TENANT_ID_LABEL: &str = "Tenant-Id";
/// Label name synthesized from the correlation id accessor
pub const CORRELATION_ID_LABEL: &str = "Correlation-Id";

/// Thread-safe label store
///
/// # Example
///
/// ```
/// use cloudrun_logger::LabelStore;
///
/// let store = LabelStore::new();
/// store.set("Tenant-Id", "acme");
/// {
///     let _guard = store.scoped("Correlation-Id", "req-42");
///     assert_eq!(store.len(), 2);
/// }
/// // Correlation-Id removed when the guard dropped
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    labels: Arc<RwLock<Labels>>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label, overwriting any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.labels.write().shift_remove(key);
    }

    pub fn clear(&self) {
        self.labels.write().clear();
    }

    /// Copy of the current labels
    pub fn snapshot(&self) -> Labels {
        self.labels.read().clone()
    }

    pub fn len(&self) -> usize {
        self.labels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.read().is_empty()
    }

    /// Set a label for the lifetime of the returned guard
    ///
    /// A value the key held before is put back when the guard drops.
    #[must_use = "the label is reverted as soon as the guard is dropped"]
    pub fn scoped(&self, key: impl Into<String>, value: impl Into<String>) -> LabelGuard {
        let key = key.into();
        let previous = self.labels.write().insert(key.clone(), value.into());
        LabelGuard {
            labels: Arc::clone(&self.labels),
            key,
            previous,
        }
    }

    /// Labels accessor reading this store on every call
    pub fn accessor(&self) -> GetLabelsFn {
        let store = self.clone();
        Arc::new(move || Ok(store.snapshot()))
    }
}

/// RAII guard for a scoped label; dropping it restores the previous value
/// or removes the label if there was none
pub struct LabelGuard {
    labels: Arc<RwLock<Labels>>,
    key: String,
    previous: Option<String>,
}

impl Drop for LabelGuard {
    fn drop(&mut self) {
        let mut labels = self.labels.write();
        match self.previous.take() {
            Some(value) => {
                labels.insert(std::mem::take(&mut self.key), value);
            }
            None => {
                labels.shift_remove(&self.key);
            }
        }
    }
}
