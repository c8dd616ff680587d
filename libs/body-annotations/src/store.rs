//! # Annotation Store
//!
//! Key-value access to the body annotation service and the bookmark import
//! built on it.
//!
//! The store holds named data instances, each a sorted map of string keys to
//! byte values. Bookmarks are imported from the document under
//! [`BODY_SYNAPSES_KEY`] in [`BODY_ANNOTATION_DATA`], then each body's name
//! and status are overlaid from its record in [`BODY_RECORD_DATA`].

use std::collections::BTreeMap;

use config::constants::{BODY_ANNOTATION_DATA, BODY_RECORD_DATA, BODY_SYNAPSES_KEY};
use serde_json::Value;

use crate::bookmark::{parse_value, Bookmark};
use crate::error::{AnnotationError, AnnotationResult};
use crate::loader::CancelToken;

/// Read access to an annotation key-value service.
pub trait AnnotationStore {
    /// Whether a data instance called `data` exists.
    fn has_data(&self, data: &str) -> AnnotationResult<bool>;

    /// Keys of `data` in the inclusive range `start..=end`, in sorted order.
    fn read_keys(&self, data: &str, start: &str, end: &str) -> AnnotationResult<Vec<String>>;

    /// Value stored under `key` in `data`.
    fn read_key_value(&self, data: &str, key: &str) -> AnnotationResult<Vec<u8>>;
}

/// In-memory [`AnnotationStore`].
///
/// # Example
///
/// ```rust
/// use body_annotations::store::{AnnotationStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.insert("annotations", "a", b"1".to_vec());
/// store.insert("annotations", "c", b"3".to_vec());
/// assert_eq!(store.read_keys("annotations", "a", "b").unwrap(), vec!["a".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty data instance if it does not exist yet.
    pub fn create_data(&mut self, data: &str) {
        self.data.entry(data.to_string()).or_default();
    }

    /// Stores `value` under `key` in `data`, creating the instance if needed.
    pub fn insert(&mut self, data: &str, key: &str, value: impl Into<Vec<u8>>) {
        self.data
            .entry(data.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    fn instance(&self, data: &str) -> AnnotationResult<&BTreeMap<String, Vec<u8>>> {
        self.data
            .get(data)
            .ok_or_else(|| AnnotationError::MissingData(data.to_string()))
    }
}

impl AnnotationStore for MemoryStore {
    fn has_data(&self, data: &str) -> AnnotationResult<bool> {
        Ok(self.data.contains_key(data))
    }

    fn read_keys(&self, data: &str, start: &str, end: &str) -> AnnotationResult<Vec<String>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self
            .instance(data)?
            .range::<str, _>((std::ops::Bound::Included(start), std::ops::Bound::Included(end)))
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn read_key_value(&self, data: &str, key: &str) -> AnnotationResult<Vec<u8>> {
        self.instance(data)?
            .get(key)
            .cloned()
            .ok_or_else(|| AnnotationError::missing_key(data, key))
    }
}

/// Imports the bookmark document held by `store`.
///
/// # Errors
///
/// Fails when the annotation instance or the bookmark key is missing, when
/// the document does not validate, or when the store reports an error.
/// Unreadable per-body records are skipped with a warning.
pub fn import_bookmarks<S: AnnotationStore + ?Sized>(store: &S) -> AnnotationResult<Vec<Bookmark>> {
    import_bookmarks_cancellable(store, &CancelToken::new())
}

/// [`import_bookmarks`] that stops with [`AnnotationError::Cancelled`] once
/// `token` is cancelled.
pub fn import_bookmarks_cancellable<S: AnnotationStore + ?Sized>(
    store: &S,
    token: &CancelToken,
) -> AnnotationResult<Vec<Bookmark>> {
    if !store.has_data(BODY_ANNOTATION_DATA)? {
        return Err(AnnotationError::MissingData(BODY_ANNOTATION_DATA.to_string()));
    }
    if store
        .read_keys(BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY, BODY_SYNAPSES_KEY)?
        .is_empty()
    {
        return Err(AnnotationError::missing_key(BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY));
    }

    let bytes = store.read_key_value(BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY)?;
    let document: Value = serde_json::from_slice(&bytes)?;
    let mut bookmarks = parse_value(&document)?;

    if !store.has_data(BODY_RECORD_DATA)? {
        log::debug!("no '{BODY_RECORD_DATA}' instance, skipping body records");
        return Ok(bookmarks);
    }
    for bookmark in &mut bookmarks {
        if token.is_cancelled() {
            return Err(AnnotationError::Cancelled);
        }
        overlay_body_record(store, bookmark)?;
    }

    log::debug!("imported {} bookmarks", bookmarks.len());
    Ok(bookmarks)
}

/// Copies a non-empty `name` and `status` from the body's record.
fn overlay_body_record<S: AnnotationStore + ?Sized>(
    store: &S,
    bookmark: &mut Bookmark,
) -> AnnotationResult<()> {
    let key = bookmark.body_id.to_string();
    if store.read_keys(BODY_RECORD_DATA, &key, &key)?.is_empty() {
        return Ok(());
    }
    let bytes = store.read_key_value(BODY_RECORD_DATA, &key)?;
    let record: Value = match serde_json::from_slice(&bytes) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("skipping unreadable record for body {key}: {err}");
            return Ok(());
        }
    };

    let text = |field: &str| {
        record
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    if let Some(status) = text("status") {
        bookmark.status = Some(status);
    }
    if let Some(name) = text("name") {
        bookmark.name = Some(name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        let document = json!({
            "metadata": { "description": "bookmarks" },
            "data": [
                { "body ID": 1, "name": "old", "body T-bars": 5, "body status": "orphan" },
                { "body ID": 2, "body T-bars": 9 },
                { "body ID": 3, "name": "kept" }
            ]
        });
        store.insert(BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY, document.to_string());
        store.insert(
            BODY_RECORD_DATA,
            "1",
            json!({"name": "MBON-a", "status": "traced"}).to_string(),
        );
        store.insert(BODY_RECORD_DATA, "2", json!({"name": "", "status": "roughly traced"}).to_string());
        store.insert(BODY_RECORD_DATA, "3", "not json");
        store
    }

    #[test]
    fn test_memory_store_key_range() {
        let mut store = MemoryStore::new();
        for key in ["10", "100", "11", "2"] {
            store.insert("bodies", key, Vec::<u8>::new());
        }
        assert_eq!(store.read_keys("bodies", "10", "11").unwrap(), ["10", "100", "11"]);
        assert_eq!(store.read_keys("bodies", "2", "2").unwrap(), ["2"]);
        assert!(store.read_keys("bodies", "3", "1").unwrap().is_empty());
        assert!(matches!(
            store.read_keys("missing", "a", "b"),
            Err(AnnotationError::MissingData(_))
        ));
        assert!(matches!(
            store.read_key_value("bodies", "7"),
            Err(AnnotationError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_import_overlays_records() {
        let bookmarks = import_bookmarks(&store()).unwrap();
        assert_eq!(bookmarks.len(), 3);
        assert_eq!(bookmarks[0].name.as_deref(), Some("MBON-a"));
        assert_eq!(bookmarks[0].status.as_deref(), Some("traced"));
        // Empty record fields leave the document values alone.
        assert_eq!(bookmarks[1].name, None);
        assert_eq!(bookmarks[1].status.as_deref(), Some("roughly traced"));
        assert_eq!(bookmarks[2].name.as_deref(), Some("kept"));
    }

    #[test]
    fn test_import_without_records() {
        let mut store = MemoryStore::new();
        store.insert(
            BODY_ANNOTATION_DATA,
            BODY_SYNAPSES_KEY,
            r#"{"metadata": {"description": "bookmarks"}, "data": [{"body ID": 4}]}"#,
        );
        let bookmarks = import_bookmarks(&store).unwrap();
        assert_eq!(bookmarks, vec![Bookmark::new(4, 0, 0)]);
    }

    #[test]
    fn test_import_missing_sources() {
        let empty = MemoryStore::new();
        assert!(matches!(
            import_bookmarks(&empty),
            Err(AnnotationError::MissingData(name)) if name == BODY_ANNOTATION_DATA
        ));

        let mut no_key = MemoryStore::new();
        no_key.create_data(BODY_ANNOTATION_DATA);
        assert!(matches!(
            import_bookmarks(&no_key),
            Err(AnnotationError::MissingKey { .. })
        ));

        let mut invalid = MemoryStore::new();
        invalid.insert(BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY, r#"{"data": []}"#);
        assert!(matches!(
            import_bookmarks(&invalid),
            Err(AnnotationError::MissingSection)
        ));
    }

    #[test]
    fn test_import_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        assert!(matches!(
            import_bookmarks_cancellable(&store(), &token),
            Err(AnnotationError::Cancelled)
        ));
    }

    #[test]
    fn test_import_through_trait_object() {
        let store = store();
        let dynamic: &dyn AnnotationStore = &store;
        assert_eq!(import_bookmarks(dynamic).unwrap().len(), 3);
    }
}
