//! # Body Annotations
//!
//! Bookmark documents and body annotations for a neuron body browser.
//!
//! - [`bookmark`]: validation and parsing of bookmark JSON documents, and
//!   the sortable [`BookmarkTable`]
//! - [`store`]: the [`AnnotationStore`] seam to the annotation service and
//!   the bookmark import built on it
//! - [`loader`]: background loading with cancellation
//!
//! ## Example
//!
//! ```rust
//! use body_annotations::{import_bookmarks, BookmarkTable, MemoryStore};
//! use config::constants::{BODY_ANNOTATION_DATA, BODY_SYNAPSES_KEY};
//!
//! let mut store = MemoryStore::new();
//! store.insert(
//!     BODY_ANNOTATION_DATA,
//!     BODY_SYNAPSES_KEY,
//!     r#"{"metadata": {"description": "bookmarks"}, "data": [{"body ID": 3}]}"#,
//! );
//! let table = BookmarkTable::new(import_bookmarks(&store).unwrap());
//! assert_eq!(table.len(), 1);
//! ```

pub mod bookmark;
pub mod error;
pub mod loader;
pub mod store;

pub use bookmark::{parse_document, validate_document, Bookmark, BookmarkColumn, BookmarkTable};
pub use error::{AnnotationError, AnnotationResult};
pub use loader::{BackgroundLoader, CancelToken, LoadHandle, LoadOutcome};
pub use store::{import_bookmarks, AnnotationStore, MemoryStore};
