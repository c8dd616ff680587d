//! # Bookmark Documents
//!
//! A bookmark document is a JSON object of the form
//!
//! ```json
//! {
//!   "metadata": { "description": "bookmarks" },
//!   "data": [
//!     { "body ID": 42, "name": "KC-a", "body T-bars": 12, "body PSDs": 30, "body status": "traced" }
//!   ]
//! }
//! ```
//!
//! The document is checked structurally with [`validate_document`] before the
//! `data` entries are deserialized into [`Bookmark`] records.

use std::cmp::Reverse;
use std::path::Path;

use config::constants::BOOKMARK_DESCRIPTION;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnnotationError, AnnotationResult};

/// One body entry of a bookmark document.
///
/// Missing counts read as zero; missing strings read as `None`. Keys other
/// than the ones below are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Body identifier
    #[serde(rename = "body ID")]
    pub body_id: u64,
    /// Body name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of presynaptic sites (T-bars)
    #[serde(rename = "body T-bars", default)]
    pub pre_synapses: u64,
    /// Number of postsynaptic densities
    #[serde(rename = "body PSDs", default)]
    pub post_synapses: u64,
    /// Tracing status
    #[serde(rename = "body status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Bookmark {
    /// Creates a bookmark with counts and no name or status.
    pub fn new(body_id: u64, pre_synapses: u64, post_synapses: u64) -> Self {
        Self {
            body_id,
            name: None,
            pre_synapses,
            post_synapses,
            status: None,
        }
    }
}

/// Checks the structure of a bookmark document.
///
/// # Errors
///
/// The checks run in order and the first failure is returned:
/// `data` and `metadata` present, `metadata.description` present and equal
/// to [`BOOKMARK_DESCRIPTION`], `data` is an array.
pub fn validate_document(document: &Value) -> AnnotationResult<()> {
    let (Some(data), Some(metadata)) = (document.get("data"), document.get("metadata")) else {
        return Err(AnnotationError::MissingSection);
    };
    let description = metadata
        .get("description")
        .ok_or(AnnotationError::MissingDescription)?;
    if description.as_str() != Some(BOOKMARK_DESCRIPTION) {
        return Err(AnnotationError::WrongDescription {
            found: description
                .as_str()
                .map_or_else(|| description.to_string(), str::to_string),
            expected: BOOKMARK_DESCRIPTION,
        });
    }
    if !data.is_array() {
        return Err(AnnotationError::DataNotArray);
    }
    Ok(())
}

/// Validates `document` and deserializes its `data` entries.
pub fn parse_value(document: &Value) -> AnnotationResult<Vec<Bookmark>> {
    validate_document(document)?;
    let entries = document["data"].as_array().map_or(&[][..], Vec::as_slice);
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Bookmark::deserialize(entry)
                .map_err(|source| AnnotationError::InvalidRecord { index, source })
        })
        .collect()
}

/// Parses a bookmark document from JSON text.
///
/// # Example
///
/// ```rust
/// use body_annotations::bookmark::parse_document;
///
/// let json = r#"{"metadata": {"description": "bookmarks"},
///                "data": [{"body ID": 7, "body T-bars": 3}]}"#;
/// let bookmarks = parse_document(json).unwrap();
/// assert_eq!(bookmarks[0].body_id, 7);
/// assert_eq!(bookmarks[0].post_synapses, 0);
/// ```
pub fn parse_document(text: &str) -> AnnotationResult<Vec<Bookmark>> {
    let document: Value = serde_json::from_str(text)?;
    parse_value(&document)
}

/// Reads and parses a bookmark file.
pub fn load_file(path: impl AsRef<Path>) -> AnnotationResult<Vec<Bookmark>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AnnotationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bookmarks = parse_document(&text)?;
    log::debug!("loaded {} bookmarks from {}", bookmarks.len(), path.display());
    Ok(bookmarks)
}

/// Column of a [`BookmarkTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookmarkColumn {
    /// Body identifier
    BodyId,
    /// Body name
    Name,
    /// Presynaptic count
    PreSynapses,
    /// Postsynaptic count
    PostSynapses,
    /// Tracing status
    Status,
}

impl BookmarkColumn {
    /// All columns in display order.
    pub const ALL: [BookmarkColumn; 5] = [
        BookmarkColumn::BodyId,
        BookmarkColumn::Name,
        BookmarkColumn::PreSynapses,
        BookmarkColumn::PostSynapses,
        BookmarkColumn::Status,
    ];

    /// Header text of the column.
    pub fn header(self) -> &'static str {
        match self {
            BookmarkColumn::BodyId => "Body ID",
            BookmarkColumn::Name => "name",
            BookmarkColumn::PreSynapses => "# pre",
            BookmarkColumn::PostSynapses => "# post",
            BookmarkColumn::Status => "status",
        }
    }
}

/// Rows of bookmarks, initially sorted by presynaptic count, largest first.
///
/// # Example
///
/// ```rust
/// use body_annotations::bookmark::{Bookmark, BookmarkTable};
///
/// let table = BookmarkTable::new(vec![Bookmark::new(1, 5, 0), Bookmark::new(2, 9, 0)]);
/// assert_eq!(table.rows()[0].body_id, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkTable {
    rows: Vec<Bookmark>,
}

impl BookmarkTable {
    /// Builds the table from `bookmarks`.
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        let mut table = Self { rows: bookmarks };
        table.sort_by(BookmarkColumn::PreSynapses, true);
        table
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Bookmark] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `body_id`, if present.
    pub fn find(&self, body_id: u64) -> Option<&Bookmark> {
        self.rows.iter().find(|b| b.body_id == body_id)
    }

    /// Display text of one cell.
    pub fn cell(&self, row: usize, column: BookmarkColumn) -> Option<String> {
        let bookmark = self.rows.get(row)?;
        Some(match column {
            BookmarkColumn::BodyId => bookmark.body_id.to_string(),
            BookmarkColumn::Name => bookmark.name.clone().unwrap_or_default(),
            BookmarkColumn::PreSynapses => bookmark.pre_synapses.to_string(),
            BookmarkColumn::PostSynapses => bookmark.post_synapses.to_string(),
            BookmarkColumn::Status => bookmark.status.clone().unwrap_or_default(),
        })
    }

    /// Stable sort on `column`.
    pub fn sort_by(&mut self, column: BookmarkColumn, descending: bool) {
        match (column, descending) {
            (BookmarkColumn::BodyId, false) => self.rows.sort_by_key(|b| b.body_id),
            (BookmarkColumn::BodyId, true) => self.rows.sort_by_key(|b| Reverse(b.body_id)),
            (BookmarkColumn::PreSynapses, false) => self.rows.sort_by_key(|b| b.pre_synapses),
            (BookmarkColumn::PreSynapses, true) => {
                self.rows.sort_by_key(|b| Reverse(b.pre_synapses))
            }
            (BookmarkColumn::PostSynapses, false) => self.rows.sort_by_key(|b| b.post_synapses),
            (BookmarkColumn::PostSynapses, true) => {
                self.rows.sort_by_key(|b| Reverse(b.post_synapses))
            }
            (BookmarkColumn::Name, false) => self.rows.sort_by(|a, b| a.name.cmp(&b.name)),
            (BookmarkColumn::Name, true) => self.rows.sort_by(|a, b| b.name.cmp(&a.name)),
            (BookmarkColumn::Status, false) => self.rows.sort_by(|a, b| a.status.cmp(&b.status)),
            (BookmarkColumn::Status, true) => self.rows.sort_by(|a, b| b.status.cmp(&a.status)),
        }
    }
}

impl From<Vec<Bookmark>> for BookmarkTable {
    fn from(bookmarks: Vec<Bookmark>) -> Self {
        Self::new(bookmarks)
    }
}
