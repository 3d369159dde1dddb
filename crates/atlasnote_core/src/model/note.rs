//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record owned by the document store.
//! - Provide the partial-field patch shape used by update flows.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `content` is an opaque serialized rich-text fragment; the store never
//!   inspects it beyond preview derivation.
//! - Every applied patch refreshes `updated_at`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// A single document record.
///
/// Wire names are camelCase to stay compatible with the persisted
/// collection blobs (`updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable id used for selection, routing and auditing.
    pub id: NoteId,
    /// Display title. May be empty; rendering substitutes a placeholder.
    pub title: String,
    /// Serialized rich-text body fragment. Opaque blob to the store.
    pub content: String,
    /// Optional embeddable cover image reference (data URI).
    pub cover: Option<String>,
    /// Last-write timestamp in epoch milliseconds.
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with a generated stable id.
    pub fn new_empty(now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            content: String::new(),
            cover: None,
            updated_at: now_ms,
        }
    }

    /// Returns whether both title and content are empty.
    ///
    /// Blank notes move input focus to the title field on activation.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Merges present patch fields into this note and stamps `updated_at`.
    pub fn apply(&mut self, patch: NotePatch, now_ms: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(cover) = patch.cover {
            self.cover = Some(cover);
        }
        self.updated_at = now_ms;
    }
}

/// Partial-field update for one note.
///
/// Only fields carrying `Some` are merged; absent fields keep their stored
/// value. Covers cannot be cleared through a patch, matching the editing
/// flows this core supports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover: Option<String>,
}

impl NotePatch {
    /// Patch replacing the title only.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch replacing the body content only.
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch replacing the cover reference only.
    pub fn cover(value: impl Into<String>) -> Self {
        Self {
            cover: Some(value.into()),
            ..Self::default()
        }
    }
}
