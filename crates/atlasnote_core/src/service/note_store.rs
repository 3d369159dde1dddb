//! Document store over the key-value persistence adapter.
//!
//! # Responsibility
//! - Own CRUD over the note collection, id generation and timestamping.
//! - Own the session and UI metadata records stored next to the notes.
//! - Derive plain-text previews from serialized rich-text content.
//!
//! # Invariants
//! - The persisted collection is the authoritative copy; every mutation is
//!   a full read-modify-write of the whole collection.
//! - Collection order is insertion order, newest-created first; updates
//!   never reorder.
//! - `update_note` on an unknown id leaves the collection unchanged.

use crate::model::note::{Note, NoteId, NotePatch};
use crate::model::session::{AuthProvider, Theme, UiMeta, UserSession};
use crate::repo::kv_store::{KvError, KvStore, META_KEY, NOTES_KEY, USER_KEY};
use chrono::Utc;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PREVIEW_MAX_CHARS: usize = 100;

static IMG_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]*\bsrc="([^"]+)""#).expect("valid img src regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store error.
#[derive(Debug)]
pub enum StoreError {
    /// Operation referenced a note id no longer present.
    NotFound(NoteId),
    /// A persisted blob could not be decoded.
    Corrupt { key: &'static str, message: String },
    /// Adapter-level storage failure.
    Kv(KvError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Corrupt { key, message } => {
                write!(f, "corrupt persisted record under `{key}`: {message}")
            }
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Preview projection derived from serialized rich-text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPreview {
    /// Tag-stripped summary text, capped at 100 chars.
    pub text: Option<String>,
    /// First inline image source, if any.
    pub image: Option<String>,
}

/// Document store facade over a persistence adapter.
pub struct NoteStore<S: KvStore> {
    storage: S,
}

impl<S: KvStore> NoteStore<S> {
    /// Creates a store using the provided adapter implementation.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Allocates a fresh empty note at the head of the collection.
    pub fn create_note(&mut self) -> StoreResult<Note> {
        let mut notes = self.load_notes()?;
        let note = Note::new_empty(now_ms());
        notes.insert(0, note.clone());
        self.persist_notes(&notes)?;
        info!(
            "event=note_create module=store status=ok note_id={} total={}",
            note.id,
            notes.len()
        );
        Ok(note)
    }

    /// Merges patch fields into an existing note and stamps `updated_at`.
    ///
    /// Returns `StoreError::NotFound` for unknown ids; the collection is
    /// left unchanged in that case.
    pub fn update_note(&mut self, id: NoteId, patch: NotePatch) -> StoreResult<Note> {
        let mut notes = self.load_notes()?;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            warn!("event=note_update module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        };

        note.apply(patch, now_ms());
        let updated = note.clone();
        self.persist_notes(&notes)?;
        info!("event=note_update module=store status=ok note_id={id}");
        Ok(updated)
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let notes = self.load_notes()?;
        Ok(notes.into_iter().find(|note| note.id == id))
    }

    /// Lists notes in stored order. The store's insertion-order policy is
    /// authoritative; no re-sorting happens here.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        self.load_notes()
    }

    /// Removes one note by id.
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        let mut notes = self.load_notes()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            warn!("event=note_delete module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id));
        }

        self.persist_notes(&notes)?;
        info!("event=note_delete module=store status=ok note_id={id}");
        Ok(())
    }

    /// Case-insensitive match against titles and tag-stripped content.
    ///
    /// Blank queries return an empty list rather than the full collection.
    pub fn search_notes(&self, query: &str) -> StoreResult<Vec<Note>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let notes = self.load_notes()?;
        Ok(notes
            .into_iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || strip_tags(&note.content).to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Returns the active session, or `None` when logged out.
    pub fn current_user(&self) -> StoreResult<Option<UserSession>> {
        self.load_record::<UserSession>(USER_KEY)
    }

    /// Creates and persists the simulated session for `provider`.
    pub fn login(&mut self, provider: AuthProvider) -> StoreResult<UserSession> {
        let session = UserSession::mock_for(provider);
        self.save_record(USER_KEY, &session)?;
        info!(
            "event=user_login module=store status=ok provider={}",
            provider.as_str()
        );
        Ok(session)
    }

    /// Clears the persisted session.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.storage.set(USER_KEY, "null")?;
        info!("event=user_logout module=store status=ok");
        Ok(())
    }

    /// Returns persisted UI metadata, defaulting on first run.
    pub fn ui_meta(&self) -> StoreResult<UiMeta> {
        Ok(self.load_record::<UiMeta>(META_KEY)?.unwrap_or_default())
    }

    /// Persists the active theme.
    pub fn set_theme(&mut self, theme: Theme) -> StoreResult<UiMeta> {
        let meta = UiMeta { theme };
        self.save_record(META_KEY, &meta)?;
        info!(
            "event=theme_set module=store status=ok theme={}",
            theme.as_str()
        );
        Ok(meta)
    }

    fn load_notes(&self) -> StoreResult<Vec<Note>> {
        Ok(self.load_record::<Vec<Note>>(NOTES_KEY)?.unwrap_or_default())
    }

    fn persist_notes(&mut self, notes: &[Note]) -> StoreResult<()> {
        let blob = encode_record(NOTES_KEY, &notes)?;
        self.storage.set(NOTES_KEY, &blob)?;
        Ok(())
    }

    fn load_record<T: DeserializeOwned>(&self, key: &'static str) -> StoreResult<Option<T>> {
        let Some(blob) = self.storage.get(key)? else {
            return Ok(None);
        };

        // "null" is a legal stored value for cleared records.
        serde_json::from_str::<Option<T>>(&blob).map_err(|err| StoreError::Corrupt {
            key,
            message: err.to_string(),
        })
    }

    fn save_record<T: Serialize>(&mut self, key: &'static str, record: &T) -> StoreResult<()> {
        let blob = encode_record(key, record)?;
        self.storage.set(key, &blob)?;
        Ok(())
    }
}

fn encode_record<T: Serialize>(key: &'static str, record: &T) -> StoreResult<String> {
    serde_json::to_string(record).map_err(|err| StoreError::Corrupt {
        key,
        message: err.to_string(),
    })
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Derives list-display preview fields from serialized rich-text content.
///
/// Rules:
/// - `image`: first `<img src=...>` value in document order.
/// - `text`: tags removed, whitespace normalized, first 100 chars retained.
pub fn derive_content_preview(content: &str) -> ContentPreview {
    let image = IMG_SRC_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty());

    let stripped = strip_tags(content);
    let trimmed = stripped.trim();
    let text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    };

    ContentPreview { text, image }
}

fn strip_tags(content: &str) -> String {
    let without_tags = TAG_RE.replace_all(content, " ");
    WHITESPACE_RE.replace_all(&without_tags, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::derive_content_preview;

    #[test]
    fn preview_extracts_first_image_source() {
        let html = r#"<p>x</p><img src="one.png"><img src="two.png">"#;
        let preview = derive_content_preview(html);
        assert_eq!(preview.image.as_deref(), Some("one.png"));
    }

    #[test]
    fn preview_strips_tags_and_limits_length() {
        let html = format!("<h1>Plan</h1><p>{}</p>", "word ".repeat(60));
        let preview = derive_content_preview(&html);
        let text = preview.text.expect("preview text should exist");
        assert!(!text.contains('<'));
        assert!(text.starts_with("Plan"));
        assert!(text.chars().count() <= 100);
    }

    #[test]
    fn preview_of_empty_content_is_empty() {
        let preview = derive_content_preview("");
        assert_eq!(preview.text, None);
        assert_eq!(preview.image, None);
    }
}
