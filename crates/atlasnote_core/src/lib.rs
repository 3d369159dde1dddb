//! Core domain logic for Atlas Note.
//! This crate is the single source of truth for business invariants.

pub mod assistant;
pub mod attach;
pub mod blocks;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use assistant::{AssistantPanel, ChatEntry, ChatRole, REPLY_DELAY};
pub use attach::{AttachError, PickedFile, UploadRequest, UploadTarget};
pub use blocks::{BlockKind, BlockRegistry, Fragment, FragmentPlacement, SlashAction};
pub use editor::{
    CaretRect, EditorController, EditorSurface, EditorViewState, Focus, NoteListItem, SlashEffect,
    UploadOutcome,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NotePatch};
pub use model::session::{AuthProvider, Theme, UiMeta, UserSession};
pub use repo::kv_store::{KvStore, MemoryKvStore, SqliteKvStore};
pub use service::note_store::{
    derive_content_preview, ContentPreview, NoteStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
