//! Editor controller and live-surface state.
//!
//! # Responsibility
//! - Mediate between the document store and the editable surface.
//! - Own the active-note cursor and the slash-menu UI state.
//!
//! # Invariants
//! - Only the controller reaches the surface working copy; no other
//!   component mutates it.
//! - Every title/body change is flushed to the store synchronously while a
//!   note is active.

pub mod controller;
pub mod surface;

pub use controller::{EditorController, EditorViewState, NoteListItem, SlashEffect, UploadOutcome};
pub use surface::{CaretRect, EditorSurface, Focus, SlashMenu};
