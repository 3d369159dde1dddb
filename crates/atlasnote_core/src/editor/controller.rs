//! Editor controller.
//!
//! # Responsibility
//! - Own the active-note cursor and synchronize surface edits into the
//!   document store.
//! - Dispatch slash-triggered block insertion and capture upload intents.
//!
//! # Invariants
//! - Title/body changes flush to the store synchronously; the surface may
//!   therefore be overwritten wholesale on note switch.
//! - The body is never force-overwritten while it holds input focus.
//! - Upload routing uses the request captured at invocation time, never
//!   ambient state at completion time.

use crate::attach::pipeline::{
    encode_data_uri, inline_image_fragment, PickedFile, UploadRequest, UploadTarget,
};
use crate::blocks::registry::{BlockKind, BlockRegistry, SlashAction};
use crate::editor::surface::{CaretRect, EditorSurface, Focus, SlashMenu};
use crate::model::note::{NoteId, NotePatch};
use crate::repo::kv_store::KvStore;
use crate::service::note_store::{derive_content_preview, NoteStore, StoreError, StoreResult};
use chrono::Local;
use log::{info, warn};

/// Host-visible outcome of applying one slash-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashEffect {
    /// A fragment was inserted and flushed.
    Inserted,
    /// File selection should be opened; the upload request is pending.
    UploadRequested,
    /// The assistant panel should be opened.
    AssistantRequested,
    /// Nothing happened; the menu is closed.
    Dismissed,
}

/// Host-visible outcome of one upload completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    CoverSet,
    InlineInserted,
    /// The pick was cancelled; nothing changed.
    Cancelled,
    /// The file could not be decoded; a notice was queued.
    Rejected,
    /// The captured note no longer exists; nothing changed.
    MissingNote,
}

/// One rebuilt note-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    /// `None` renders as a dimmed placeholder label; the placeholder is
    /// never persisted.
    pub title: Option<String>,
    /// Tag-stripped content snippet for the entry subtitle.
    pub preview: Option<String>,
    pub selected: bool,
}

/// Rebuilt editor pane state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorViewState {
    /// True when no note is active; the surface shows the empty state.
    pub empty: bool,
    pub title: String,
    pub body: String,
    pub cover: Option<String>,
    /// The add-cover affordance hides once a cover is present.
    pub show_add_cover: bool,
}

/// Mediator between the document store and the live editable surface.
pub struct EditorController<S: KvStore> {
    store: NoteStore<S>,
    registry: BlockRegistry,
    surface: EditorSurface,
    active_note_id: Option<NoteId>,
    slash_menu: Option<SlashMenu>,
    pending_upload: Option<UploadRequest>,
    notices: Vec<String>,
}

impl<S: KvStore> EditorController<S> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self {
            store,
            registry: BlockRegistry::new(),
            surface: EditorSurface::default(),
            active_note_id: None,
            slash_menu: None,
            pending_upload: None,
            notices: Vec::new(),
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NoteStore<S> {
        &mut self.store
    }

    pub fn active_note_id(&self) -> Option<NoteId> {
        self.active_note_id
    }

    pub fn surface(&self) -> &EditorSurface {
        &self.surface
    }

    /// Creates a fresh note and focuses it.
    pub fn create_note(&mut self) -> StoreResult<NoteId> {
        let note = self.store.create_note()?;
        self.set_active_note(Some(note.id))?;
        Ok(note.id)
    }

    /// Switches editing focus to `id`.
    ///
    /// The surface title/body are replaced wholesale with the stored
    /// record; any surface edit not yet flushed is lost by design, since
    /// every keystroke flush is synchronous. A blank note moves input
    /// focus to the title field. `None` or an unresolved id blanks the
    /// surface into the empty state.
    pub fn set_active_note(&mut self, id: Option<NoteId>) -> StoreResult<()> {
        self.slash_menu = None;

        let note = match id {
            Some(id) => self.store.get_note(id)?,
            None => None,
        };

        match note {
            Some(note) => {
                self.active_note_id = Some(note.id);
                self.surface.load(&note.title, &note.content);
                self.surface.focus = if note.is_blank() {
                    Focus::Title
                } else {
                    Focus::None
                };
                info!(
                    "event=note_activate module=editor status=ok note_id={}",
                    note.id
                );
            }
            None => {
                self.active_note_id = None;
                self.surface.blank();
                info!("event=note_activate module=editor status=ok note_id=none");
            }
        }

        Ok(())
    }

    /// Flushes a title edit from the surface into the store.
    pub fn on_title_changed(&mut self, text: &str) -> StoreResult<()> {
        self.surface.title.clear();
        self.surface.title.push_str(text);

        let Some(id) = self.active_note_id else {
            return Ok(());
        };
        self.tolerate_not_found(id, NotePatch::title(text))
    }

    /// Flushes a body edit from the surface into the store.
    pub fn on_body_changed(&mut self, html: &str) -> StoreResult<()> {
        self.surface.body.clear();
        self.surface.body.push_str(html);
        self.surface.caret = self.surface.body.len();

        let Some(id) = self.active_note_id else {
            return Ok(());
        };
        self.tolerate_not_found(id, NotePatch::content(html))
    }

    pub fn focus_title(&mut self) {
        self.surface.focus = Focus::Title;
    }

    pub fn focus_body(&mut self) {
        self.surface.focus = Focus::Body;
    }

    /// Drops body focus and reconciles the surface with the store.
    pub fn blur_body(&mut self) -> StoreResult<()> {
        self.surface.focus = Focus::None;
        self.refresh_from_store()
    }

    /// Re-renders the surface from the authoritative record.
    ///
    /// The title is only overwritten on value inequality so re-rendering
    /// the same value cannot move the cursor; the body is left alone while
    /// it holds input focus.
    pub fn refresh_from_store(&mut self) -> StoreResult<()> {
        let Some(id) = self.active_note_id else {
            return Ok(());
        };
        let Some(note) = self.store.get_note(id)? else {
            return self.set_active_note(None);
        };

        if self.surface.title != note.title {
            self.surface.title = note.title;
        }
        if self.surface.focus != Focus::Body && self.surface.body != note.content {
            self.surface.body = note.content;
            self.surface.caret = self.surface.body.len();
        }
        Ok(())
    }

    /// Opens the slash menu anchored to the caret rectangle.
    pub fn open_slash_menu(&mut self, anchor: CaretRect) {
        if self.active_note_id.is_some() {
            self.slash_menu = Some(SlashMenu { anchor });
        }
    }

    pub fn slash_menu(&self) -> Option<&SlashMenu> {
        self.slash_menu.as_ref()
    }

    pub fn dismiss_slash_menu(&mut self) {
        self.slash_menu = None;
    }

    /// Closes the menu when a pointer interaction lands outside both the
    /// menu and the body surface. No other state changes.
    pub fn handle_outside_pointer(&mut self, in_menu: bool, in_body: bool) {
        if !in_menu && !in_body {
            self.slash_menu = None;
        }
    }

    /// Applies one slash-menu selection.
    ///
    /// Atomically from the surface's point of view: removes the trigger
    /// character sitting before the caret, invokes the registered
    /// producer, splices the fragment at the caret and flushes it through
    /// the normal body-change path, then closes the menu.
    pub fn apply_slash_command(&mut self, kind: BlockKind) -> StoreResult<SlashEffect> {
        if self.slash_menu.take().is_none() {
            return Ok(SlashEffect::Dismissed);
        }

        if self.surface.char_before_caret() == Some('/') {
            self.surface.delete_char_before_caret();
        }

        let today = Local::now().date_naive();
        let Some(action) = self.registry.dispatch(kind, today) else {
            self.flush_body()?;
            return Ok(SlashEffect::Dismissed);
        };

        match action {
            SlashAction::Insert(fragment) => {
                self.surface.insert_at_caret(&fragment.html);
                self.flush_body()?;
                info!("event=slash_apply module=editor status=ok kind={kind:?}");
                Ok(SlashEffect::Inserted)
            }
            SlashAction::RequestImageUpload => {
                self.flush_body()?;
                let Some(note_id) = self.active_note_id else {
                    return Ok(SlashEffect::Dismissed);
                };
                self.pending_upload = Some(UploadRequest {
                    note_id,
                    target: UploadTarget::Inline,
                    caret: self.surface.caret,
                });
                info!("event=upload_begin module=editor status=ok target=inline note_id={note_id}");
                Ok(SlashEffect::UploadRequested)
            }
            SlashAction::OpenAssistant => {
                self.flush_body()?;
                Ok(SlashEffect::AssistantRequested)
            }
        }
    }

    /// Captures a cover upload intent for the active note.
    ///
    /// Returns `None` when no note is active. A previously unconsumed
    /// request is overwritten so no stale target leaks into this pick.
    pub fn begin_cover_upload(&mut self) -> Option<UploadRequest> {
        let note_id = self.active_note_id?;
        let request = UploadRequest {
            note_id,
            target: UploadTarget::Cover,
            caret: self.surface.caret,
        };
        self.pending_upload = Some(request);
        info!("event=upload_begin module=editor status=ok target=cover note_id={note_id}");
        Some(request)
    }

    /// Consumes the pending upload request, if any. Each request resolves
    /// exactly once; the file-selection surface resets after every use.
    pub fn take_pending_upload(&mut self) -> Option<UploadRequest> {
        self.pending_upload.take()
    }

    /// Resolves one file-selection completion against its captured
    /// request.
    ///
    /// A cancelled pick (`None`) is a silent no-op. Decode failures queue
    /// a visible notice and leave all note state unchanged. Inline
    /// fragments land at the captured caret when the captured note is
    /// still active, otherwise they are appended to that note's stored
    /// content.
    pub fn complete_upload(
        &mut self,
        request: UploadRequest,
        file: Option<PickedFile>,
    ) -> StoreResult<UploadOutcome> {
        let Some(file) = file else {
            return Ok(UploadOutcome::Cancelled);
        };

        let reference = match encode_data_uri(&file) {
            Ok(reference) => reference,
            Err(err) => {
                warn!(
                    "event=upload_decode module=editor status=error target={} error={err}",
                    request.target.as_str()
                );
                self.notices.push(err.to_string());
                return Ok(UploadOutcome::Rejected);
            }
        };

        match request.target {
            UploadTarget::Cover => {
                match self.store.update_note(request.note_id, NotePatch::cover(reference)) {
                    Ok(_) => {
                        info!(
                            "event=upload_route module=editor status=ok target=cover note_id={}",
                            request.note_id
                        );
                        Ok(UploadOutcome::CoverSet)
                    }
                    Err(StoreError::NotFound(_)) => Ok(UploadOutcome::MissingNote),
                    Err(err) => Err(err),
                }
            }
            UploadTarget::Inline => {
                let fragment = inline_image_fragment(&reference);
                if self.active_note_id == Some(request.note_id) {
                    self.surface.caret = request.caret;
                    self.surface.insert_at_caret(&fragment);
                    self.flush_body()?;
                } else {
                    // The user moved on; route to the captured note's
                    // stored content instead of the live surface.
                    let Some(note) = self.store.get_note(request.note_id)? else {
                        return Ok(UploadOutcome::MissingNote);
                    };
                    let mut content = note.content;
                    content.push_str(&fragment);
                    match self
                        .store
                        .update_note(request.note_id, NotePatch::content(content))
                    {
                        Ok(_) => {}
                        Err(StoreError::NotFound(_)) => return Ok(UploadOutcome::MissingNote),
                        Err(err) => return Err(err),
                    }
                }
                info!(
                    "event=upload_route module=editor status=ok target=inline note_id={}",
                    request.note_id
                );
                Ok(UploadOutcome::InlineInserted)
            }
        }
    }

    /// Rebuilds the note list, marking the active entry as selected.
    pub fn note_list(&self) -> StoreResult<Vec<NoteListItem>> {
        let notes = self.store.list_notes()?;
        Ok(notes
            .into_iter()
            .map(|note| NoteListItem {
                selected: self.active_note_id == Some(note.id),
                title: if note.title.is_empty() {
                    None
                } else {
                    Some(note.title.clone())
                },
                preview: derive_content_preview(&note.content).text,
                id: note.id,
            })
            .collect())
    }

    /// Rebuilds the editor pane state for the active note.
    pub fn editor_view(&self) -> StoreResult<EditorViewState> {
        let Some(id) = self.active_note_id else {
            return Ok(EditorViewState {
                empty: true,
                title: String::new(),
                body: String::new(),
                cover: None,
                show_add_cover: false,
            });
        };

        let cover = self.store.get_note(id)?.and_then(|note| note.cover);
        Ok(EditorViewState {
            empty: false,
            title: self.surface.title.clone(),
            body: self.surface.body.clone(),
            show_add_cover: cover.is_none(),
            cover,
        })
    }

    /// Drains queued user-visible notices.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn flush_body(&mut self) -> StoreResult<()> {
        let Some(id) = self.active_note_id else {
            return Ok(());
        };
        let content = self.surface.body.clone();
        self.tolerate_not_found(id, NotePatch::content(content))
    }

    fn tolerate_not_found(&mut self, id: NoteId, patch: NotePatch) -> StoreResult<()> {
        match self.store.update_note(id, patch) {
            Ok(_) => Ok(()),
            Err(StoreError::NotFound(_)) => {
                warn!("event=note_flush module=editor status=not_found note_id={id}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
