//! Live editable surface working copy.
//!
//! # Responsibility
//! - Hold the transient title/body mirror of the active note.
//! - Track caret position and input focus for reconciliation decisions.
//!
//! # Invariants
//! - The caret always sits on a char boundary of `body`.
//! - The surface is a working copy; the store keeps the authoritative
//!   record.

/// Input focus within the editing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    None,
    Title,
    Body,
}

/// On-screen caret rectangle used to anchor the slash menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CaretRect {
    /// Bottom edge; the menu opens just below the caret.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Open slash-menu state consumed by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlashMenu {
    pub anchor: CaretRect,
}

/// Transient mirror of the active note's editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSurface {
    pub title: String,
    /// Serialized rich-text body fragment.
    pub body: String,
    /// Byte offset into `body`.
    pub caret: usize,
    pub focus: Focus,
}

impl EditorSurface {
    /// Replaces title and body wholesale and parks the caret at the end.
    pub fn load(&mut self, title: &str, body: &str) {
        self.title.clear();
        self.title.push_str(title);
        self.body.clear();
        self.body.push_str(body);
        self.caret = self.body.len();
    }

    /// Clears all fields into the empty state.
    pub fn blank(&mut self) {
        self.load("", "");
        self.focus = Focus::None;
    }

    /// Splices `html` at the caret and advances the caret past it.
    pub fn insert_at_caret(&mut self, html: &str) {
        let at = self.clamped_caret();
        self.body.insert_str(at, html);
        self.caret = at + html.len();
    }

    /// Removes the character immediately before the caret, if any.
    pub fn delete_char_before_caret(&mut self) -> Option<char> {
        let at = self.clamped_caret();
        let (idx, ch) = self.body[..at].char_indices().next_back()?;
        self.body.replace_range(idx..at, "");
        self.caret = idx;
        Some(ch)
    }

    /// Returns the character immediately before the caret.
    pub fn char_before_caret(&self) -> Option<char> {
        self.body[..self.clamped_caret()].chars().next_back()
    }

    fn clamped_caret(&self) -> usize {
        let mut at = self.caret.min(self.body.len());
        while at > 0 && !self.body.is_char_boundary(at) {
            at -= 1;
        }
        at
    }
}
