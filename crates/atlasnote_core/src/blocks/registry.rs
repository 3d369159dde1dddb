//! Slash-command block registry.
//!
//! # Responsibility
//! - Hold the ordered slash-menu command table.
//! - Dispatch a chosen block type to its registered fragment producer.
//!
//! # Invariants
//! - Entries keep menu order; dispatch is a table lookup, not a match on
//!   rendering state.
//! - Producers are pure functions of the provided date (calendar) or
//!   constants (everything else).

use crate::blocks::calendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Empty paragraph appended after block fragments so typing can continue.
pub const EMPTY_PARAGRAPH: &str = "<p><br></p>";

/// Symbolic block types reachable from the slash menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    Paragraph,
    Todo,
    BulletedList,
    Callout,
    HighlightedSpan,
    Calendar,
    ImageUpload,
    Assistant,
}

/// Where a produced fragment lands relative to the caret's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentPlacement {
    /// Structural block; the producer appended a trailing empty paragraph.
    Block,
    /// Inline styled content continuing the current line.
    Inline,
}

/// A produced rich-text fragment ready for caret insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    pub placement: FragmentPlacement,
}

impl Fragment {
    fn block(html: impl Into<String>) -> Self {
        let mut html = html.into();
        html.push_str(EMPTY_PARAGRAPH);
        Self {
            html,
            placement: FragmentPlacement::Block,
        }
    }

    fn inline(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            placement: FragmentPlacement::Inline,
        }
    }
}

/// Outcome of dispatching one slash-menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashAction {
    /// Insert the produced fragment at the caret.
    Insert(Fragment),
    /// No fragment; route to the attachment pipeline with an inline target.
    RequestImageUpload,
    /// No fragment; open the assistant panel.
    OpenAssistant,
}

type Producer = fn(NaiveDate) -> SlashAction;

/// One registered slash-menu entry.
pub struct BlockCommand {
    pub kind: BlockKind,
    /// Menu label shown next to the entry.
    pub label: &'static str,
    produce: Producer,
}

/// Ordered table of slash commands.
pub struct BlockRegistry {
    entries: Vec<BlockCommand>,
}

impl BlockRegistry {
    /// Builds the registry with the built-in command set in menu order.
    pub fn new() -> Self {
        Self {
            entries: vec![
                entry(BlockKind::Heading1, "Heading 1", |_| {
                    SlashAction::Insert(Fragment::block("<h1>Heading 1</h1>"))
                }),
                entry(BlockKind::Heading2, "Heading 2", |_| {
                    SlashAction::Insert(Fragment::block("<h2>Heading 2</h2>"))
                }),
                entry(BlockKind::Paragraph, "Text", |_| {
                    SlashAction::Insert(Fragment::block("<p>Text block</p>"))
                }),
                entry(BlockKind::Todo, "To-do", |_| {
                    SlashAction::Insert(Fragment::block(
                        "<div class=\"todo-block\">\
                         <input type=\"checkbox\" class=\"todo-checkbox\">\
                         <div class=\"todo-text\" contenteditable=\"true\"></div>\
                         </div>",
                    ))
                }),
                entry(BlockKind::BulletedList, "Bulleted list", |_| {
                    SlashAction::Insert(Fragment::block("<ul><li>List item</li></ul>"))
                }),
                entry(BlockKind::Callout, "Callout", |_| {
                    SlashAction::Insert(Fragment::block(
                        "<div class=\"callout-block\">\
                         <div class=\"callout-icon\">\u{1F4A1}</div>\
                         <div class=\"callout-content\" contenteditable=\"true\">Goal</div>\
                         </div>",
                    ))
                }),
                entry(BlockKind::HighlightedSpan, "Highlight", |_| {
                    SlashAction::Insert(Fragment::inline(
                        "<span class=\"bg-yellow\">Yellow Text</span>&nbsp;",
                    ))
                }),
                entry(BlockKind::Calendar, "Calendar", |today| {
                    SlashAction::Insert(Fragment::block(calendar::month_widget(today)))
                }),
                entry(BlockKind::ImageUpload, "Upload image", |_| {
                    SlashAction::RequestImageUpload
                }),
                entry(BlockKind::Assistant, "Ask Atlas", |_| {
                    SlashAction::OpenAssistant
                }),
            ],
        }
    }

    /// Returns registered entries in menu order.
    pub fn commands(&self) -> &[BlockCommand] {
        &self.entries
    }

    /// Invokes the producer registered for `kind`.
    ///
    /// Returns `None` when no entry is registered; callers treat that as a
    /// menu dismissal.
    pub fn dispatch(&self, kind: BlockKind, today: NaiveDate) -> Option<SlashAction> {
        self.entries
            .iter()
            .find(|command| command.kind == kind)
            .map(|command| (command.produce)(today))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn entry(kind: BlockKind, label: &'static str, produce: Producer) -> BlockCommand {
    BlockCommand {
        kind,
        label,
        produce,
    }
}
