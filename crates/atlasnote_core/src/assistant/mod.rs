//! Assistant panel with a deterministic rule-based responder.
//!
//! # Responsibility
//! - Maintain the chat transcript and panel open state.
//! - Schedule exactly one delayed reply per accepted send.
//!
//! # Invariants
//! - The user's entry is appended before its reply is scheduled.
//! - Replies deliver in send order; there is no cancellation.
//! - Reply composition is a pure function of the input text.
//!
//! A production variant may substitute a network-backed responder behind
//! the same `send` contract, mapping upstream failure to a fixed apology
//! string rather than surfacing a transport error.

pub mod rules;

pub use rules::{compose_reply, detect_language, ReplyLanguage};

use std::collections::VecDeque;
use std::time::Duration;

/// Simulated reply latency the host waits before delivering.
pub const REPLY_DELAY: Duration = Duration::from_millis(600);

/// Transcript entry author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
}

/// Chat panel state: transcript, open flag, and undelivered replies.
#[derive(Debug, Default)]
pub struct AssistantPanel {
    transcript: Vec<ChatEntry>,
    pending: VecDeque<String>,
    open: bool,
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    /// Number of replies scheduled but not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Accepts one user message and schedules its reply.
    ///
    /// Whitespace-only input is ignored and returns `false`. Otherwise the
    /// user entry is appended first, then exactly one reply is queued for
    /// delivery after the simulated delay.
    pub fn send(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.transcript.push(ChatEntry {
            role: ChatRole::User,
            text: trimmed.to_string(),
        });
        self.pending.push_back(compose_reply(trimmed).to_string());
        true
    }

    /// Delivers all scheduled replies in order. Driven by the host after
    /// `REPLY_DELAY`; rapid sends queue independent completions.
    pub fn deliver_pending(&mut self) -> usize {
        let delivered = self.pending.len();
        while let Some(reply) = self.pending.pop_front() {
            self.transcript.push(ChatEntry {
                role: ChatRole::Assistant,
                text: reply,
            });
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantPanel, ChatRole};

    #[test]
    fn blank_send_is_ignored() {
        let mut panel = AssistantPanel::new();
        assert!(!panel.send("   "));
        assert!(panel.transcript().is_empty());
        assert_eq!(panel.pending_replies(), 0);
    }

    #[test]
    fn send_appends_user_entry_before_scheduling_reply() {
        let mut panel = AssistantPanel::new();
        assert!(panel.send("hello"));
        assert_eq!(panel.transcript().len(), 1);
        assert_eq!(panel.transcript()[0].role, ChatRole::User);
        assert_eq!(panel.pending_replies(), 1);
    }

    #[test]
    fn rapid_sends_deliver_in_order() {
        let mut panel = AssistantPanel::new();
        panel.send("hello");
        panel.send("calendar");
        assert_eq!(panel.deliver_pending(), 2);

        let roles: Vec<_> = panel.transcript().iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::User,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::Assistant
            ]
        );
        assert!(panel.transcript()[2].text.contains("Hello"));
        assert!(panel.transcript()[3].text.contains("/calendar"));
    }
}
