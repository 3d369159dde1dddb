//! Deterministic reply rule tables.
//!
//! # Responsibility
//! - Detect the input language and compose the canned reply.
//!
//! # Invariants
//! - Tables are evaluated in order; the first matching keyword wins.
//! - Composition is pure: same input, same reply.

use once_cell::sync::Lazy;
use regex::Regex;

static ARABIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0600}-\u{06FF}]").expect("valid arabic range regex"));

/// Language branch selected for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyLanguage {
    English,
    Arabic,
}

/// One ordered keyword rule: any listed keyword selects the reply.
struct KeywordRule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const ENGLISH_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["hello", "hi"],
        reply: "Hello! I am ATLAS. How can I assist you?",
    },
    KeywordRule {
        keywords: &["goal"],
        reply: "Try using the '/callout' command for goals!",
    },
    KeywordRule {
        keywords: &["calendar"],
        reply: "Type '/calendar' to insert a widget.",
    },
    KeywordRule {
        keywords: &["upload"],
        reply: "You can upload images using the slash menu!",
    },
];

const ENGLISH_FALLBACK: &str = "I'm here to help you navigate ATLAS. Try asking about features!";

const ARABIC_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["مرحبا", "السلام"],
        reply: "أهلاً بك في أطلس! كيف يمكنني مساعدتك اليوم؟",
    },
    KeywordRule {
        keywords: &["اسمك"],
        reply: "أنا أطلس، مساعدك الذكي.",
    },
    KeywordRule {
        keywords: &["صورة"],
        reply: "لإضافة صورة، اكتب '/' واختر 'Upload Image'.",
    },
    KeywordRule {
        keywords: &["تقويم"],
        reply: "يمكنك إضافة تقويم بكتابة '/calendar'.",
    },
];

const ARABIC_FALLBACK: &str =
    "هذا مثير للاهتمام! أنا حالياً في النسخة التجريبية، لكن يمكنني مساعدتك في تنظيم ملاحظاتك.";

/// Detects the reply-table branch for one input.
///
/// Any Arabic-range character routes the whole input to the Arabic table,
/// regardless of case or a mixed-language suffix.
pub fn detect_language(input: &str) -> ReplyLanguage {
    if ARABIC_RE.is_match(input) {
        ReplyLanguage::Arabic
    } else {
        ReplyLanguage::English
    }
}

/// Composes the deterministic reply for one input.
pub fn compose_reply(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    let (rules, fallback) = match detect_language(input) {
        ReplyLanguage::Arabic => (ARABIC_RULES, ARABIC_FALLBACK),
        ReplyLanguage::English => (ENGLISH_RULES, ENGLISH_FALLBACK),
    };

    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| lower.contains(keyword))
        })
        .map_or(fallback, |rule| rule.reply)
}

#[cfg(test)]
mod tests {
    use super::{compose_reply, detect_language, ReplyLanguage, ARABIC_FALLBACK, ENGLISH_FALLBACK};

    #[test]
    fn detects_arabic_range_characters() {
        assert_eq!(detect_language("مرحبا"), ReplyLanguage::Arabic);
        assert_eq!(detect_language("hello"), ReplyLanguage::English);
        assert_eq!(detect_language("hey صورة there"), ReplyLanguage::Arabic);
    }

    #[test]
    fn first_matching_keyword_wins_in_table_order() {
        // "hello" precedes "goal" in the table.
        assert_eq!(
            compose_reply("hello, what about my goal?"),
            "Hello! I am ATLAS. How can I assist you?"
        );
        assert_eq!(
            compose_reply("My GOAL for today"),
            "Try using the '/callout' command for goals!"
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            compose_reply("HI THERE"),
            "Hello! I am ATLAS. How can I assist you?"
        );
        assert_eq!(compose_reply("CALENDAR?"), "Type '/calendar' to insert a widget.");
    }

    #[test]
    fn unmatched_input_gets_language_appropriate_fallback() {
        assert_eq!(compose_reply("quantum physics"), ENGLISH_FALLBACK);
        assert_eq!(compose_reply("فيزياء الكم"), ARABIC_FALLBACK);
    }

    #[test]
    fn arabic_branch_wins_over_english_keywords_in_mixed_input() {
        // Arabic-range characters gate the table even when an English
        // keyword is present.
        assert_eq!(compose_reply("hello تقويم"), "يمكنك إضافة تقويم بكتابة '/calendar'.");
    }
}
