//! Session and UI metadata records.
//!
//! # Responsibility
//! - Define the simulated login session and its provider tag.
//! - Define the persisted visual theme record with first-run defaults.
//!
//! # Invariants
//! - Sessions persist until explicitly cleared; there is no expiry logic.
//! - A missing theme record resolves to `Theme::Dark`.

use serde::{Deserialize, Serialize};

/// Identity provider chosen on the simulated login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Google,
    Facebook,
    Apple,
}

impl AuthProvider {
    /// Stable lowercase tag for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Apple => "apple",
        }
    }
}

/// Simulated user session. Presence gates the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Display name shown in the account slot.
    pub name: String,
    /// Single-character avatar initial. May be empty.
    pub initial: String,
    /// Provider the session was created from.
    pub provider: AuthProvider,
}

impl UserSession {
    /// Builds the canned session the login simulation produces.
    pub fn mock_for(provider: AuthProvider) -> Self {
        match provider {
            AuthProvider::Apple => Self {
                name: "Apple User".to_string(),
                initial: String::new(),
                provider,
            },
            _ => Self {
                name: "M".to_string(),
                initial: "M".to_string(),
                provider,
            },
        }
    }
}

/// Enumerated visual themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Oled,
}

impl Theme {
    /// Stable lowercase tag for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Oled => "oled",
        }
    }
}

/// Persisted UI metadata record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMeta {
    pub theme: Theme,
}
