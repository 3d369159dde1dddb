//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate persistence adapter calls into use-case level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod note_store;
