//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `atlasnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use atlasnote_core::{MemoryKvStore, NoteStore};

fn main() {
    println!("atlasnote_core ping={}", atlasnote_core::ping());
    println!("atlasnote_core version={}", atlasnote_core::core_version());

    // Exercise one ephemeral store round-trip to prove wiring.
    let mut store = NoteStore::new(MemoryKvStore::new());
    match store.create_note() {
        Ok(note) => println!("atlasnote_core smoke_note={}", note.id),
        Err(err) => eprintln!("atlasnote_core smoke_error={err}"),
    }
}
