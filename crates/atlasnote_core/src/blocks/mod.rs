//! Block command registry and fragment producers.
//!
//! # Responsibility
//! - Map symbolic block types to canonical fragment-producing functions.
//! - Keep producers pure so command dispatch is testable without a
//!   rendering surface.
//!
//! # Invariants
//! - Producers never mutate the document store; persistence happens via
//!   the normal body-change propagation path.
//! - Block-placement fragments include a trailing empty paragraph; inline
//!   fragments do not.

pub mod calendar;
pub mod registry;

pub use registry::{BlockKind, BlockRegistry, Fragment, FragmentPlacement, SlashAction};
