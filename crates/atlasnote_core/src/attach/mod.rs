//! Attachment pipeline.
//!
//! # Responsibility
//! - Convert a picked binary file into a self-contained embeddable
//!   reference (data URI).
//! - Model the one-shot upload routing flag captured at invocation time.
//!
//! # Invariants
//! - An `UploadRequest` is consumed exactly once; routing never reads
//!   ambient state at completion time.
//! - Encoding failures leave note and editor state unchanged.

pub mod pipeline;

pub use pipeline::{
    encode_data_uri, inline_image_fragment, AttachError, PickedFile, UploadRequest, UploadTarget,
};
