//! File-to-data-URI encoding and upload routing types.
//!
//! # Responsibility
//! - Encode picked files as embeddable data URIs.
//! - Define the captured upload request passed through completions.
//!
//! # Invariants
//! - Only image payloads are accepted; anything else is a decode failure.
//! - The encoded reference travels with the note content; no separate
//!   blob storage exists.

use crate::blocks::registry::EMPTY_PARAGRAPH;
use crate::model::note::NoteId;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Routing flag for a newly attached image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    /// The image becomes the note's cover.
    Cover,
    /// The image is inserted at the body caret.
    Inline,
}

impl UploadTarget {
    /// Stable lowercase tag for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Inline => "inline",
        }
    }
}

/// Upload intent captured when file selection is opened.
///
/// The target note id and caret are fixed here so a completion firing
/// after the user switched notes still routes correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadRequest {
    pub note_id: NoteId,
    pub target: UploadTarget,
    /// Byte offset into the body the request was captured at. Meaningful
    /// for inline targets only.
    pub caret: usize,
}

/// One file yielded by the file-selection surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    /// MIME type reported by the picker. May be empty; the pipeline falls
    /// back to the file extension.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Attachment decode error. Surfaced as a visible, non-blocking notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    /// The picked file carried no data.
    EmptyFile { name: String },
    /// The file is not an embeddable image.
    NotAnImage { name: String, mime: String },
}

impl Display for AttachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile { name } => write!(f, "`{name}` is empty and cannot be attached"),
            Self::NotAnImage { name, mime } => {
                write!(f, "`{name}` ({mime}) is not an embeddable image")
            }
        }
    }
}

impl Error for AttachError {}

/// Encodes a picked file as a self-contained `data:` URI.
pub fn encode_data_uri(file: &PickedFile) -> Result<String, AttachError> {
    if file.bytes.is_empty() {
        return Err(AttachError::EmptyFile {
            name: file.name.clone(),
        });
    }

    let mime = resolve_mime(file)?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&file.bytes)))
}

/// Wraps an encoded image for body insertion.
///
/// The wrapper is non-editable so adjacent typing cannot merge into the
/// image node; a trailing empty paragraph continues the flow.
pub fn inline_image_fragment(data_uri: &str) -> String {
    format!(
        "<div class=\"inline-image-wrapper\">\
         <img src=\"{data_uri}\" class=\"inline-image\" contenteditable=\"false\">\
         </div>{EMPTY_PARAGRAPH}"
    )
}

fn resolve_mime(file: &PickedFile) -> Result<String, AttachError> {
    let reported = file.mime.trim();
    if !reported.is_empty() {
        if reported.starts_with("image/") {
            return Ok(reported.to_string());
        }
        return Err(AttachError::NotAnImage {
            name: file.name.clone(),
            mime: reported.to_string(),
        });
    }

    let extension = file
        .name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => Ok("image/png".to_string()),
        "jpg" | "jpeg" => Ok("image/jpeg".to_string()),
        "gif" => Ok("image/gif".to_string()),
        "webp" => Ok("image/webp".to_string()),
        "svg" => Ok("image/svg+xml".to_string()),
        _ => Err(AttachError::NotAnImage {
            name: file.name.clone(),
            mime: "unknown".to_string(),
        }),
    }
}
