//! Inline image attachments.
//!
//! Images travel inside the JSON body as `data:` URLs, so they are capped
//! client-side before anything is encoded or sent.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::resource::ValidationError;

/// Largest accepted attachment, in bytes (1 MiB).
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

/// Encodes raw image bytes as a `data:<mime>;base64,...` URL.
pub fn encode_image(bytes: &[u8], mime: &str) -> Result<String, ValidationError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge { size: bytes.len() });
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Guesses an image MIME type from a file extension (case-insensitive).
pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
