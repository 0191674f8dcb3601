//! Shared utility functions.
//!
//! - `mime`: content type lookup for embedded images
//! - `format`: human-readable sizes for reports

mod format;
mod mime;

pub use format::format_size;
pub use mime::image_mime;
