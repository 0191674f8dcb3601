//! Content type lookup for embedded assets.

use std::path::Path;

use mime_guess::mime;

/// Content type for `path` if it is an image that can be inlined as a data URI.
///
/// The guess comes from the file extension (case-insensitive).
pub fn image_mime(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .filter(|guess| guess.type_() == mime::IMAGE)
        .map(|guess| guess.essence_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a/1.png")).as_deref(), Some("image/png"));
        assert_eq!(image_mime(Path::new("2.JPG")).as_deref(), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("x.svg")).as_deref(), Some("image/svg+xml"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("scan.pdf")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }
}
