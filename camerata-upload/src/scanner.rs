//! Image file discovery for bulk upload
//!
//! Non-recursive: the upload folder is a staging area, not a library.
//! Extension allow-list first (fast), magic-byte verification second
//! (reliable); files that look like an image by name but not by content are
//! skipped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions accepted for gallery upload
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Cannot access file
    #[error("File access error {0}: {1}")]
    FileAccessError(PathBuf, String),
}

/// Image file scanner for the upload staging directory
pub struct ImageScanner;

impl ImageScanner {
    pub fn new() -> Self {
        Self
    }

    /// List image files directly inside `dir`, sorted by file name for a
    /// deterministic upload order.
    pub fn scan(&self, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !dir.exists() {
            return Err(ScanError::PathNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }

        let entries = std::fs::read_dir(dir)
            .map_err(|e| ScanError::FileAccessError(dir.to_path_buf(), e.to_string()))?;

        let mut images = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if !has_allowed_extension(&path) {
                continue;
            }
            match self.verify_image_magic(&path) {
                Ok(true) => images.push(path),
                Ok(false) => {
                    tracing::warn!("Skipping {}: not an image by content", path.display());
                }
                Err(e) => tracing::warn!("Error verifying {}: {}", path.display(), e),
            }
        }

        images.sort();
        Ok(images)
    }

    /// Verify file content actually is an image
    fn verify_image_magic(&self, path: &Path) -> Result<bool, ScanError> {
        let mut file = File::open(path)
            .map_err(|e| ScanError::FileAccessError(path.to_path_buf(), e.to_string()))?;

        let mut buffer = [0u8; 32];
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| ScanError::FileAccessError(path.to_path_buf(), e.to_string()))?;

        Ok(infer::get(&buffer[..bytes_read])
            .map(|kind| kind.mime_type().starts_with("image/"))
            .unwrap_or(false))
    }
}

impl Default for ImageScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// MIME type for an allowed extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Catalog title from a file name: stem with underscores and hyphens
/// turned into spaces.
pub fn title_from_filename(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .map(|title| title.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Minimal valid PNG header
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_extension_allow_list() {
        assert!(has_allowed_extension(Path::new("a.jpg")));
        assert!(has_allowed_extension(Path::new("a.JPEG")));
        assert!(has_allowed_extension(Path::new("a.webp")));
        assert!(!has_allowed_extension(Path::new("a.txt")));
        assert!(!has_allowed_extension(Path::new("a.mp3")));
        assert!(!has_allowed_extension(Path::new("noext")));
    }

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("a.gif")), "image/gif");
    }

    #[test]
    fn test_title_from_filename_prettifies() {
        assert_eq!(
            title_from_filename(Path::new("concerto_di-primavera.jpg")),
            "concerto di primavera"
        );
        assert_eq!(title_from_filename(Path::new("shot.png")), "shot");
    }

    #[test]
    fn test_scan_missing_directory() {
        let scanner = ImageScanner::new();
        let result = scanner.scan(Path::new("/nonexistent/upload-dir"));
        assert!(matches!(result, Err(ScanError::PathNotFound(_))));
    }

    #[test]
    fn test_scan_filters_by_content_and_extension() {
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("cover_art.png");
        File::create(&png).unwrap().write_all(PNG_MAGIC).unwrap();

        // Allowed extension but not an image by content
        let fake = dir.path().join("fake.jpg");
        File::create(&fake)
            .unwrap()
            .write_all(b"just some text")
            .unwrap();

        // Disallowed extension
        let text = dir.path().join("notes.txt");
        File::create(&text).unwrap().write_all(b"notes").unwrap();

        let scanner = ImageScanner::new();
        let images = scanner.scan(dir.path()).unwrap();
        assert_eq!(images, vec![png]);
    }
}
