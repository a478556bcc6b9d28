//! Writing the bitmap to PNG files.

use crate::draw::DrawingContext;
use crate::error::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSaveConfig {
    /// Directory to save images to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Sketchpad"),
            filename_template: "sketchpad_%Y-%m-%d_%H%M%S".to_string(),
            format: "png".to_string(),
        }
    }
}

/// Generate a filename based on the template and current time.
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// Returns the canonicalized path to the directory.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        log::info!("Creating image directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes the bitmap as a PNG file at `path`, replacing any existing file.
pub fn save_png(cx: &DrawingContext, path: &Path) -> Result<()> {
    let mut bytes = Vec::new();
    cx.write_png(&mut bytes)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }
    fs::write(path, &bytes)?;

    // Set permissions to user read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    log::info!(
        "Saved {}x{} image to {} ({} bytes)",
        cx.width(),
        cx.height(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Saves the bitmap under a generated file name in the configured directory.
///
/// Returns the path written.
pub fn save_image(cx: &DrawingContext, config: &FileSaveConfig) -> Result<PathBuf> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(&config.filename_template, &config.format);
    let file_path = directory.join(&filename);
    save_png(cx, &file_path)?;
    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::PaintStyle;

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("test_%Y%m%d", "png");
        assert!(filename.starts_with("test_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), "test_20260101.png".len());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn save_image_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileSaveConfig {
            save_directory: dir.path().join("nested").join("out"),
            filename_template: "drawing".to_string(),
            format: "png".to_string(),
        };
        let cx = DrawingContext::new(16, 9, PaintStyle::default()).unwrap();

        let path = save_image(&cx, &config).unwrap();
        assert!(path.ends_with("drawing.png"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
