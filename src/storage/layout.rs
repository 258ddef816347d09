//! Per-domain output folder layout.

use std::path::{Path, PathBuf};

use crate::utils::sanitize_folder_name;

/// Folders of one harvested site, rooted at `<save_root>/<sanitized domain>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub base: PathBuf,
    pub html: PathBuf,
    pub css: PathBuf,
    pub js: PathBuf,
    pub images: PathBuf,
    pub videos: PathBuf,
    pub data: PathBuf,
}

impl OutputLayout {
    /// Computes the layout without touching the filesystem.
    pub fn new(save_root: &Path, domain: &str) -> Self {
        let base = save_root.join(sanitize_folder_name(domain));
        Self {
            html: base.join("html"),
            css: base.join("css"),
            js: base.join("js"),
            images: base.join("images"),
            videos: base.join("videos"),
            data: base.join("data"),
            base,
        }
    }

    /// Computes the layout and creates every folder (existing ones are kept).
    ///
    /// # Errors
    ///
    /// Returns the failing folder and the I/O error.
    pub async fn create(save_root: &Path, domain: &str) -> Result<Self, (PathBuf, std::io::Error)> {
        let layout = Self::new(save_root, domain);
        for folder in layout.folders() {
            tokio::fs::create_dir_all(folder)
                .await
                .map_err(|e| (folder.to_path_buf(), e))?;
        }
        log::info!("Created folder structure at {}", layout.base.display());
        Ok(layout)
    }

    fn folders(&self) -> [&Path; 7] {
        [
            self.base.as_path(),
            self.html.as_path(),
            self.css.as_path(),
            self.js.as_path(),
            self.images.as_path(),
            self.videos.as_path(),
            self.data.as_path(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new(Path::new("/out"), "example.com");
        assert_eq!(layout.base, PathBuf::from("/out/example.com"));
        assert_eq!(layout.images, PathBuf::from("/out/example.com/images"));
        assert_eq!(layout.data, PathBuf::from("/out/example.com/data"));
    }

    #[test]
    fn test_layout_sanitizes_domain() {
        let layout = OutputLayout::new(Path::new("/out"), "localhost:8080");
        assert_eq!(layout.base, PathBuf::from("/out/localhost_8080"));
        let layout = OutputLayout::new(Path::new("/out"), "");
        assert_eq!(layout.base, PathBuf::from("/out/unnamed"));
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let first = OutputLayout::create(dir.path(), "example.com").await.unwrap();
        let second = OutputLayout::create(dir.path(), "example.com").await.unwrap();
        assert_eq!(first, second);
        for sub in ["html", "css", "js", "images", "videos", "data"] {
            assert!(first.base.join(sub).is_dir(), "{} missing", sub);
        }
    }
}
