//! On-disk storage for uploads, previews and exported models.
//!
//! ```text
//! <root>/
//!   uploads/    source images for export and the exported models
//!   previews/   source images for preview and the two preview PNGs
//! ```
//!
//! Stored names are `{uuid}_{original}` so concurrent uploads of the
//! same file never collide. Downloads are looked up by bare file name
//! in `uploads/` first, then `previews/`.

use std::io;
use std::path::{Path, PathBuf};

const UPLOADS: &str = "uploads";
const PREVIEWS: &str = "previews";

/// Root of the storage tree.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Use `root` as the storage directory. Nothing is created until
    /// [`ensure_dirs`](Self::ensure_dirs) runs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root, served under `/static`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for export uploads and models.
    #[must_use]
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS)
    }

    /// Directory for preview uploads and images.
    #[must_use]
    pub fn previews_dir(&self) -> PathBuf {
        self.root.join(PREVIEWS)
    }

    /// Create both subdirectories if they are missing.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors.
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(self.uploads_dir()).await?;
        tokio::fs::create_dir_all(self.previews_dir()).await
    }

    /// Find a stored file by name.
    ///
    /// Returns `None` for names that could escape the storage
    /// directories and for files that do not exist.
    pub async fn find(&self, name: &str) -> Option<PathBuf> {
        if !is_plain_name(name) {
            return None;
        }
        for dir in [self.uploads_dir(), self.previews_dir()] {
            let path = dir.join(name);
            if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                return Some(path);
            }
        }
        None
    }
}

/// A collision-free stored name for an uploaded file.
#[must_use]
pub fn unique_name(original: &str) -> String {
    format!("{}_{}", uuid::Uuid::new_v4().simple(), sanitize(original))
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped, characters outside `[A-Za-z0-9._-]`
/// become `_`, and leading dots are removed.
#[must_use]
pub fn sanitize(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_owned()
    } else {
        cleaned.to_owned()
    }
}

/// Whether `name` is a single, non-hidden path component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
