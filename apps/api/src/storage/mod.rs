//! Post storage — where generated content goes once the caller decides to keep it.
//!
//! The core only knows the `PostStore` trait. `NoopStore` accepts and discards;
//! `FileStore` writes one markdown file per distinct title.
//!
//! `AppState` holds an `Arc<dyn PostStore>`, chosen at startup via `POSTS_DIR`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

pub mod handlers;

const MAX_SLUG_LEN: usize = 80;
const TITLE_KEY_LEN: usize = 8;

/// Distinguishes staging files of concurrent saves within one process.
static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a saved post ended up. `location` is `None` for stores that keep nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedPost {
    pub title: String,
    pub location: Option<PathBuf>,
}

/// Saving the same `(content, title)` any number of times must succeed and leave
/// the stored post intact.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn save(&self, content: &str, title: &str) -> Result<SavedPost, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// NoopStore
// ────────────────────────────────────────────────────────────────────────────

pub struct NoopStore;

#[async_trait]
impl PostStore for NoopStore {
    async fn save(&self, _content: &str, title: &str) -> Result<SavedPost, StoreError> {
        debug!("NoopStore discarding post '{title}'");
        Ok(SavedPost {
            title: title.to_string(),
            location: None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FileStore
// ────────────────────────────────────────────────────────────────────────────

/// Writes `<root>/<slug>-<key>.md`, where `key` is the first 8 hex digits of the
/// SHA-256 of the normalized title. Titles that slug the same still get their own
/// file; the same title always maps to the same file.
///
/// Each write lands in a temp file first and is renamed over the target, so a
/// reader never sees a half-written post.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        let title = normalize_title(title);
        let digest = hex::encode(Sha256::digest(title.as_bytes()));
        self.root
            .join(format!("{}-{}.md", slugify(&title), &digest[..TITLE_KEY_LEN]))
    }
}

#[async_trait]
impl PostStore for FileStore {
    async fn save(&self, content: &str, title: &str) -> Result<SavedPost, StoreError> {
        let title = normalize_title(title);
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let target = self.path_for(&title);
        let staging = staging_path(&target);
        let document = format!("# {title}\n\n{}\n", content.trim());

        if let Err(e) = write_then_rename(&staging, &target, document.as_bytes()).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }

        info!("Saved post '{title}' to {}", target.display());
        Ok(SavedPost {
            title,
            location: Some(target),
        })
    }
}

async fn write_then_rename(staging: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(staging, bytes).await?;
    tokio::fs::rename(staging, target).await
}

/// Trims and collapses every whitespace run (newlines included) to one space,
/// so the title fits on a single `# ` heading line.
fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
    target.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}

/// Lowercase ASCII alphanumerics; every other run of characters becomes one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let mut slug = slug.trim_end_matches('-').to_string();
    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        slug = slug.trim_end_matches('-').to_string();
    }

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
