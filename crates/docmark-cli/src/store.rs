//! Page storage.
//!
//! Page paths are slash-separated names without an extension: `"guide"`,
//! `"motion/move"`. [`FsStore`] maps them to `<root>/<path>.md`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::thread;
use std::time::Duration;

use docmark_core::marks_hidden;
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// Page text substituted when a page cannot be loaded.
pub(crate) const NOT_FOUND_PAGE: &str =
    "# Not Found\n\nThe requested documentation page could not be loaded from the server.";

const PAGE_EXTENSION: &str = "md";

/// Source of page text.
pub(crate) trait DocumentStore {
    /// Read the text of one page.
    fn read(&self, path: &str) -> Result<String, StoreError>;

    /// Every page path in the store, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Pages stored as `.md` files under a root directory.
#[derive(Debug, Clone)]
pub(crate) struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `path`, rejecting paths that could leave the root.
    fn page_file(&self, path: &str) -> Result<PathBuf, StoreError> {
        let trimmed = path.trim_matches('/');
        let relative = Path::new(trimmed);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

        if trimmed.is_empty() || escapes {
            return Err(StoreError::InvalidPath(path.to_owned()));
        }

        Ok(self.root.join(format!("{trimmed}.{PAGE_EXTENSION}")))
    }

    fn collect_pages(&self, dir: &Path, out: &mut Vec<String>) -> Result<(), StoreError> {
        let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| StoreError::Io {
                path: entry.path(),
                source,
            })?;
            let path = entry.path();

            // Symlinked directories are not followed.
            if file_type.is_dir() {
                self.collect_pages(&path, out)?;
            } else if path.extension().is_some_and(|ext| ext == PAGE_EXTENSION) {
                if let Some(page) = self.page_path(&path) {
                    out.push(page);
                }
            }
        }

        Ok(())
    }

    /// Page path for a file under the root.
    fn page_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.root).ok()?.with_extension("");
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

impl DocumentStore for FsStore {
    fn read(&self, path: &str) -> Result<String, StoreError> {
        let file = self.page_file(path)?;
        fs::read_to_string(&file).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.to_owned())
            } else {
                StoreError::Io { path: file, source }
            }
        })
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        self.collect_pages(&self.root, &mut pages)?;
        pages.sort();
        Ok(pages)
    }
}

/// How many times to read a page and how long to wait between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Delay before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

/// Outcome of [`fetch_with_retry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fetched {
    Page(String),
    /// The page could not be loaded; [`NOT_FOUND_PAGE`] stands in for it.
    Placeholder,
}

impl Fetched {
    pub(crate) fn text(&self) -> &str {
        match self {
            Fetched::Page(text) => text,
            Fetched::Placeholder => NOT_FOUND_PAGE,
        }
    }

    pub(crate) fn is_placeholder(&self) -> bool {
        matches!(self, Fetched::Placeholder)
    }
}

/// Read a page, retrying transient failures with linear backoff.
///
/// Never fails: a missing page, an invalid path, or a read that still fails
/// after the last attempt all yield [`Fetched::Placeholder`].
pub(crate) fn fetch_with_retry<S>(store: &S, path: &str, policy: RetryPolicy) -> Fetched
where
    S: DocumentStore + ?Sized,
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..=attempts {
        match store.read(path) {
            Ok(text) => {
                debug!(path, attempt, len = text.len(), "fetched page");
                return Fetched::Page(text);
            }
            Err(err) if err.is_transient() && attempt < attempts => {
                let delay = policy.backoff * attempt;
                warn!(path, attempt, attempts, error = %err, ?delay, "page read failed, retrying");
                thread::sleep(delay);
            }
            Err(err) => {
                warn!(path, attempt, error = %err, "giving up on page");
                return Fetched::Placeholder;
            }
        }
    }

    Fetched::Placeholder
}

/// Set of pages whose front matter marks them hidden.
#[derive(Debug, Default)]
pub(crate) struct HiddenIndex {
    hidden: BTreeSet<String>,
}

impl HiddenIndex {
    /// Build the index by reading every page in `store`.
    ///
    /// Pages that fail to read are logged and treated as visible.
    pub(crate) fn scan<S>(store: &S) -> Result<Self, StoreError>
    where
        S: DocumentStore + ?Sized,
    {
        let mut index = Self::default();
        for path in store.list()? {
            index.refresh(store, &path);
        }
        info!(hidden = index.hidden.len(), "built hidden page index");
        Ok(index)
    }

    /// Re-read one page and update its entry.
    pub(crate) fn refresh<S>(&mut self, store: &S, path: &str)
    where
        S: DocumentStore + ?Sized,
    {
        match store.read(path) {
            Ok(text) if marks_hidden(&text) => {
                if self.hidden.insert(path.to_owned()) {
                    debug!(path, "page marked hidden");
                }
            }
            Ok(_) => {
                self.hidden.remove(path);
            }
            Err(err) => {
                warn!(path, error = %err, "could not read page for visibility check");
            }
        }
    }

    pub(crate) fn is_visible(&self, path: &str) -> bool {
        !self.hidden.contains(path)
    }

    /// Hidden page paths in sorted order.
    pub(crate) fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.hidden.len()
    }
}
