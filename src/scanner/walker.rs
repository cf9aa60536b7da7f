//! Concurrent repository tree walk
//!
//! Lists the root of a repository's contents and recursively expands every
//! subdirectory. Subdirectories found in one listing are expanded concurrently and
//! awaited together, so fan-out at each node equals its subdirectory count.
//!
//! Walks are unbounded by default. `with_ceiling` caps the number of listing
//! calls in flight across the whole walk, which deviates from the plain
//! one-request-per-subdirectory behaviour and is therefore opt-in.
//!
//! YAML paths are recorded in the order sibling branches reach them, which
//! depends on response latency; the first path is not deterministic.

use crate::core::sync::handle_mutex_poison;
use crate::scanner::error::ProviderError;
use crate::scanner::provider::{decode_items, AccessToken, ContentEntry, EntryType, GitHubApi};
use crate::scanner::urls::join_path;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// Result of one completed walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeScan {
    pub file_count: usize,
    /// YAML file paths in discovery order
    pub yml_paths: Vec<String>,
}

impl TreeScan {
    pub fn first_yml_path(&self) -> Option<&str> {
        self.yml_paths.first().map(String::as_str)
    }
}

/// State shared by every branch of a single walk
#[derive(Debug, Default)]
pub struct ScanAccumulator {
    amount: AtomicUsize,
    yml_paths: Mutex<Vec<String>>,
}

impl ScanAccumulator {
    /// Count a file node and remember it if it is a YAML file
    pub fn record_file(&self, entry: &ContentEntry) -> Result<(), ProviderError> {
        self.amount.fetch_add(1, Ordering::SeqCst);

        if is_yaml_file(&entry.name) {
            let mut paths =
                handle_mutex_poison(self.yml_paths.lock(), ProviderError::Synchronisation)?;
            paths.push(entry.path.clone());
        }
        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.amount.load(Ordering::SeqCst)
    }

    fn into_scan(self) -> Result<TreeScan, ProviderError> {
        let yml_paths =
            handle_mutex_poison(self.yml_paths.into_inner(), ProviderError::Synchronisation)?;
        Ok(TreeScan {
            file_count: self.amount.into_inner(),
            yml_paths,
        })
    }
}

pub fn is_yaml_file(name: &str) -> bool {
    name.ends_with(".yml") || name.ends_with(".yaml")
}

/// Recursive, concurrent walker over a repository's `/contents` endpoint
pub struct DirectoryWalker<'a> {
    api: &'a dyn GitHubApi,
    ceiling: Option<Semaphore>,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(api: &'a dyn GitHubApi) -> Self {
        Self { api, ceiling: None }
    }

    /// Cap in-flight listing calls for the whole walk (`None` keeps it unbounded)
    pub fn with_ceiling(mut self, limit: Option<usize>) -> Self {
        self.ceiling = limit.map(|limit| Semaphore::new(limit.max(1)));
        self
    }

    /// Walk the tree below `root_url`
    ///
    /// Subdirectory listings are requested at `<root_url>/<entry path>`, each path
    /// component percent-encoded. Any failing listing aborts the walk and no partial
    /// counts are returned.
    pub async fn walk(
        &self,
        root_url: &str,
        token: &AccessToken,
    ) -> Result<TreeScan, ProviderError> {
        let accumulator = ScanAccumulator::default();
        self.walk_dir(root_url, root_url.to_string(), token, &accumulator)
            .await?;

        let scan = accumulator.into_scan()?;
        log::debug!(
            "Walked {}: {} files, {} YAML files",
            root_url,
            scan.file_count,
            scan.yml_paths.len()
        );
        Ok(scan)
    }

    fn walk_dir<'w>(
        &'w self,
        root_url: &'w str,
        dir_url: String,
        token: &'w AccessToken,
        accumulator: &'w ScanAccumulator,
    ) -> BoxFuture<'w, Result<(), ProviderError>> {
        async move {
            let entries: Vec<ContentEntry> = decode_items(self.list(&dir_url, token).await?)?;

            let mut subdirectories = Vec::new();
            for entry in &entries {
                match entry.entry_type {
                    EntryType::File => accumulator.record_file(entry)?,
                    EntryType::Dir => subdirectories.push(join_path(root_url, &entry.path)?),
                    // symlinks and submodules are neither files nor walkable directories
                    EntryType::Other => {}
                }
            }

            try_join_all(
                subdirectories
                    .into_iter()
                    .map(|url| self.walk_dir(root_url, url, token, accumulator)),
            )
            .await?;
            Ok(())
        }
        .boxed()
    }

    async fn list(
        &self,
        url: &str,
        token: &AccessToken,
    ) -> Result<serde_json::Value, ProviderError> {
        // The permit covers only the listing call, never the recursion below it
        let _permit = match &self.ceiling {
            Some(ceiling) => Some(ceiling.acquire().await.map_err(|e| {
                ProviderError::Synchronisation(format!("Walk ceiling closed: {}", e))
            })?),
            None => None,
        };
        self.api.get_json(url, token).await
    }
}
