use crate::{
    config::Config,
    error::{Error, Result},
    file::display_label,
};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// One line of the structure listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeEntry {
    /// Number of path segments between the root and this entry
    pub(crate) depth: usize,

    /// Basename as displayed
    pub(crate) name: String,

    /// Directories are rendered with a trailing `/`
    pub(crate) is_dir: bool,
}

/// Result of a single walk: the listing plus the files to concatenate.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    /// Structure listing in walk order
    pub(crate) tree: Vec<TreeEntry>,

    /// Files selected for the content section, in walk order
    pub(crate) sources: Vec<SourceCandidate>,

    /// Subdirectories that could not be read and were skipped
    pub(crate) skipped_dirs: usize,
}

/// A file selected for concatenation, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceCandidate {
    pub(crate) path: PathBuf,
    pub(crate) label: String,
}

impl Snapshot {
    pub(crate) fn directory_count(&self) -> usize {
        self.tree.iter().filter(|e| e.is_dir).count()
    }

    pub(crate) fn file_count(&self) -> usize {
        self.tree.iter().filter(|e| !e.is_dir).count()
    }
}

/// Walks the root directory with the configured pruning rules.
pub(crate) struct Scanner<'a> {
    config: &'a Config,
}

impl<'a> Scanner<'a> {
    pub(crate) const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Walks the tree once, recording every listed entry and content candidate.
    ///
    /// Siblings are visited files first, then directories, each group by name,
    /// so a directory line is followed by its files and then its subtrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the root itself cannot be enumerated. Failures
    /// below the root are logged and the affected subtree is skipped.
    pub(crate) fn scan(&self) -> Result<Snapshot> {
        let root = &self.config.root_dir;
        let mut snapshot = Snapshot::default();

        debug!("Walking {}", root.display());

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(Error::walk(root, &e)),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    snapshot.skipped_dirs += 1;
                    continue;
                }
            };

            // Linked directories are neither listed nor entered.
            if entry.depth() > 0 && is_linked_dir(&entry) {
                trace!("Skipping linked directory {}", entry.path().display());
                continue;
            }

            let is_dir = entry.file_type().is_dir();
            let name = entry_name(&entry, root);
            trace!("Visited {}{}", name, if is_dir { "/" } else { "" });

            let selected = !is_dir && self.config.is_content_file(&name);
            snapshot.tree.push(TreeEntry {
                depth: entry.depth(),
                name,
                is_dir,
            });

            if selected {
                snapshot.sources.push(SourceCandidate {
                    label: display_label(entry.path(), root),
                    path: entry.into_path(),
                });
            }
        }

        debug!(
            "Walk complete: {} directories, {} files, {} to concatenate, {} skipped",
            snapshot.directory_count(),
            snapshot.file_count(),
            snapshot.sources.len(),
            snapshot.skipped_dirs
        );

        Ok(snapshot)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && (entry.file_type().is_dir() || is_linked_dir(entry))
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.config.is_excluded_dir(name))
    }
}

fn is_linked_dir(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && entry.path().is_dir()
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Displayed basename; the root falls back to the path as given (e.g. `.`).
fn entry_name(entry: &DirEntry, root: &Path) -> String {
    if entry.depth() == 0 {
        return root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
    }
    entry.file_name().to_string_lossy().into_owned()
}
