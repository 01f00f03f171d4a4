use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Something that lets the user choose a file. `None` means the pick was
/// cancelled.
pub trait FilePicker {
    fn pick(&self) -> Option<PathBuf>;
}

/// Picks among the files in `dir` matching a glob filter (`*.json` by
/// default). Candidates are sorted by path; `selection` is 1-based.
#[derive(Debug, Clone)]
pub struct GlobPicker {
    dir: PathBuf,
    filter: String,
    selection: Option<usize>,
}

impl GlobPicker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter: "*.json".to_string(),
            selection: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_selection(mut self, selection: Option<usize>) -> Self {
        self.selection = selection;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All regular files in `dir` matching the filter, sorted.
    pub fn candidates(&self) -> Result<Vec<PathBuf>, glob::PatternError> {
        let pattern = format!(
            "{}/{}",
            Pattern::escape(&self.dir.to_string_lossy()),
            self.filter
        );
        let opts = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        let mut found = Vec::new();
        for entry in glob_with(&pattern, opts)? {
            match entry {
                Ok(path) if path.is_file() => found.push(path),
                Ok(_) => {}
                Err(e) => warn!("cannot read glob entry: {}", e),
            }
        }
        found.sort();
        debug!(dir = %self.dir.display(), n = found.len(), "listed candidates");
        Ok(found)
    }
}

impl FilePicker for GlobPicker {
    fn pick(&self) -> Option<PathBuf> {
        let n = self.selection?;
        let candidates = match self.candidates() {
            Ok(c) => c,
            Err(e) => {
                warn!("bad picker filter {:?}: {}", self.filter, e);
                return None;
            }
        };
        n.checked_sub(1).and_then(|i| candidates.get(i)).cloned()
    }
}
