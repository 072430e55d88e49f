//! Document index + keyword search over a markdown workspace.
//!
//! Matching is title-substring based. The index is built once at startup by
//! walking the workspace root; search itself is cheap enough to run per
//! query on a background thread.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ignore::WalkBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot read workspace root: {0}")]
    Io(#[from] std::io::Error),
}

/// One document summary returned from a search.
#[derive(Debug, Clone)]
pub struct DocumentHit {
    /// Workspace-relative path, unique within the index.
    pub id: String,
    pub title: String,
    /// Top-level folder the document lives in, `"/"` for root-level docs.
    pub workspace: String,
    /// From `author:` front matter, when present.
    pub author: Option<String>,
    pub updated_at: DateTime<Local>,
    pub path: PathBuf,
}

/// The injected query function the search modal runs against.
pub trait DocumentSearcher: Send + Sync {
    fn search(&self, keyword: &str, limit: usize) -> Result<Vec<DocumentHit>, SearchError>;
}

#[derive(Debug, Clone)]
struct DocEntry {
    hit: DocumentHit,
    title_lower: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankKey {
    exact: bool,
    prefix: bool,
    match_pos: usize,
    title_len: usize,
}

impl RankKey {
    fn cmp_better(self, other: Self) -> Ordering {
        // "Better" should come first in ascending sort.
        other
            .exact
            .cmp(&self.exact)
            .then_with(|| other.prefix.cmp(&self.prefix))
            .then_with(|| self.match_pos.cmp(&other.match_pos))
            .then_with(|| self.title_len.cmp(&other.title_len))
    }
}

/// In-memory index of every markdown document under a workspace root.
pub struct WorkspaceIndex {
    entries: Vec<DocEntry>,
}

impl WorkspaceIndex {
    /// Walk `root` and index every markdown file found.
    ///
    /// Unreadable individual files are skipped, not fatal — only a missing
    /// root is an error.
    pub fn build(root: &Path, show_hidden: bool) -> Result<Self, SearchError> {
        let root = root.canonicalize()?;
        let t0 = std::time::Instant::now();

        let walker = WalkBuilder::new(&root)
            .hidden(!show_hidden)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut entries = Vec::new();
        for entry in walker.flatten() {
            let path = entry.path();
            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            if !is_file || !is_markdown(path) {
                continue;
            }
            if let Some(doc) = index_document(&root, path) {
                entries.push(doc);
            }
        }

        tracing::debug!(
            "indexed {} documents under {} in {:.2?}",
            entries.len(),
            root.display(),
            t0.elapsed()
        );
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DocumentSearcher for WorkspaceIndex {
    fn search(&self, keyword: &str, limit: usize) -> Result<Vec<DocumentHit>, SearchError> {
        let q = keyword.trim();
        if q.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let q_lower = q.to_lowercase();

        let mut ranked: Vec<(RankKey, &DocEntry)> = Vec::new();
        for entry in &self.entries {
            let Some(pos) = entry.title_lower.find(&q_lower) else {
                continue;
            };
            ranked.push((
                RankKey {
                    exact: entry.title_lower == q_lower,
                    prefix: entry.title_lower.starts_with(&q_lower),
                    match_pos: pos,
                    title_len: entry.hit.title.chars().count(),
                },
                entry,
            ));
        }

        ranked.sort_by(|(a_rank, a_entry), (b_rank, b_entry)| {
            a_rank
                .cmp_better(*b_rank)
                .then_with(|| a_entry.hit.id.cmp(&b_entry.hit.id))
        });
        ranked.truncate(limit);

        Ok(ranked.into_iter().map(|(_, e)| e.hit.clone()).collect())
    }
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("markdown")
    )
}

/// Build a single index entry, or `None` when the file is unreadable.
fn index_document(root: &Path, path: &Path) -> Option<DocEntry> {
    let rel = path.strip_prefix(root).ok()?;
    let id = rel.to_string_lossy().into_owned();

    let workspace = match rel.components().count() {
        0 | 1 => "/".to_string(),
        _ => rel
            .components()
            .next()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())?,
    };

    let contents = std::fs::read_to_string(path).unwrap_or_default();
    let (title, author) = extract_meta(&contents);
    let title = title.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.clone())
    });

    let updated_at = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now());

    Some(DocEntry {
        title_lower: title.to_lowercase(),
        hit: DocumentHit {
            id,
            title,
            workspace,
            author,
            updated_at,
            path: path.to_path_buf(),
        },
    })
}

/// Pull the title (first `#` heading) and author (`author:` front matter)
/// out of a document's leading lines.
fn extract_meta(contents: &str) -> (Option<String>, Option<String>) {
    let mut title = None;
    let mut author = None;
    let mut in_front_matter = false;

    for (i, line) in contents.lines().take(40).enumerate() {
        let trimmed = line.trim();
        if i == 0 && trimmed == "---" {
            in_front_matter = true;
            continue;
        }
        if in_front_matter {
            if trimmed == "---" {
                in_front_matter = false;
            } else if let Some(rest) = trimmed.strip_prefix("author:") {
                let rest = rest.trim().trim_matches('"');
                if !rest.is_empty() {
                    author = Some(rest.to_string());
                }
            } else if let Some(rest) = trimmed.strip_prefix("title:") {
                let rest = rest.trim().trim_matches('"');
                if !rest.is_empty() && title.is_none() {
                    title = Some(rest.to_string());
                }
            }
            continue;
        }
        if title.is_none() {
            if let Some(rest) = trimmed.strip_prefix('#') {
                let rest = rest.trim_start_matches('#').trim();
                if !rest.is_empty() {
                    title = Some(rest.to_string());
                    break;
                }
            }
        }
    }

    (title, author)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_doc(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn indexes_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "notes.md", "# Meeting Notes\n");
        write_doc(dir.path(), "scratch.txt", "not a document");
        let index = WorkspaceIndex::build(dir.path(), false).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn title_from_heading_author_from_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "guides/onboarding.md",
            "---\nauthor: Sam Doe\n---\n\n# Onboarding Guide\n\nbody\n",
        );
        let index = WorkspaceIndex::build(dir.path(), false).unwrap();
        let hits = index.search("onboarding", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Onboarding Guide");
        assert_eq!(hits[0].author.as_deref(), Some("Sam Doe"));
        assert_eq!(hits[0].workspace, "guides");
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "roadmap.md", "no heading here\n");
        let index = WorkspaceIndex::build(dir.path(), false).unwrap();
        let hits = index.search("roadmap", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "roadmap");
        assert_eq!(hits[0].workspace, "/");
    }

    #[test]
    fn ranking_prefers_exact_then_prefix() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "a.md", "# Release Plan Draft\n");
        write_doc(dir.path(), "b.md", "# Plan\n");
        write_doc(dir.path(), "c.md", "# Plan B\n");
        let index = WorkspaceIndex::build(dir.path(), false).unwrap();
        let hits = index.search("plan", 10).unwrap();
        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Plan", "Plan B", "Release Plan Draft"]);
    }

    #[test]
    fn blank_keyword_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "a.md", "# Anything\n");
        let index = WorkspaceIndex::build(dir.path(), false).unwrap();
        assert!(index.search("   ", 10).unwrap().is_empty());
        assert!(index.search("anything", 0).unwrap().is_empty());
    }

    #[test]
    fn limit_truncates_results() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write_doc(dir.path(), &format!("doc{i}.md"), "# Weekly Sync\n");
        }
        let index = WorkspaceIndex::build(dir.path(), false).unwrap();
        assert_eq!(index.search("weekly", 3).unwrap().len(), 3);
    }
}
