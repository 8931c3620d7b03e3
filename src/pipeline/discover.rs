//! File discovery: walk the papers directory and keep glob matches.

use crate::error::ThumbError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// `*` stays within one path component; `**/` spans directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Find every regular file under `dir` whose path relative to `dir`
/// matches `pattern`.
///
/// Symlinks are followed, so a link to a PDF (or to a directory of PDFs)
/// is matched under the link's own name. Link cycles are reported by the
/// walker and skipped.
///
/// The result is sorted so that repeated runs over an unchanged tree produce
/// the same order (and therefore the same manifest).
pub fn discover_pdfs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ThumbError> {
    let matcher = Pattern::new(pattern).map_err(|e| ThumbError::InvalidGlob {
        pattern: pattern.to_string(),
        detail: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if matcher.matches_path_with(rel, MATCH_OPTIONS) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(
        "Matched {} files with '{}' under {}",
        files.len(),
        pattern,
        dir.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, b"%PDF-1.4\n").unwrap();
    }

    fn rels(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn recursive_pattern_includes_top_level_and_nested() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.pdf");
        touch(tmp.path(), "a.pdf");
        touch(tmp.path(), "2024/c.pdf");
        touch(tmp.path(), "2024/notes.txt");

        let found = discover_pdfs(tmp.path(), "**/*.pdf").unwrap();
        assert_eq!(
            rels(tmp.path(), &found),
            vec!["2024/c.pdf", "a.pdf", "b.pdf"]
        );
    }

    #[test]
    fn single_star_does_not_cross_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.pdf");
        touch(tmp.path(), "sub/b.pdf");

        let found = discover_pdfs(tmp.path(), "*.pdf").unwrap();
        assert_eq!(rels(tmp.path(), &found), vec!["a.pdf"]);
    }

    #[test]
    fn directories_named_like_pdfs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("weird.pdf")).unwrap();
        touch(tmp.path(), "real.pdf");

        let found = discover_pdfs(tmp.path(), "**/*.pdf").unwrap();
        assert_eq!(rels(tmp.path(), &found), vec!["real.pdf"]);
    }

    #[test]
    fn no_matches_is_an_empty_list() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "readme.md");
        assert!(discover_pdfs(tmp.path(), "**/*.pdf").unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = discover_pdfs(tmp.path(), "[").unwrap_err();
        assert!(matches!(err, ThumbError::InvalidGlob { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_pdfs_are_matched_under_link_name() {
        let tmp = TempDir::new().unwrap();
        let store = tmp.path().join("store");
        let papers = tmp.path().join("papers");
        touch(&store, "real.pdf");
        touch(&store, "shelf/deep.pdf");
        fs::create_dir_all(&papers).unwrap();
        std::os::unix::fs::symlink(store.join("real.pdf"), papers.join("linked.pdf")).unwrap();
        std::os::unix::fs::symlink(store.join("shelf"), papers.join("shelf")).unwrap();

        let found = discover_pdfs(&papers, "**/*.pdf").unwrap();
        assert_eq!(rels(&papers, &found), vec!["linked.pdf", "shelf/deep.pdf"]);
    }
}
