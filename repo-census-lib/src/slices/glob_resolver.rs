use super::LOG_TARGET;
use crate::Result;
use globset::{GlobBuilder, GlobMatcher};
use ohno::IntoAppError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One path component of a [`GlobPattern`].
#[derive(Debug, Clone)]
enum Segment {
    /// `**`: zero or more components, none of them hidden.
    AnyDepth,

    /// A single component. Only a segment spelled with a leading `.` may match a hidden name.
    Component { matcher: GlobMatcher, dot: bool },
}

/// A compiled glob pattern, relative to a repository root.
///
/// Patterns are split on `/` and matched a component at a time:
///
/// - `*`, `?`, `[...]` and `{a,b}` never cross a `/`.
/// - `**` as a whole component matches any number of directories, so `dir/**` matches
///   everything below `dir`.
/// - Names starting with `.` are only matched by a component that starts with `.` too.
/// - Matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    text: String,
    segments: Vec<Segment>,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim_start_matches("./");
        let mut segments = Vec::new();

        for part in trimmed.split('/').filter(|p| !p.is_empty()) {
            if part == "**" {
                if !matches!(segments.last(), Some(Segment::AnyDepth)) {
                    segments.push(Segment::AnyDepth);
                }
                continue;
            }

            let glob = GlobBuilder::new(part)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .into_app_err_with(|| format!("invalid glob pattern '{pattern}'"))?;

            segments.push(Segment::Component {
                matcher: glob.compile_matcher(),
                dot: part.starts_with('.'),
            });
        }

        Ok(Self {
            text: pattern.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether a component of this pattern can match a hidden name.
    #[must_use]
    pub fn matches_hidden(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Component { dot: true, .. }))
    }

    /// Match a path given as its components relative to the root.
    #[must_use]
    pub fn is_match<S: AsRef<str>>(&self, components: &[S]) -> bool {
        !self.segments.is_empty() && match_segments(&self.segments, components)
    }
}

fn match_segments<S: AsRef<str>>(segments: &[Segment], components: &[S]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return components.is_empty();
    };

    match segment {
        Segment::AnyDepth => {
            for skip in 0..=components.len() {
                if match_segments(rest, &components[skip..]) {
                    return true;
                }

                if components.get(skip).is_some_and(|c| c.as_ref().starts_with('.')) {
                    return false;
                }
            }
            false
        }

        Segment::Component { matcher, dot } => {
            let Some((first, tail)) = components.split_first() else {
                return false;
            };

            let name = first.as_ref();
            (*dot || !name.starts_with('.')) && matcher.is_match(name) && match_segments(rest, tail)
        }
    }
}

/// Expand `patterns` against `base`, returning absolute paths.
///
/// Each path appears once, at the position of its first match; within one pattern paths
/// come in walk order, sorted by name. A missing `base` simply matches nothing. Files and
/// directories are both returned.
pub fn resolve(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = patterns.iter().map(|p| GlobPattern::new(p)).collect::<Result<Vec<_>>>()?;
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let base = std::path::absolute(base).into_app_err_with(|| format!("resolving directory '{}'", base.display()))?;
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let entries = walk(&base, patterns.iter().any(GlobPattern::matches_hidden));

    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for pattern in &patterns {
        for (path, components) in &entries {
            if pattern.is_match(components) && seen.insert(path) {
                matches.push(path.clone());
            }
        }
    }

    Ok(matches)
}

/// Every entry below `base` with its relative components. Hidden directories are only
/// descended into when some pattern can match a hidden name.
fn walk(base: &Path, include_hidden: bool) -> Vec<(PathBuf, Vec<String>)> {
    WalkDir::new(base)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| include_hidden || e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Skipping unreadable path below '{}': {e:#}", base.display());
                None
            }
        })
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(base).ok()?;
            let components = relative
                .iter()
                .map(|c| c.to_str().map(str::to_string))
                .collect::<Option<Vec<_>>>();

            if components.is_none() {
                log::debug!(target: LOG_TARGET, "Skipping non UTF-8 path '{}'", entry.path().display());
            }

            Some((entry.into_path(), components?))
        })
        .collect()
}
