//! Local secret file parsing.
//!
//! Reads a dotenv-style `KEY=VALUE` file into the set of secrets that should
//! exist remotely. Bare keys (a line with no `=`) are remembered but never
//! become secrets; `KEY=` is a secret with an empty value.

use std::path::{Path, PathBuf};
use std::str::Lines;

use tracing::debug;
use zeroize::Zeroize;

use crate::error::{EnvError, Result};

/// A parsed secret file.
///
/// Entries keep the position of the first occurrence of each key and the
/// value of the last one. `None` marks a bare key.
#[derive(Debug, Clone)]
pub struct EnvFile {
    entries: Vec<(String, Option<String>)>,
    path: PathBuf,
}

impl EnvFile {
    /// Read and parse a secret file from disk.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Read` if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading secret file");

        let contents = std::fs::read_to_string(path).map_err(|source| EnvError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&contents, path))
    }

    /// Parse file contents, expanding `${VAR}` references against earlier
    /// keys and then the process environment. `path` is only kept for
    /// display.
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Self {
        Self::parse_with_env(contents, path, |name| std::env::var(name).ok())
    }

    /// Like [`EnvFile::parse`], with `process_env` standing in for the
    /// process environment.
    pub fn parse_with_env<F>(contents: &str, path: impl Into<PathBuf>, process_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut entries: Vec<(String, Option<String>)> = Vec::new();
        let mut lines = contents.lines();

        while let Some(line) = lines.next() {
            let Some((key, raw)) = split_line(line) else {
                continue;
            };

            let value = match raw {
                Some(raw) => {
                    let (value, quote) = read_value(raw, &mut lines);
                    Some(match quote {
                        Quote::Single => value,
                        Quote::Double | Quote::None => interpolate(&value, |name| {
                            lookup(&entries, name).or_else(|| process_env(name))
                        }),
                    })
                }
                None => None,
            };

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => entries.push((key, value)),
            }
        }

        Self {
            entries,
            path: path.into(),
        }
    }

    /// All entries, bare keys included.
    pub fn entries(&self) -> &[(String, Option<String>)] {
        &self.entries
    }

    /// Keys that were declared without a value.
    pub fn bare_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.as_str())
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The secrets to push: every key that has a value, in file order.
    pub fn into_desired(self) -> DesiredSecrets {
        let entries = self
            .entries
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        DesiredSecrets { entries }
    }
}

/// Secret name to plaintext value, in file order.
///
/// Values are wiped from memory when the set is dropped.
#[derive(Debug, Clone, Default)]
pub struct DesiredSecrets {
    entries: Vec<(String, String)>,
}

impl DesiredSecrets {
    /// Build from raw pairs. Later duplicates overwrite earlier ones.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut desired = Self::default();
        for (k, v) in pairs {
            let (k, v) = (k.into(), v.into());
            match desired.entries.iter_mut().find(|(key, _)| *key == k) {
                Some(existing) => existing.1 = v,
                None => desired.entries.push((k, v)),
            }
        }
        desired
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a secret with this name is desired.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// (name, value) pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for DesiredSecrets {
    fn drop(&mut self) {
        for (_, value) in &mut self.entries {
            value.zeroize();
        }
    }
}

/// How a value was written. Single-quoted values are taken literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split one line into its key and the raw text after `=`.
///
/// Returns `None` for blank lines, comments and lines with an empty key. A
/// line without `=` is a bare key.
fn split_line(line: &str) -> Option<(String, Option<&str>)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line
        .strip_prefix("export ")
        .map(str::trim_start)
        .unwrap_or(line);

    match line.split_once('=') {
        Some((key, raw)) => {
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), Some(raw)))
        }
        None => Some((line.to_string(), None)),
    }
}

/// Read a value starting at `raw`. A quoted value whose closing quote is on
/// a later line consumes those lines from `rest`; if it never closes, the
/// first line is read as an unquoted value and `rest` is left alone.
fn read_value(raw: &str, rest: &mut Lines<'_>) -> (String, Quote) {
    let raw = raw.trim_start();

    if let Some(open) = raw.strip_prefix('"') {
        if let Some(body) = read_quoted(open, rest, closing_double_quote) {
            return (unescape_double_quoted(&body), Quote::Double);
        }
    }

    if let Some(open) = raw.strip_prefix('\'') {
        if let Some(body) = read_quoted(open, rest, |s| s.find('\'')) {
            return (body, Quote::Single);
        }
    }

    (strip_inline_comment(raw.trim_end()).to_string(), Quote::None)
}

/// Collect text up to the closing quote found by `close`, joining lines
/// with `\n`. Anything after the closing quote is ignored.
fn read_quoted(
    open: &str,
    rest: &mut Lines<'_>,
    close: impl Fn(&str) -> Option<usize>,
) -> Option<String> {
    let mut body = open.to_string();
    let mut ahead = rest.clone();

    loop {
        if let Some(end) = close(&body) {
            body.truncate(end);
            *rest = ahead;
            return Some(body);
        }
        body.push('\n');
        body.push_str(ahead.next()?);
    }
}

/// Byte offset of the first unescaped `"`.
fn closing_double_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

/// `value # note` -> `value`. A `#` glued to the value is kept.
fn strip_inline_comment(raw: &str) -> &str {
    for (i, ch) in raw.char_indices() {
        if ch == '#' && raw[..i].ends_with(char::is_whitespace) {
            return raw[..i].trim_end();
        }
    }
    raw
}

/// Value of an earlier key. A bare key counts as defined and empty.
fn lookup(entries: &[(String, Option<String>)], name: &str) -> Option<String> {
    entries
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone().unwrap_or_default())
}

/// Expand `${NAME}` and `${NAME:-default}`. Unknown names without a default
/// expand to nothing; `$NAME` without braces is left as is.
fn interpolate(value: &str, resolve: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };

        let inner = &after[..end];
        let (name, default) = match inner.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (inner, None),
        };

        out.push_str(&rest[..start]);
        if name.contains(':') {
            out.push_str(&rest[start..start + 2 + end + 1]);
        } else {
            let resolved = resolve(name).or_else(|| default.map(str::to_string));
            out.push_str(&resolved.unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
