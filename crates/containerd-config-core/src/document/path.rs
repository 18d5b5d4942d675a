//! Key paths addressing nodes inside a [`DocumentTree`](super::DocumentTree).
//!
//! A [`KeyPath`] is an ordered list of mapping keys walked from the root
//! table.  Each segment is a *whole* key: `io.containerd.grpc.v1.cri` is one
//! segment even though it contains dots, which is why paths are built from
//! segments rather than parsed from dotted strings.
//!
//! ```rust
//! use containerd_config_core::document::KeyPath;
//!
//! let cri = KeyPath::new(["plugins", "io.containerd.grpc.v1.cri"]);
//! let runtime = cri.join(["containerd", "default_runtime_name"]);
//! assert_eq!(runtime.len(), 4);
//! assert_eq!(
//!     runtime.to_string(),
//!     r#"plugins."io.containerd.grpc.v1.cri".containerd.default_runtime_name"#
//! );
//! ```

use std::fmt;

/// An ordered sequence of mapping keys locating a node from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Builds a path from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty path, which addresses the root table itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segments` appended to `self`.
    pub fn join<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut joined = self.clone();
        joined.segments.extend(segments.into_iter().map(Into::into));
        joined
    }

    /// Returns a new path with a single `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut joined = self.clone();
        joined.segments.push(segment.into());
        joined
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits the path into its parent segments and the final key.
    ///
    /// Returns `None` for the empty path.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.segments
            .split_last()
            .map(|(last, parents)| (parents, last.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Renders the path as a TOML dotted key, quoting segments that are not
/// valid bare keys.
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            if is_bare_key(segment) {
                f.write_str(segment)?;
            } else {
                write_quoted(f, segment)?;
            }
        }
        Ok(())
    }
}

fn is_bare_key(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in segment.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
