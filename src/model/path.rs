//! Short-name paths

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Hierarchical AUTOSAR identifier built from `SHORT-NAME` segments
///
/// Displayed with a leading slash (`/Pkg/Component/Port`). The empty path is
/// the document root and displays as `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct ShortNamePath {
    segments: Vec<String>,
}

impl ShortNamePath {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-delimited path, ignoring empty segments
    ///
    /// Leading, trailing and doubled slashes do not produce segments, so
    /// `"/A/B"`, `"A/B"` and `"/A//B/"` all parse to the same path.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build a path from individual segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of a child element named `name`
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Append every segment of `relative` to this path
    pub fn join_path(&self, relative: &ShortNamePath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        Self { segments }
    }

    /// Path of the enclosing element, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// All segments from the outermost package down
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the document root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether `prefix` is this path or one of its ancestors
    pub fn starts_with(&self, prefix: &ShortNamePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for ShortNamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for ShortNamePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ShortNamePath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for ShortNamePath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}
