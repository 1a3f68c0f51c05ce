//! Node paths.
//!
//! A [`Path`] locates a tree node relative to the root. Paths are persistent
//! lists: a child path shares every segment with its parent and only adds one
//! link, so a tree thousands of levels deep does not copy its ancestry at
//! every level.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One step from a parent node to a child.
///
/// | Variant | Rendered as | Produced by |
/// |---------|-------------|-------------|
/// | `Key(name)` | `name` | struct field |
/// | `Symbol(description)` | `description` | symbol-keyed struct field |
/// | `Index(i)` | `index_i` | struct index signature |
/// | `Union(i)` | `union_i` | union alternative |
/// | `Tuple(i)` | `tuple_i` | tuple element |
/// | `Rest(i)` | `rest_i` | tuple rest entry |
/// | `TypeParameter(i)` | `typeParameter_i` | declaration type parameter |
/// | `From` / `To` | `from` / `to` | transformation sides |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(Arc<str>),
    Symbol(Arc<str>),
    Index(usize),
    Union(usize),
    Tuple(usize),
    Rest(usize),
    TypeParameter(usize),
    From,
    To,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) | Self::Symbol(name) => f.write_str(name),
            Self::Index(i) => write!(f, "index_{i}"),
            Self::Union(i) => write!(f, "union_{i}"),
            Self::Tuple(i) => write!(f, "tuple_{i}"),
            Self::Rest(i) => write!(f, "rest_{i}"),
            Self::TypeParameter(i) => write!(f, "typeParameter_{i}"),
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Key(Arc::from(name))
    }
}

struct PathLink {
    segment: PathSegment,
    parent: Option<Arc<PathLink>>,
}

// Long paths are long `Arc` chains; release them without recursing.
impl Drop for PathLink {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(link) = next {
            next = match Arc::into_inner(link) {
                Some(mut owned) => owned.parent.take(),
                None => None,
            };
        }
    }
}

/// Sequence of segments from the root to a node. The root path is empty.
#[derive(Clone, Default)]
pub struct Path {
    last: Option<Arc<PathLink>>,
    len: usize,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Path of a child reached through `segment`.
    pub fn child(&self, segment: PathSegment) -> Self {
        Self {
            last: Some(Arc::new(PathLink {
                segment,
                parent: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.last.as_deref().map(|link| &link.segment)
    }

    /// Segments from the last one back to the root.
    pub fn iter_rev(&self) -> impl Iterator<Item = &PathSegment> {
        std::iter::successors(self.last.as_deref(), |link| link.parent.as_deref())
            .map(|link| &link.segment)
    }

    /// Segments in root-to-node order.
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments: Vec<_> = self.iter_rev().cloned().collect();
        segments.reverse();
        segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<_> = self.iter_rev().collect();
        segments.reverse();
        f.write_str(&format_segments(segments))
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.segments()).finish()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut left = self.last.as_ref();
        let mut right = other.last.as_ref();
        while let (Some(l), Some(r)) = (left, right) {
            if Arc::ptr_eq(l, r) {
                return true;
            }
            if l.segment != r.segment {
                return false;
            }
            left = l.parent.as_ref();
            right = r.parent.as_ref();
        }
        true
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for segment in self.iter_rev() {
            segment.hash(state);
        }
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Path::root(), |path, segment| path.child(segment))
    }
}

/// Join segments with `.`, the key format of the tree's path index.
pub fn format_segments<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut out = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

#[cfg(test)]
#[path = "../tests/path_tests.rs"]
mod tests;
