use crate::execution::PathSegment;
use std::sync::Arc;

#[derive(Debug)]
struct PathNode {
    parent: ResponsePath,
    segment: PathSegment,
    /// Position among the parent's selections (or list items); orders
    /// errors by declaration rather than completion.
    ordinal: usize,
}

/// The location of a value in the response, e.g. `recipe.steps.2.text`.
///
/// Shared between sibling fields, so extending it is a single allocation.
#[derive(Clone, Debug, Default)]
pub struct ResponsePath(Option<Arc<PathNode>>);
impl ResponsePath {
    pub(crate) fn key(&self, key: &str, ordinal: usize) -> Self {
        Self(Some(Arc::new(PathNode {
            parent: self.clone(),
            segment: PathSegment::Key(key.to_string()),
            ordinal,
        })))
    }

    pub(crate) fn index(&self, idx: usize) -> Self {
        Self(Some(Arc::new(PathNode {
            parent: self.clone(),
            segment: PathSegment::Index(idx),
            ordinal: idx,
        })))
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = &self.0;
        while let Some(n) = node {
            depth += 1;
            node = &n.parent.0;
        }
        depth
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.as_ref().map(|n| &n.segment)
    }

    pub fn to_vec(&self) -> Vec<PathSegment> {
        let mut segments = vec![];
        let mut node = &self.0;
        while let Some(n) = node {
            segments.push(n.segment.clone());
            node = &n.parent.0;
        }
        segments.reverse();
        segments
    }

    pub(crate) fn ordinals(&self) -> Vec<usize> {
        let mut ordinals = vec![];
        let mut node = &self.0;
        while let Some(n) = node {
            ordinals.push(n.ordinal);
            node = &n.parent.0;
        }
        ordinals.reverse();
        ordinals
    }
}
impl std::fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.to_vec().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(idx) => write!(f, "{idx}")?,
            }
        }
        Ok(())
    }
}
