//! Hierarchical test paths such as `Math/add` or `/All/Math/add`.
//!
//! ## Resolution rules
//!
//! - Segments are separated by `/`. A leading `/` makes the path absolute.
//! - An empty relative path resolves to the search root itself.
//! - Absolute: the first segment must be the search root's name.
//! - Relative: the first segment is searched depth-first below (and including) the search root.
//! - Every following segment must name a direct child of the node resolved so far.

use std::fmt;

use crate::test::{Test, find_test};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("invalid root or root name in absolute path <{path}>")]
    InvalidRoot { path: String },

    #[error("search root <{root}> does not match path root name <{name}>")]
    RootMismatch { root: String, name: String },

    #[error("failed to resolve test name <{name}> of path <{path}>")]
    TestNotFound { name: String, path: String },
}

/// The chain of nodes from the resolved root down to the target test.
#[derive(Clone)]
pub struct TestPath<'t> {
    tests: Vec<&'t dyn Test>,
}

impl<'t> TestPath<'t> {
    /// Resolve `path` against `search_root`.
    pub fn resolve(search_root: &'t dyn Test, path: &str) -> Result<Self, PathError> {
        let (is_relative, names) = split_path(path);
        if is_relative && path.is_empty() {
            return Ok(Self {
                tests: vec![search_root],
            });
        }

        let Some(first) = names.first() else {
            return Err(PathError::InvalidRoot { path: path.to_string() });
        };

        let root = if is_relative {
            find_test(search_root, first).ok_or_else(|| PathError::TestNotFound {
                name: first.to_string(),
                path: path.to_string(),
            })?
        } else {
            search_root
        };
        if root.name() != *first {
            return Err(PathError::RootMismatch {
                root: root.name().to_string(),
                name: first.to_string(),
            });
        }

        let mut tests = vec![root];
        let mut parent = root;
        for name in &names[1..] {
            parent = child_named(parent, name).ok_or_else(|| PathError::TestNotFound {
                name: name.to_string(),
                path: path.to_string(),
            })?;
            tests.push(parent);
        }

        Ok(Self { tests })
    }

    /// The test the path points at.
    pub fn child_test(&self) -> &'t dyn Test {
        // `resolve` never builds an empty path.
        self.tests[self.tests.len() - 1]
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    pub fn test_at(&self, index: usize) -> Option<&'t dyn Test> {
        self.tests.get(index).copied()
    }
}

impl fmt::Display for TestPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for test in &self.tests {
            write!(f, "/{}", test.name())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TestPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestPath({})", self)
    }
}

fn child_named<'t>(parent: &'t dyn Test, name: &str) -> Option<&'t dyn Test> {
    (0..parent.child_test_count())
        .filter_map(move |index| parent.child_test_at(index))
        .find(|child| child.name() == name)
}

/// Split `path` into names, reporting whether it is relative.
fn split_path(path: &str) -> (bool, Vec<&str>) {
    if path.is_empty() {
        return (true, Vec::new());
    }
    match path.strip_prefix('/') {
        Some(rest) => (false, rest.split('/').collect()),
        None => (true, path.split('/').collect()),
    }
}
