//! Field paths and the decode/encode cursor
//!
//! Paths are built as a stack-allocated chain while walking a document and
//! only rendered to a string when an error is reported.

use crate::protocol::version::ProtocolVersion;
use std::fmt;

/// Location of a value inside a JSON document
#[derive(Debug, Clone, Copy)]
pub enum Path<'a> {
    Root,
    Field {
        parent: &'a Path<'a>,
        name: &'static str,
    },
    Index {
        parent: &'a Path<'a>,
        index: usize,
    },
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Root => f.write_str("$"),
            Path::Field { parent, name } => match parent {
                Path::Root => f.write_str(name),
                _ => write!(f, "{parent}.{name}"),
            },
            Path::Index { parent, index } => write!(f, "{parent}[{index}]"),
        }
    }
}

const ROOT: &Path<'static> = &Path::Root;

/// Position in a document plus the schema family being applied
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    version: ProtocolVersion,
    path: &'a Path<'a>,
}

impl Cursor<'static> {
    pub fn root(version: ProtocolVersion) -> Self {
        Self {
            version,
            path: ROOT,
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Rendered path of the current position
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    /// Rendered path of a named child without descending into it
    pub fn child_path(&self, name: &'static str) -> String {
        Path::Field {
            parent: self.path,
            name,
        }
        .to_string()
    }

    /// Run `f` with the cursor positioned on a named child field
    pub fn field<T>(&self, name: &'static str, f: impl FnOnce(Cursor<'_>) -> T) -> T {
        let path = Path::Field {
            parent: self.path,
            name,
        };
        f(Cursor {
            version: self.version,
            path: &path,
        })
    }

    /// Run `f` with the cursor positioned on an array element
    pub fn index<T>(&self, index: usize, f: impl FnOnce(Cursor<'_>) -> T) -> T {
        let path = Path::Index {
            parent: self.path,
            index,
        };
        f(Cursor {
            version: self.version,
            path: &path,
        })
    }
}
