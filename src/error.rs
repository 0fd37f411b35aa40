use crate::Section;
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// The broad classes of failure a load can end with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    /// The file could not be opened or read.
    Io,
    /// A keyword or value is absent, misplaced, or has the wrong value.
    Format,
    /// The input ended (or a section ended) before a count or record did.
    Truncation,
    /// Rows that should form a rectangular table do not.
    Shape,
    /// A value does not fit in the requested numeric type.
    Conversion,
}

#[derive(Debug)]
pub enum ErrorKind {
    Open {
        path: PathBuf,
        source: io::Error,
    },
    Io(io::Error),
    UnexpectedToken {
        expected: String,
        found: String,
    },
    Unsupported {
        keyword: &'static str,
        expected: i64,
        found: i64,
    },
    Truncated {
        expected: String,
        found: Option<String>,
    },
    IndexOutOfRange {
        section: Section,
        record: usize,
        index: i64,
        vertex_count: usize,
    },
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    Cast {
        value: String,
        target: &'static str,
    },
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        match self {
            ErrorKind::Open { .. } | ErrorKind::Io(_) => Category::Io,
            ErrorKind::UnexpectedToken { .. }
            | ErrorKind::Unsupported { .. }
            | ErrorKind::IndexOutOfRange { .. } => Category::Format,
            ErrorKind::Truncated { .. } => Category::Truncation,
            ErrorKind::NotRectangular { .. } => Category::Shape,
            ErrorKind::Cast { .. } => Category::Conversion,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Open { path, source } => {
                write!(f, "{} could not be opened: {}", path.display(), source)
            }
            ErrorKind::Io(err) => write!(f, "io error: {}", err),
            ErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, found {:?}", expected, found)
            }
            ErrorKind::Unsupported {
                keyword,
                expected,
                found,
            } => write!(
                f,
                "unsupported {} {} (only {} is supported)",
                keyword, found, expected,
            ),
            ErrorKind::Truncated {
                expected,
                found: Some(found),
            } => write!(f, "expected {}, found {:?}", expected, found),
            ErrorKind::Truncated {
                expected,
                found: None,
            } => write!(f, "expected {}, found end of file", expected),
            ErrorKind::IndexOutOfRange {
                section,
                record,
                index,
                vertex_count,
            } => write!(
                f,
                "{} record {} refers to vertex {} but the mesh has {} vertices",
                section,
                record + 1,
                index + 1,
                vertex_count,
            ),
            ErrorKind::NotRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, found, expected,
            ),
            ErrorKind::Cast { value, target } => {
                write!(f, "{} does not fit in {}", value, target)
            }
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    lineno: Option<usize>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error { kind, lineno: None }
    }

    pub(crate) fn at(kind: ErrorKind, lineno: usize) -> Error {
        Error {
            kind,
            lineno: Some(lineno),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The 1-based line at which parsing stopped, when the error comes from
    /// the parser.
    pub fn lineno(&self) -> Option<usize> {
        self.lineno
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lineno {
            Some(lineno) => write!(f, "at line {}: {}", lineno, self.kind),
            None => self.kind.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Open { source, .. } => Some(source),
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(ErrorKind::Io(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
