//! Contains the Error and Result type used by the reader.

/// Error from reading NBT primitives. Use [`Error::kind`] to tell the
/// different failures apart.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors, usually IO errors from the underlying source. Users
    /// should not match on this variant and should instead use a wildcard
    /// `_`. Errors in this category may be moved to new variants.
    Other,

    /// The source ran out before a value was complete.
    UnexpectedEof,

    /// Tag byte outside of the known range of tags. The byte has still been
    /// consumed.
    InvalidTag(u8),

    /// A length prefix was negative. Only the prefix has been consumed.
    NegativeLength(i32),

    /// Expected unicode data but was not valid. Contained bytes are the
    /// invalid data, which has been consumed from the source.
    Nonunicode(Vec<u8>),

    /// The caller asked for something impossible, like skipping a negative
    /// number of bytes.
    InvalidArgument,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Is this error a structural problem with the data itself? This covers
    /// invalid tags, negative lengths and invalid text.
    pub fn is_format(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidTag(_) | ErrorKind::NegativeLength(_) | ErrorKind::Nonunicode(_)
        )
    }

    /// Did the source end part way through a value?
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub(crate) fn invalid_tag(t: u8) -> Self {
        Self {
            msg: format!("nbt tag type out of range: {}", t),
            kind: ErrorKind::InvalidTag(t),
        }
    }

    pub(crate) fn negative_length(len: i32) -> Self {
        Self {
            msg: format!("negative length given: {}", len),
            kind: ErrorKind::NegativeLength(len),
        }
    }

    pub(crate) fn nonunicode(d: Vec<u8>) -> Self {
        Self {
            msg: format!(
                "invalid string, non-unicode: {}",
                String::from_utf8_lossy(&d),
            ),
            kind: ErrorKind::Nonunicode(d),
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::UnexpectedEof,
            },
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Other,
            },
        }
    }
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;
