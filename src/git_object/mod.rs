mod commit;

use super::{Error, Result};
pub use commit::Commit;
use std::fmt;
use std::str::FromStr;

/// Object type tags a loose object header can carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "commit" => Ok(Self::Commit),
            "tree" => Ok(Self::Tree),
            "blob" => Ok(Self::Blob),
            "tag" => Ok(Self::Tag),
            _ => Err(Error::MalformedHeader(format!("unknown object type {s:?}"))),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `<type> <size>` prefix of a decompressed object.
///
/// `size` is whatever the object declares; it is not checked against the body
/// unless the caller asks for it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    pub kind: ObjectKind,
    pub size: usize,
}

impl fmt::Display for ObjectHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GitObject {
    Commit(ObjectHeader, Commit),
    /// Recognized but not decoded further.
    Other(ObjectHeader),
}

impl GitObject {
    /// Decodes a raw object, parsing the body only for commits.
    pub fn decode(raw: &[u8], strict_size: bool) -> Result<Self> {
        let (header, body) = split_header(raw)?;

        if header.size != body.len() {
            if strict_size {
                return Err(Error::SizeMismatch {
                    expected: header.size,
                    actual: body.len(),
                });
            }
            tracing::warn!(
                declared = header.size,
                actual = body.len(),
                "object size does not match header"
            );
        }

        match header.kind {
            ObjectKind::Commit => Ok(Self::Commit(header, Commit::parse(body)?)),
            _ => Ok(Self::Other(header)),
        }
    }

    pub fn header(&self) -> &ObjectHeader {
        match self {
            Self::Commit(header, _) | Self::Other(header) => header,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.header().kind
    }

    pub fn into_commit(self) -> Result<Commit> {
        match self {
            Self::Commit(_, commit) => Ok(commit),
            Self::Other(header) => Err(Error::NotACommit(header.kind)),
        }
    }
}

// NOTE:
// A loose object looks like "<type> <size>\0<body>"
pub fn split_header(raw: &[u8]) -> Result<(ObjectHeader, &[u8])> {
    let zero_pos = zero_position(raw)
        .ok_or_else(|| Error::MalformedHeader("not found \\0 in object".into()))?;

    let text = std::str::from_utf8(&raw[..zero_pos])
        .map_err(|err| Error::MalformedHeader(format!("header is not valid UTF-8. {err}")))?;

    let mut fields = text.split_whitespace();
    let (kind, size) = match (fields.next(), fields.next()) {
        (Some(kind), Some(size)) => (kind, size),
        _ => {
            return Err(Error::MalformedHeader(format!(
                "expected \"<type> <size>\", got {text:?}"
            )))
        }
    };

    let kind = kind.parse::<ObjectKind>()?;
    if !size.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedHeader(format!(
            "size must be ASCII decimal, got {size:?}"
        )));
    }
    let size = size
        .parse::<usize>()
        .map_err(|err| Error::MalformedHeader(format!("invalid size {size:?}. {err}")))?;

    Ok((ObjectHeader { kind, size }, &raw[(zero_pos + 1)..]))
}

fn zero_position(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == b'\0')
}
