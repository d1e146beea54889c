use super::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const OBJECT_ID_SIZE: usize = 20;
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_SIZE * 2;

/// SHA-1 derived name of a stored object.
///
/// Nothing here checks that the id actually hashes the content it names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_SIZE]);

impl ObjectId {
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Relative location inside an object store: `ab/cdef...`.
    pub fn relative_path(&self) -> PathBuf {
        let hex = self.hex();
        let (dir, file) = hex.split_at(2);
        Path::new(dir).join(file)
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != OBJECT_ID_HEX_LEN {
            return Err(Error::InvalidIdentifier(format!(
                "object id must be {OBJECT_ID_HEX_LEN} hex characters, got {} in {s:?}",
                s.len()
            )));
        }

        let mut bytes = [0u8; OBJECT_ID_SIZE];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|err| Error::InvalidIdentifier(format!("{s:?}: {err}")))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; OBJECT_ID_SIZE] = bytes.try_into().map_err(|_| {
            Error::InvalidIdentifier(format!(
                "object id must be {OBJECT_ID_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; OBJECT_ID_SIZE]> for ObjectId {
    fn from(value: [u8; OBJECT_ID_SIZE]) -> Self {
        Self(value)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}
