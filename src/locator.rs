use super::{Error, ObjectId, Result, GIT_DIR, GIT_OBJ_DIR};
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const INFLATE_CHUNK: usize = 4096;

/// Decompressed bytes of one loose object, header included.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObject(Bytes);

impl RawObject {
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for RawObject {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for RawObject {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// Maps object ids onto zlib files below an object store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocator {
    root: PathBuf,
}

impl Default for ObjectLocator {
    fn default() -> Self {
        Self::new(GIT_OBJ_DIR)
    }
}

impl ObjectLocator {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().into(),
        }
    }

    /// Resolves the store root the way git does: `GIT_OBJECT_DIRECTORY`,
    /// then `$GIT_DIR/objects`, then `.git/objects`.
    pub fn from_env() -> Self {
        Self::resolve(|key| env::var_os(key))
    }

    fn resolve<F: Fn(&str) -> Option<OsString>>(var: F) -> Self {
        if let Some(dir) = var("GIT_OBJECT_DIRECTORY") {
            return Self::new(dir);
        }
        let git_dir = var("GIT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| GIT_DIR.into());
        Self::new(git_dir.join("objects"))
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.relative_path())
    }

    pub fn locate(&self, id: &ObjectId) -> Result<RawObject> {
        let path = self.path(id);
        let compressed = read_file(&path)?;
        let data = inflate(&compressed)?;

        tracing::debug!(
            id = %id,
            path = %path.display(),
            compressed = compressed.len(),
            inflated = data.len(),
            "located object"
        );

        Ok(RawObject(Bytes::from(data)))
    }
}

// The handle is dropped before this returns, whatever happens downstream.
// A non-directory where the prefix directory should be means the object cannot exist.
fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut f = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Error::NotFound(path.into()),
        _ => Error::Io(err),
    })?;
    let mut buf = vec![];
    f.read_to_end(&mut buf)?;
    Ok(buf)
}

fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Decompress::new(true);
    let mut data = Vec::with_capacity(compressed.len() * 2);

    loop {
        data.reserve(INFLATE_CHUNK);
        let total_in = decoder.total_in();
        let total_out = decoder.total_out();
        let input = &compressed[total_in as usize..];

        let status = decoder
            .decompress_vec(input, &mut data, FlushDecompress::None)
            .map_err(|err| Error::CorruptObject(err.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(data),
            // output room was available, so no progress means the input ran dry
            _ if decoder.total_in() == total_in && decoder.total_out() == total_out => {
                return Err(Error::CorruptObject(format!(
                    "zlib stream ended early after {total_in} of {} bytes",
                    compressed.len()
                )));
            }
            _ => {}
        }
    }
}
