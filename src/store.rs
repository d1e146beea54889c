use super::{Commit, GitObject, ObjectId, ObjectLocator, RawObject, Result};

/// Read-only access to a loose object store.
///
/// Holds no mutable state, so one store can serve decodes from many threads.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    locator: ObjectLocator,
    strict_size: bool,
}

impl ObjectStore {
    pub fn new(locator: ObjectLocator) -> Self {
        Self {
            locator,
            strict_size: false,
        }
    }

    /// Fail with `SizeMismatch` when the header size disagrees with the body.
    pub fn strict_size(mut self, strict: bool) -> Self {
        self.strict_size = strict;
        self
    }

    pub fn locator(&self) -> &ObjectLocator {
        &self.locator
    }

    /// Decompressed object bytes, header included.
    pub fn cat_file(&self, id: &ObjectId) -> Result<RawObject> {
        self.locator.locate(id)
    }

    pub fn open(&self, id: &ObjectId) -> Result<GitObject> {
        let raw = self.locator.locate(id)?;
        let obj = GitObject::decode(raw.as_ref(), self.strict_size)?;
        tracing::debug!(id = %id, header = %obj.header(), "decoded object");
        Ok(obj)
    }

    pub fn read_commit(&self, id: &ObjectId) -> Result<Commit> {
        self.open(id).and_then(GitObject::into_commit)
    }
}
