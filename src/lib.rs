//! Reader for loose objects: `<root>/<2 hex>/<38 hex>` files holding
//! zlib-compressed `<type> <size>\0<body>` records.

mod error;
mod git_object;
mod locator;
mod object_id;
mod store;

const GIT_DIR: &str = ".git";
const GIT_OBJ_DIR: &str = ".git/objects";

pub use error::Error;
pub use git_object::{split_header, Commit, GitObject, ObjectHeader, ObjectKind};
pub use locator::{ObjectLocator, RawObject};
pub use object_id::{ObjectId, OBJECT_ID_HEX_LEN, OBJECT_ID_SIZE};
pub use store::ObjectStore;
pub type Result<T> = std::result::Result<T, Error>;
