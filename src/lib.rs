pub mod config;
pub mod error;
pub mod hash;
pub mod object;
pub mod revlist;
pub mod storage;

pub use error::{DecodeError, RevListError};
pub use hash::Hash;
pub use object::{Object, ObjectKind};
pub use revlist::{build_ignore_set, objects, objects_with_storage_for_ignores, WalkContext};
pub use storage::{ObjectStore, ObjectWriter};

use std::result;

pub type Result<T> = result::Result<T, RevListError>;
