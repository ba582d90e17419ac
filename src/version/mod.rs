//! Schema-version guard subsystem for quire

mod errors;
mod guard;

pub use errors::{VersionError, VersionResult};
pub use guard::check_version;
