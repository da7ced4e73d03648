pub mod release_type;
pub mod version_info;

pub use release_type::{ReleaseOutcome, ReleaseType};
pub use version_info::VersionInfo;
