// Version Registry: named output variants and their selection policies.

pub mod profile;
pub mod registry;

pub use profile::{Layout, VersionProfile};
pub use registry::{VersionRegistry, ALL_VERSIONS};
