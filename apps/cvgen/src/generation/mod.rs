// Section generation: content selection, per-section markdown generators,
// and the assembler that joins them in the fixed section order.
// Everything here is pure and infallible except registry lookups.

pub mod certifications;
pub mod content_selector;
pub mod education;
pub mod experience;
pub mod generator;
pub mod handlers;
pub mod header;
pub mod markdown;
pub mod projects;
pub mod skills;
