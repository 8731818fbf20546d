// Content loading: YAML source files -> ContentBundle snapshot.
// Selection and generation never touch the filesystem; everything they read
// comes through here once per build or server start.

pub mod loader;

pub use loader::ContentLoader;
