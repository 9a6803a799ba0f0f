//! Settings for patchlock.
//!
//! Every path the mutator touches is an explicit configuration value: the
//! target document, the lock file, and the document tokens all arrive here
//! at construction time, with no ambient global lookup. Settings load from
//! YAML in a forward-compatible way (unknown fields are ignored, optional
//! fields have defaults) and are validated before use.

mod model;
mod operations;


// Re-export public API
pub use model::Settings;
