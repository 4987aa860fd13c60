//! Domain layer for the gallery: project records, media classification,
//! view-model derivation, and the shared error taxonomy. No I/O lives here.

pub mod error;
pub mod media;
pub mod project;
pub mod types;
pub mod view;
