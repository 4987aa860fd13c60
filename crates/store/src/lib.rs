//! Persistence layer: the flat-file project store, managed upload storage,
//! and the project repository that orchestrates them.

pub mod repository;
pub mod store;
pub mod uploads;

pub use repository::{ProjectRepo, SortOrder, UploadedFile};
pub use store::JsonStore;
pub use uploads::MediaStorage;
