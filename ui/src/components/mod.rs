pub mod data_log;
mod file_loader;
pub mod selection;
mod speed;

pub use file_loader::{FileLoader, PickedFile};
pub use speed::TimeControls;
