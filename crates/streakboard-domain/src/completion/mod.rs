mod repository;
mod types;

pub use repository::CompletionRepository;
pub use types::CompletionEvent;
