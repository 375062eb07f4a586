pub mod json_repo;
pub mod memory;

pub use json_repo::JsonFileStore;
pub use memory::MemoryStore;
