//! Manifest persistence

mod fs_repository;
mod in_memory;

pub use fs_repository::FsManifestRepository;
pub use in_memory::InMemoryManifestRepository;
