//! Process-memory adapters.

mod in_memory_history_repository;

pub use in_memory_history_repository::InMemoryHistoryRepository;
