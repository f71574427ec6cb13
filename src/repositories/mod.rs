pub mod bet_repository;
pub mod game_repository;
pub mod memory;
pub mod store;

// Re-export all repositories for convenient access
pub use bet_repository::BetRepository;
pub use game_repository::GameRepository;
pub use memory::InMemoryStore;
pub use store::{BetStore, GameStore};
