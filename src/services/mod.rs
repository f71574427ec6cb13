pub mod bet_service;
pub mod game_service;

pub use bet_service::BetService;
pub use game_service::{GameService, Settlement};
