//! SQLite persistence for winners.

mod model;
mod repository;

pub use model::WinnerDB;
pub use repository::WinnerRepository;
