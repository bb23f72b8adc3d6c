//! SQLite persistence for attendee records.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
