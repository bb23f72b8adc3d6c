//! SQLite persistence for the logged-in admin and their code block.

mod model;
mod repository;

pub use model::AdminDB;
pub use repository::AdminRepository;
