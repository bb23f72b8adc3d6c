//! SQLite persistence for payments.

mod model;
mod repository;

pub use model::PaymentDB;
pub use repository::PaymentRepository;
