pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export the models and the scheduling primitives other cells build on.
pub use models::*;
pub use services::scheduling;
