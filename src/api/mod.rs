pub mod error;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod views;

pub use error::*;
pub use handlers::*;
pub use routes::*;
