//! Bearer-token authentication: token issuance, verification, and the route
//! guard that resolves a token to a user ID before protected handlers run.

mod log_in;
mod middleware;
mod register;
mod token;

pub use log_in::log_in_endpoint;
pub use middleware::{AuthState, auth_guard};
pub use register::register_endpoint;
pub use token::TokenResponse;
pub(crate) use token::{create_token, decode_token};
