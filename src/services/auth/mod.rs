pub mod facebook_auth_service;
pub mod oauth_state;

pub use facebook_auth_service::*;
pub use oauth_state::*;
