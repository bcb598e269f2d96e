pub mod auth_user;
pub mod error;
pub mod mw_ctx;
