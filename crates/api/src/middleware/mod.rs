//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the acting user from a Bearer token.
//! - [`extract::AppJson`] / [`extract::AppQuery`] -- JSON body and query
//!   string with rejections rendered as [`AppError`](crate::error::AppError).

pub mod auth;
pub mod extract;
