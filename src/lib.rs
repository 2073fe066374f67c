//! # Schoolgate
//!
//! Client for the school portal's authentication API: login, password
//! recovery by one-time code, password change, and a role-aware dashboard
//! entry point.
//!
//! ## Core pieces
//!
//! - [`api`]: HTTP calls and the response normalizer that turns the
//!   backend's different body shapes into one [`api::ApiResult`].
//! - [`validation`]: ordered field rules, first failure wins per field, run
//!   before any request is sent.
//! - [`app`]: the controller owning the [`session::Session`], the current
//!   [`page::Page`] and the [`flash::Flash`] messages.
//!
//! ## Session lifecycle
//!
//! 1. **Startup:** the bearer token is read from the token store. When
//!    present it is checked once against `/user`; a rejected token is removed.
//! 2. **Login:** `/login` returns the token and the user; the token is stored
//!    and every recognized role enters the dashboard.
//! 3. **End:** logout, a failed session check, or a password change clears
//!    the token and the user.
//!
//! Tokens and passwords must never be logged.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flash;
pub mod page;
pub mod role;
pub mod session;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub(crate) mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use app::{App, Submission};
pub use config::AppConfig;
pub use error::{Error, Result};
