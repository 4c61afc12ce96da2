//! HTTP inbound adapter.

pub mod cache_control;
pub mod contact;
pub mod error;
pub mod health;
pub mod pages;
pub mod state;

pub use error::{ApiError, ApiResult};
