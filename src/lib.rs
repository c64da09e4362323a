pub use client::VlrClient;
pub use config::Config;
pub use error::{ErrorKind, Result, VlrError};
pub use model::*;
pub use crate::scraper::normalize;

pub mod api;
mod client;
pub mod config;
mod error;
mod model;
mod scraper;
