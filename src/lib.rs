pub mod api;
pub mod config;
pub mod error;
pub mod news;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
