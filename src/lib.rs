pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod comment;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use error::{AutotagError, Result};
