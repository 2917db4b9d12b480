//! # dbot-cli
//!
//! Argument parsing and bot assembly for the `dbot` binary.

pub mod app;
pub mod cli;

pub use app::run;
pub use cli::{Cli, Commands};
