//! Command-line driver for the wirefix pipeline.

pub mod cli;
pub mod commands;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
