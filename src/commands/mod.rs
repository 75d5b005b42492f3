//! CLI commands

pub mod category;
pub mod command;
pub mod list;
pub mod seed;
pub mod show;
pub mod transfer;
pub mod utils;
