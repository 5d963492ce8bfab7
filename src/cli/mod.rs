//! Command line interface: subcommands, the interactive session and its
//! terminal rendering

pub mod chat;
pub mod commands;
pub mod render;
