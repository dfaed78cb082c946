//! CLI subcommands.

pub mod bdrate;
pub mod blocks;
pub mod md5;
