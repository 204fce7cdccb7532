//! Checksum computation and the command line built on top of it.

pub mod cli;
pub mod md5;
