//! Database connection management

pub mod init;

pub use init::*;
