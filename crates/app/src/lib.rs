//! Command-line front end for the parts and products inventory.

pub mod config;
pub mod console;
