//! BINDERY Application Library
//!
//! This library provides the catalog modules and CLI surface for BINDERY.

pub mod cli;
pub mod modules;
pub mod utils;
