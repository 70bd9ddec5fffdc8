//! Token cardinality for command-line argument binding.
//!
//! Given a field's declared type, decide whether a parser should take no
//! token (presence flag), exactly one, or many, or reject the field type
//! outright. See [`field`] for the classifier and its predicates.

pub mod cli;
pub mod commands;
pub mod config;
pub mod field;
pub mod logging;
pub mod scalar;
pub mod types;
