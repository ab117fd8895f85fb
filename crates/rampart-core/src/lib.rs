//! Core types and definitions for the RAMPART mission simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! actor ids, components, configuration records, events, errors and
//! constants. It has no dependency on the engine or any presentation layer.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod types;

#[cfg(test)]
mod tests;
