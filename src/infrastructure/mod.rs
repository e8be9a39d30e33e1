//! Infrastructure layer.
//!
//! Configuration loading and the wiring that turns a configuration into a
//! running engine.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Collaborator and strategy construction
//! - [`bootstrap`] - Composition root

pub mod bootstrap;
pub mod config;
pub mod factory;
