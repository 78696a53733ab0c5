//! Infrastructure implementations.
//!
//! Contains the codecs and paged store behind the world store, plus port
//! trait implementations for the engine's collaborators.

pub mod clock;
pub mod codec;
pub mod error;
pub mod persistence;
pub mod ports;
pub mod resources;
pub mod scripts;
pub mod settings;
