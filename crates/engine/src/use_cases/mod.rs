//! Use cases - game logic orchestration on top of the world store.

pub mod tasks;

pub use tasks::TaskQueue;
