//! Rendering module
//!
//! Hosts draw views; this module only decides where they go.

pub mod frame;

pub use frame::RenderFrame;
