//! Common test utilities and infrastructure
//!
//! This module provides the Cucumber world: a mock backend, a controller
//! driven by scripted keys, and the in-memory screen it draws on.

pub mod world;

#[allow(unused_imports)]
pub use world::PostlineWorld;
