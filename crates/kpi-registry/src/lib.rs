//! Registry of KPI definitions.
//!
//! Provides [`Registry`], an owned collection of built-in and user-defined
//! KPIs, and [`SharedRegistry`], a lock-guarded wrapper for hosts that call
//! in from several threads. File loaders for definitions and bindings live
//! in [`loader`].

pub mod builtins;
pub mod error;
pub mod loader;
pub mod registry;
pub mod shared;

pub use error::RegistryError;
pub use loader::{LoadError, NewKpi};
pub use registry::Registry;
pub use shared::SharedRegistry;
