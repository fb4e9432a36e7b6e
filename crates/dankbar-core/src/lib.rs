//! Core infrastructure for dankbar.
//!
//! This crate holds the pieces every provider and the binary share: the
//! [`event::Event`] rendered per bar slot, the [`provider::Provider`]
//! capability, the name-keyed registry, the collection cycle, the streaming
//! JSON emitter, and file logging.

pub mod cycle;
pub mod emitter;
pub mod event;
pub mod logging;
pub mod provider;
pub mod registry;
