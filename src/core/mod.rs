//! Core bot logic - framework-agnostic command registry, publication and dispatch.
//!
//! Nothing in here talks to serenity directly; the `bot` layer adapts gateway
//! events and HTTP calls to the traits defined here.

/// Live platform client exposed to hooks
pub mod client;
/// Command definitions and the handler trait
pub mod command;
/// Interaction routing with per-invocation failure isolation
pub mod dispatcher;
/// Optional ready and pre-dispatch callbacks
pub mod hooks;
/// Framework-agnostic interaction and reply types
pub mod interaction;
/// Command publication to the platform
pub mod publisher;
/// Name-indexed command collection
pub mod registry;
/// Counters for swallowed failures
pub mod stats;
/// Formatting and convenience helpers
pub mod utils;
/// User input validation
pub mod validation;
