// src/acquisition/mod.rs
//! Event acquisition components

pub mod event_queue;

pub use event_queue::*;
