// src/processing/mod.rs
//! Signal processing utilities

pub mod fourier;

pub use fourier::{forward, inverse, reconstruct_real};
