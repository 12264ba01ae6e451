//! Motor de ejecución.

pub mod core;

pub use core::PipelineEngine;
