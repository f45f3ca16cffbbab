//! Secret and environment interpolation for configuration values.

pub mod interpolation;
