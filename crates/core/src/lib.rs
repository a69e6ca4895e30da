#![deny(unsafe_code)]
//! Core types for the moon texture generator.
//!
//! Provides the `Canvas`, `Srgb` and `Palette` data model, the filter effect
//! model (`Filter`, `Primitive`) with the crater and regolith effects built
//! on it, crater layers and the placement loop, the `Xorshift64` PRNG, and
//! `TextureConfig`.

pub mod canvas;
pub mod color;
pub mod config;
pub mod crater;
pub mod error;
pub mod filter;
pub mod palette;
pub mod prng;
pub mod shading;

pub use canvas::Canvas;
pub use color::Srgb;
pub use config::TextureConfig;
pub use crater::{Crater, CraterLayer, OpacityRange};
pub use error::TextureError;
pub use filter::{Filter, FilterInput, Primitive};
pub use palette::Palette;
pub use prng::Xorshift64;
pub use shading::{Light, Regolith};
