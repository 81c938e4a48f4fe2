//! iconsheet - Library for cutting RGB565 icons out of a sprite sheet
//!
//! This library provides functionality to:
//! - Read a sprite sheet stored as a C byte array of little-endian RGB565 pixels
//! - Crop grid cells and scale them with nearest-neighbor sampling
//! - Emit LVGL-style `.c`/`.h` image sources and 24-bit BMP previews
//! - Rasterize SVG icons through an external tool

pub mod bmp;
pub mod build;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod emit;
pub mod error;
pub mod output;
pub mod pixels;
pub mod rasterize;
pub mod region;
pub mod resample;
pub mod source;

pub use error::{IconError, Result};
