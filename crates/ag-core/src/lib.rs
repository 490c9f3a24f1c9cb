/// Data model, ramps, configuration and capability traits for ascii-generator.
///
/// This crate contains all shared types used across the workspace. It has no
/// dependency on any image codec.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use config::{ConvertConfig, RenderOptions, Scaling};
pub use error::CoreError;
pub use frame::{BrightnessGrid, Pixel, PixelBuffer};
