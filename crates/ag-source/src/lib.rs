/// Image sources for ascii-generator: decoding, rescaling and folder scanning.

pub mod folder;
pub mod image;
pub mod resize;

pub use crate::image::ImageFileDecoder;
pub use crate::resize::Resizer;
