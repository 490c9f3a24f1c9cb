/// ASCII conversion engine for ascii-generator.
///
/// Converts pixel buffers to brightness grids and brightness grids to text.
pub mod brightness;
pub mod luminance;
pub mod pipeline;
pub mod render;

pub use pipeline::Converter;
pub use render::render;
