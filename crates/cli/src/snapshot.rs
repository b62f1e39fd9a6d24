//! PNG export of a [`RasterSurface`].

use flow_field_core::{FlowError, RasterSurface};
use std::path::Path;

/// Writes the surface as an opaque RGBA PNG.
///
/// Returns `FlowError::InvalidDimensions` if the surface dimensions overflow
/// `u32`, or `FlowError::Io` on write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), FlowError> {
    let w = u32::try_from(surface.pixel_width()).map_err(|_| FlowError::InvalidDimensions)?;
    let h = u32::try_from(surface.pixel_height()).map_err(|_| FlowError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.to_rgba8())
        .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FlowError::Io(e.to_string()))
}
