//! Texture upload from a pixel source

use crate::assets::{DecodeError, PixelSource};
use crate::render::api::GlApi;
use crate::render::error::{RenderError, RenderResult};

/// Texture unit scene textures are bound to
pub const TEXTURE_UNIT: u32 = 0;

/// Decode `path` and upload it as an RGBA texture bound to [`TEXTURE_UNIT`]
pub fn load_texture<G: GlApi, P: PixelSource + ?Sized>(gl: &G, pixels: &P, path: &str) -> RenderResult<G::Texture> {
    let image = pixels.load(path)?;
    if !image.is_consistent() {
        return Err(DecodeError {
            path: path.to_string(),
            reason: format!(
                "{} bytes for a {}x{} RGBA image",
                image.size_bytes(),
                image.width,
                image.height
            ),
        }
        .into());
    }

    let texture = gl
        .create_texture_rgba(image.width, image.height, &image.data)
        .map_err(RenderError::DrawFailed)?;
    gl.bind_texture(TEXTURE_UNIT, texture);

    log::info!("Uploaded texture '{}' ({}x{})", path, image.width, image.height);
    Ok(texture)
}
