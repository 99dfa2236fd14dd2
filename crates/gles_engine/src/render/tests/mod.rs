//! Scenario tests driving the bootstrap against the counting fakes


use crate::core::{AnimationConfig, ApplicationConfig};
use crate::render::geometry::Geometry;
use crate::render::lifecycle::{Scene, SceneTexture};

pub(super) const QUAD_VERTEX: &str = "
attribute highp vec4 position;
attribute mediump vec2 uv;
uniform mediump mat4 transform;
varying mediump vec2 v_uv;
void main()
{
    gl_Position = transform * position;
    v_uv = uv;
}";

pub(super) const QUAD_FRAGMENT: &str = "
uniform sampler2D sampler2d;
varying mediump vec2 v_uv;
void main()
{
    gl_FragColor = texture2D(sampler2d, v_uv);
}";

pub(super) const FLAT_VERTEX: &str = "
attribute highp vec4 position;
void main()
{
    gl_Position = position;
}";

pub(super) const FLAT_FRAGMENT: &str = "
void main()
{
    gl_FragColor = vec4(1.0, 1.0, 0.66, 1.0);
}";

pub(super) fn quad_scene() -> Scene {
    Scene {
        vertex_source: QUAD_VERTEX.to_string(),
        fragment_source: QUAD_FRAGMENT.to_string(),
        geometry: Geometry::textured_quad(),
        transform_uniform: Some("transform".to_string()),
        texture: Some(SceneTexture {
            path: "blackbuck.bmp".to_string(),
            sampler_uniform: "sampler2d".to_string(),
        }),
    }
}

pub(super) fn flat_scene(geometry: Geometry) -> Scene {
    Scene {
        vertex_source: FLAT_VERTEX.to_string(),
        fragment_source: FLAT_FRAGMENT.to_string(),
        geometry,
        transform_uniform: None,
        texture: None,
    }
}

pub(super) fn still_config(frames: u64) -> ApplicationConfig {
    ApplicationConfig::new("test")
        .with_animation(AnimationConfig::still())
        .with_frame_limit(frames)
}
