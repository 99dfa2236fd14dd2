//! Shader text, geometry and settings for the three demos

use gles_engine::prelude::*;

const TRANSFORMED_VERTEX: &str = "
attribute highp vec4 position;
uniform mediump mat4 transform;
void main()
{
    gl_Position = transform * position;
}";

const TEXTURED_VERTEX: &str = "
attribute highp vec4 position;
attribute mediump vec2 uv;
uniform mediump mat4 transform;
varying mediump vec2 v_uv;
void main()
{
    gl_Position = transform * position;
    v_uv = uv;
}";

const TEXTURED_FRAGMENT: &str = "
uniform sampler2D sampler2d;
varying mediump vec2 v_uv;
void main()
{
    gl_FragColor = texture2D(sampler2d, v_uv);
}";

const PLAIN_VERTEX: &str = "
attribute highp vec4 position;
void main()
{
    gl_Position = position;
}";

const RED_FRAGMENT: &str = "
void main()
{
    gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0);
}";

const YELLOW_FRAGMENT: &str = "
void main()
{
    gl_FragColor = vec4(1.0, 1.0, 0.66, 1.0);
}";

/// Image sampled by the textured quad
pub const QUAD_TEXTURE: &str = "blackbuck.bmp";

/// Textured quad; Space cycles the axis, Left/Right rotate
pub fn textured_quad() -> (ApplicationConfig, RenderResult<Scene>) {
    let config = ApplicationConfig::new("Textured Quad").with_animation(AnimationConfig {
        axis: RotationAxis::X,
        ..AnimationConfig::still()
    });
    let scene = Scene {
        vertex_source: TEXTURED_VERTEX.to_string(),
        fragment_source: TEXTURED_FRAGMENT.to_string(),
        geometry: Geometry::textured_quad(),
        transform_uniform: Some("transform".to_string()),
        texture: Some(SceneTexture {
            path: QUAD_TEXTURE.to_string(),
            sampler_uniform: "sampler2d".to_string(),
        }),
    };
    (config, Ok(scene))
}

/// Red heart tilted 45 degrees, pulsing
pub fn heart() -> (ApplicationConfig, RenderResult<Scene>) {
    let config = ApplicationConfig::new("Heart").with_animation(AnimationConfig {
        initial_angle_deg: -45.0,
        ..AnimationConfig::default()
    });
    let scene = Geometry::heart(0.3, 1.0).map(|geometry| Scene {
        vertex_source: TRANSFORMED_VERTEX.to_string(),
        fragment_source: RED_FRAGMENT.to_string(),
        geometry,
        transform_uniform: Some("transform".to_string()),
        texture: None,
    });
    (config, scene)
}

/// Static yellow heptagon
pub fn polygon() -> (ApplicationConfig, RenderResult<Scene>) {
    let config = ApplicationConfig::new("Polygon")
        .with_animation(AnimationConfig::still())
        .with_frame_limit(800_000);
    let scene = Geometry::regular_polygon(7, 0.5).map(|geometry| Scene {
        vertex_source: PLAIN_VERTEX.to_string(),
        fragment_source: YELLOW_FRAGMENT.to_string(),
        geometry,
        transform_uniform: None,
        texture: None,
    });
    (config, scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_build_and_validate() {
        for (config, scene) in [textured_quad(), heart(), polygon()] {
            assert!(config.validate().is_ok());
            let scene = scene.unwrap();
            assert!(scene.geometry.vertex_count() >= 4);
            for binding in scene.geometry.bindings() {
                assert!(scene.vertex_source.contains(&binding.name));
            }
            if let Some(uniform) = &scene.transform_uniform {
                assert!(scene.vertex_source.contains(uniform.as_str()));
            }
        }
    }

    #[test]
    fn test_quad_starts_on_x_axis_at_identity() {
        let (config, _) = textured_quad();
        assert_eq!(config.animation.axis, RotationAxis::X);
        assert_eq!(config.animation.initial_angle_deg, 0.0);
        assert_eq!(config.animation.axis.next(), RotationAxis::Y);
    }

    #[test]
    fn test_polygon_stops_after_frame_limit() {
        let (config, _) = polygon();
        assert_eq!(config.engine.frame_limit, Some(800_000));
    }
}
