//! Textured quad demo

use std::process::ExitCode;

fn main() -> ExitCode {
    let (config, scene) = shapes_app::scenes::textured_quad();
    shapes_app::launch(config, scene)
}
