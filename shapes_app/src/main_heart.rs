//! Pulsing heart demo

use std::process::ExitCode;

fn main() -> ExitCode {
    let (config, scene) = shapes_app::scenes::heart();
    shapes_app::launch(config, scene)
}
