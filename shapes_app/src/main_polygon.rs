//! Regular polygon demo

use std::process::ExitCode;

fn main() -> ExitCode {
    let (config, scene) = shapes_app::scenes::polygon();
    shapes_app::launch(config, scene)
}
