//! Demo programs for the GLES bootstrap
//!
//! Each binary picks a scene from [`scenes`] and hands it to [`launch`], which
//! owns config loading, logging, the window and the exit code.

pub mod scenes;

use std::process::ExitCode;

use gles_engine::prelude::*;

/// Config from the file at `arg`, or `defaults` when no path was given
pub fn resolve_config(arg: Option<String>, defaults: ApplicationConfig) -> Result<ApplicationConfig, ConfigError> {
    match arg {
        Some(path) => ApplicationConfig::load_from_file(&path),
        None => Ok(defaults),
    }
}

/// Run `scene` with `defaults`, or with the config file named by the first argument
pub fn launch(defaults: ApplicationConfig, scene: RenderResult<Scene>) -> ExitCode {
    let arg = std::env::args().nth(1);
    let config = match resolve_config(arg.clone(), defaults.clone()) {
        Ok(config) => {
            logging::init(&config.engine.log_level);
            if let Some(path) = &arg {
                log::info!("Loaded configuration from {}", path);
            }
            config
        }
        Err(e) => {
            logging::init(&defaults.engine.log_level);
            log::error!("Failed to load {}: {}", arg.unwrap_or_default(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let scene = match scene {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut window = match GlfwWindow::new(&config.window) {
        Ok(window) => window,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut lifecycle = LifecycleController::new(GlutinDisplay::new());
    match lifecycle.run(&config, &scene, &mut window, &ImageFileSource) {
        Ok(summary) => {
            log::info!("Exited after {} frame(s): {:?}", summary.frames, summary.reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Exiting with failure: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_log_level_wins_over_defaults() {
        let path = std::env::temp_dir().join("shapes_app_log_level.toml");
        std::fs::write(&path, "[engine]\nlog_level = \"trace\"\n").expect("config should write");

        let defaults = ApplicationConfig::new("Heart");
        let config = resolve_config(Some(path.to_string_lossy().into_owned()), defaults);
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.expect("config should load").engine.log_level, "trace");
    }

    #[test]
    fn test_defaults_used_without_argument() {
        let mut defaults = ApplicationConfig::new("Polygon");
        defaults.engine.log_level = "warn".to_string();
        let config = resolve_config(None, defaults).expect("defaults always resolve");
        assert_eq!(config.engine.log_level, "warn");
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let result = resolve_config(Some("does/not/exist.toml".to_string()), ApplicationConfig::default());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
