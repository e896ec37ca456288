//! editor settings, read from a json file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tether::{ConstraintError, ShapeKind, Solver, D_MAX};

use crate::editor::PICK_RADIUS;
use crate::transforms::{Camera, WSVec};

/// environment variable naming the config file
pub const CONFIG_ENV: &str = "CATENA_CONFIG";
/// config file looked up in the working directory
pub const CONFIG_FILE: &str = "catena.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid camera zoom limits: min {0}, max {1}")]
    ZoomLimits(f32, f32),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw: f32,
    pub pitch: f32,
    /// canvas pixels per world unit
    pub scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            yaw: 0.6,
            pitch: 0.4,
            scale: 60.0,
            min_scale: 5.0,
            max_scale: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// maximum distance between adjacent nodes
    pub max_distance: f32,
    /// offset from the predecessor at which new nodes spawn
    pub spawn_offset: [f32; 3],
    /// pick radius in canvas pixels
    pub pick_radius: f32,
    pub camera: CameraConfig,
    /// shapes added on startup
    pub startup_chain: Vec<ShapeKind>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_distance: D_MAX,
            spawn_offset: [1.5, 0.0, 0.0],
            pick_radius: PICK_RADIUS,
            camera: CameraConfig::default(),
            startup_chain: vec![],
        }
    }
}

impl Config {
    /// parse and validate config from json text. an unusable `max_distance` is replaced by
    /// `D_MAX`, the rest of the file is kept.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(s)?;
        if let Err(e) = Solver::new(config.max_distance) {
            log::warn!("{}, using {}", e, D_MAX);
            config.max_distance = D_MAX;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.camera;
        if !(c.min_scale > 0.0 && c.min_scale <= c.max_scale) {
            return Err(ConfigError::ZoomLimits(c.min_scale, c.max_scale));
        }
        Ok(())
    }

    pub fn solver(&self) -> Result<Solver, ConstraintError> {
        Solver::new(self.max_distance)
    }

    pub fn spawn_offset(&self) -> WSVec {
        WSVec::from(self.spawn_offset)
    }

    /// starting camera, scale clamped to the zoom limits
    pub fn camera(&self) -> Camera {
        let c = &self.camera;
        Camera::new(c.yaw, c.pitch, c.scale.clamp(c.min_scale, c.max_scale))
    }
}

/// path of the config file: `CATENA_CONFIG` if set, otherwise `catena.json`
pub fn path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// load config from `path`. a missing file gives the defaults.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let s = std::fs::read_to_string(path)?;
    let config = Config::from_json(&s)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config = Config::from_json(r#"{ "max_distance": 3.0, "camera": { "scale": 80.0 } }"#).unwrap();
        assert_eq!(config.max_distance, 3.0);
        assert_eq!(config.camera.scale, 80.0);
        assert_eq!(config.camera.yaw, CameraConfig::default().yaw);
        assert_eq!(config.spawn_offset, Config::default().spawn_offset);
        assert_eq!(config.solver().unwrap().max_distance(), 3.0);
    }

    #[test]
    fn startup_chain_kinds() {
        let config = Config::from_json(r#"{ "startup_chain": ["pyramid", "digit"] }"#).unwrap();
        assert_eq!(config.startup_chain, vec![ShapeKind::Pyramid, ShapeKind::Digit]);
    }

    #[test]
    fn bad_distance_falls_back_and_keeps_the_rest() {
        let config =
            Config::from_json(r#"{ "max_distance": -1, "startup_chain": ["digit"], "pick_radius": 20.0 }"#)
                .unwrap();
        assert_eq!(config.max_distance, D_MAX);
        assert_eq!(config.startup_chain, vec![ShapeKind::Digit]);
        assert_eq!(config.pick_radius, 20.0);
        assert_eq!(config.solver().unwrap().max_distance(), D_MAX);

        let config = Config::from_json(r#"{ "max_distance": 0.0 }"#).unwrap();
        assert_eq!(config.max_distance, D_MAX);
    }

    #[test]
    fn bad_distance_file_keeps_startup_chain() {
        let path = std::env::temp_dir().join(format!("catena-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "max_distance": -1, "startup_chain": ["digit"] }"#).unwrap();
        let config = load(&path);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();
        assert_eq!(config.startup_chain, vec![ShapeKind::Digit]);
        assert_eq!(config.max_distance, D_MAX);
    }

    #[test]
    fn rejects_inverted_zoom_limits() {
        assert!(matches!(
            Config::from_json(r#"{ "camera": { "min_scale": 50.0, "max_scale": 10.0 } }"#),
            Err(ConfigError::ZoomLimits(_, _))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Config::from_json("{ max_distance: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load(Path::new("does/not/exist/catena.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config {
            startup_chain: vec![ShapeKind::Digit],
            ..Config::default()
        };
        let s = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_json(&s).unwrap(), config);
    }
}
