//! Application configuration
//!
//! Defaults reproduce the reference photo setup. Individual values can be
//! overridden through builder methods or, for the asset directory, window
//! size and vsync, through environment variables.

use std::path::PathBuf;

use cgmath::{Point3, Vector3};

/// Environment variable overriding the texture asset directory
pub const ASSETS_ENV: &str = "STILL_LIFE_ASSETS";
/// Environment variable overriding the window size, formatted `WIDTHxHEIGHT`
pub const WINDOW_ENV: &str = "STILL_LIFE_WINDOW";
/// Environment variable toggling vsync, `0`/`false`/`off` to disable
pub const VSYNC_ENV: &str = "STILL_LIFE_VSYNC";

/// Initial camera and projection parameters
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub world_up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Half of the horizontal extent covered by the orthographic projection
    pub ortho_half_extent: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 15.0, 20.0),
            front: Vector3::new(0.0, -0.5, -2.0),
            world_up: Vector3::unit_y(),
            zoom: 80.0,
            movement_speed: 20.0,
            mouse_sensitivity: 0.1,
            znear: 0.1,
            zfar: 100.0,
            ortho_half_extent: 20.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: (u32, u32),
    pub asset_dir: PathBuf,
    pub clear_color: wgpu::Color,
    pub vsync: bool,
    pub camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Still Life".to_string(),
            window_size: (1000, 800),
            asset_dir: PathBuf::from("textures"),
            clear_color: wgpu::Color::BLACK,
            vsync: true,
            camera: CameraConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(ASSETS_ENV) {
            config.asset_dir = PathBuf::from(dir);
        }

        if let Ok(size) = std::env::var(WINDOW_ENV) {
            match parse_window_size(&size) {
                Some(size) => config.window_size = size,
                None => log::warn!("ignoring malformed {WINDOW_ENV}='{size}', expected WIDTHxHEIGHT"),
            }
        }

        if let Ok(value) = std::env::var(VSYNC_ENV) {
            match parse_switch(&value) {
                Some(vsync) => config.vsync = vsync,
                None => log::warn!("ignoring malformed {VSYNC_ENV}='{value}', expected on or off"),
            }
        }

        config
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.window_title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width.max(1), height.max(1));
        self
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }
}

fn parse_window_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.trim().split_once(['x', 'X'])?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = AppConfig::default();
        assert_eq!(config.window_size, (1000, 800));
        assert_eq!(config.asset_dir, PathBuf::from("textures"));
        assert_eq!(config.camera.zoom, 80.0);
        assert_eq!(config.camera.movement_speed, 20.0);
    }

    #[test]
    fn test_window_size_parsing() {
        assert_eq!(parse_window_size("1280x720"), Some((1280, 720)));
        assert_eq!(parse_window_size(" 640 X 480 "), Some((640, 480)));
        assert_eq!(parse_window_size("0x480"), None);
        assert_eq!(parse_window_size("wide"), None);
        assert_eq!(parse_window_size("1280x"), None);
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_title("Nursery")
            .with_window_size(0, 600)
            .with_asset_dir("assets/textures")
            .with_vsync(false);
        assert_eq!(config.window_title, "Nursery");
        assert!(!config.vsync);
        assert_eq!(config.window_size, (1, 600));
        assert_eq!(config.asset_dir, PathBuf::from("assets/textures"));
    }

    // Sole test touching the process environment
    #[test]
    fn test_from_env_overrides() {
        std::env::set_var(ASSETS_ENV, "/srv/still-life/textures");
        std::env::set_var(WINDOW_ENV, "640x480");
        std::env::set_var(VSYNC_ENV, "off");
        let config = AppConfig::from_env();
        assert_eq!(config.asset_dir, PathBuf::from("/srv/still-life/textures"));
        assert_eq!(config.window_size, (640, 480));
        assert!(!config.vsync);

        std::env::set_var(WINDOW_ENV, "big");
        std::env::set_var(VSYNC_ENV, "sometimes");
        let config = AppConfig::from_env();
        assert_eq!(config.window_size, (1000, 800));
        assert!(config.vsync);

        std::env::remove_var(ASSETS_ENV);
        std::env::remove_var(WINDOW_ENV);
        std::env::remove_var(VSYNC_ENV);
        let config = AppConfig::from_env();
        assert_eq!(config.asset_dir, PathBuf::from("textures"));
        assert_eq!(config.window_size, (1000, 800));
    }
}
