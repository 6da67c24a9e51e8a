use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{Point, Polygon, RegionDefaults};
use crate::error::GeofenceError;
use crate::geometry::Bounds;
use crate::pipeline::Geofence;
use crate::viewport::ViewSettings;

/// Municipal boundary of Ucú, Yucatán as `(lat, lng)` pairs, first vertex repeated
pub const UCU_POLYGON: &[(f64, f64)] = &[
    (21.0650, -89.7750),
    (21.0680, -89.7550),
    (21.0650, -89.7350),
    (21.0450, -89.7250),
    (21.0250, -89.7200),
    (21.0050, -89.7250),
    (20.9950, -89.7350),
    (20.9900, -89.7500),
    (20.9950, -89.7650),
    (21.0100, -89.7750),
    (21.0350, -89.7800),
    (21.0650, -89.7750),
];

pub const UCU_CENTER: (f64, f64) = (21.0317, -89.7464);

/// Pan limits of the map view, wider than the boundary itself
pub const UCU_VIEW_BOUNDS: Bounds = Bounds {
    south: 20.9800,
    west: -89.7900,
    north: 21.0800,
    east: -89.7100,
};

fn default_boundary() -> Vec<(f64, f64)> {
    UCU_POLYGON.to_vec()
}
fn default_notice_secs() -> u64 {
    3
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// Boundary ring as `[lat, lng]` pairs
    #[serde(default = "default_boundary")]
    pub boundary: Vec<(f64, f64)>,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub region: RegionDefaults,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    /// How long the "outside boundary" notice stays up
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            boundary: default_boundary(),
            view: ViewConfig::default(),
            region: RegionDefaults::default(),
            geocoder: GeocoderConfig::default(),
            notice_secs: default_notice_secs(),
        }
    }
}

fn default_center() -> Option<(f64, f64)> {
    Some(UCU_CENTER)
}
fn default_zoom() -> u8 {
    14
}
fn default_min_zoom() -> u8 {
    13
}
fn default_max_zoom() -> u8 {
    18
}
fn default_view_bounds() -> Option<Bounds> {
    Some(UCU_VIEW_BOUNDS)
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    /// Initial centre; the boundary centroid is used when absent
    #[serde(default = "default_center")]
    pub center: Option<(f64, f64)>,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_view_bounds")]
    pub bounds: Option<Bounds>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            bounds: default_view_bounds(),
        }
    }
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}
fn default_user_agent() -> String {
    concat!("geopin/", env!("CARGO_PKG_VERSION"), " (municipal report pin picker)").to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent as `accept-language` when set
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            language: None,
        }
    }
}

impl FileConfig {
    /// Search the standard locations and return the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        debug!(path = %path.display(), "loaded config");
                        return Some(config);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn polygon(&self) -> Result<Polygon, GeofenceError> {
        Polygon::from_pairs(&self.boundary)
    }

    pub fn geofence(&self) -> Result<Geofence, GeofenceError> {
        Ok(Geofence::new(Arc::new(self.polygon()?)))
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }

    /// Resolve the view section against the boundary it frames
    pub fn view_settings(&self, polygon: &Polygon) -> Result<ViewSettings, GeofenceError> {
        let view = &self.view;
        if view.min_zoom > view.max_zoom {
            return Err(GeofenceError::InvalidZoomRange {
                min: view.min_zoom,
                max: view.max_zoom,
            });
        }

        let center = view
            .center
            .map(Point::from)
            .or_else(|| polygon.centroid())
            .unwrap_or_else(|| polygon.bounds().center());

        Ok(ViewSettings {
            center,
            zoom: view.zoom.clamp(view.min_zoom, view.max_zoom),
            min_zoom: view.min_zoom,
            max_zoom: view.max_zoom,
            bounds: view.bounds,
        })
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("geopin.toml"));
    paths.push(PathBuf::from(".geopin.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geopin").join("config.toml"));
        paths.push(config_dir.join("geopin.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geopin.toml"));
    }

    paths
}
