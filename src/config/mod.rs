use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// Which projection the canvas uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Mercator,
    #[value(alias = "ortho")]
    Orthographic,
}

fn default_projection() -> ProjectionKind {
    ProjectionKind::Mercator
}
fn default_center() -> f64 {
    0.0
}
fn default_size() -> f64 {
    800.0
}
fn default_color() -> String {
    "gold".to_string()
}
fn default_line_width() -> f64 {
    1.0
}
fn default_margin() -> f64 {
    10.0
}
fn default_background() -> String {
    "white".to_string()
}
fn default_offset() -> f64 {
    0.0
}
fn default_simplify() -> f64 {
    0.0
}
fn default_mirror() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_projection")]
    pub projection: ProjectionKind,
    #[serde(default = "default_center")]
    pub center_lat: f64,
    #[serde(default = "default_center")]
    pub center_lon: f64,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_offset")]
    pub lat_offset: f64,
    #[serde(default = "default_offset")]
    pub lon_offset: f64,
    #[serde(default = "default_mirror")]
    pub mirror: bool,
    #[serde(default)]
    pub graticule: Option<f64>,
    #[serde(default = "default_simplify")]
    pub simplify: f64,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            projection: default_projection(),
            center_lat: default_center(),
            center_lon: default_center(),
            size: default_size(),
            color: default_color(),
            line_width: default_line_width(),
            margin: default_margin(),
            background: default_background(),
            lat_offset: default_offset(),
            lon_offset: default_offset(),
            mirror: default_mirror(),
            graticule: None,
            simplify: default_simplify(),
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// Search the usual locations for a config file.
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("mapoverlay.toml"));
    paths.push(PathBuf::from(".mapoverlay.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mapoverlay").join("config.toml"));
        paths.push(config_dir.join("mapoverlay.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".mapoverlay.toml"));
        paths.push(home.join(".config").join("mapoverlay").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.projection, ProjectionKind::Mercator);
        assert_eq!(config.size, 800.0);
        assert_eq!(config.color, "gold");
        assert_eq!(config.margin, 10.0);
        assert_eq!(config.background, "white");
        assert!(!config.mirror);
        assert!(config.graticule.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            input = "japan.geojson"
            projection = "orthographic"
            center_lat = 40.0
            center_lon = 10.0
            color = "deepskyblue"
            line_width = 2.0
            lat_offset = 13.0
            lon_offset = -128.0
            mirror = true
            graticule = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.projection, ProjectionKind::Orthographic);
        assert_eq!(config.input, Some(PathBuf::from("japan.geojson")));
        assert_eq!(config.lat_offset, 13.0);
        assert!(config.mirror);
        assert_eq!(config.graticule, Some(30.0));
    }
}
