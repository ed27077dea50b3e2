//! The `Config` struct, its nested styles, and YAML persistence.

use crate::color::{Background, Color};
use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placement defaults for a label attached outside the axes (title, x-label, y-label).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Font size in points
    pub font_size: f32,
    /// Scale applied to the rasterized bitmap when it is composited
    pub zoom: f32,
    /// Extra gap between the axes and the label, as a figure fraction
    pub extra_pad: f32,
    /// Stacking order of the inserted annotation
    pub z_order: i32,
}

/// Defaults for annotations placed inside the axes (free text, heatmap cells).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// Font size in points
    pub font_size: f32,
    /// Stacking order of the inserted annotation
    pub z_order: i32,
}

/// Fields of a `LabelStyle` that a config file may set individually.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LabelStyleOverrides {
    font_size: Option<f32>,
    zoom: Option<f32>,
    extra_pad: Option<f32>,
    z_order: Option<i32>,
}

impl LabelStyleOverrides {
    fn apply(self, base: LabelStyle) -> LabelStyle {
        LabelStyle {
            font_size: self.font_size.unwrap_or(base.font_size),
            zoom: self.zoom.unwrap_or(base.zoom),
            extra_pad: self.extra_pad.unwrap_or(base.extra_pad),
            z_order: self.z_order.unwrap_or(base.z_order),
        }
    }
}

/// Fields of an `AnnotationStyle` that a config file may set individually.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnnotationStyleOverrides {
    font_size: Option<f32>,
    z_order: Option<i32>,
}

impl AnnotationStyleOverrides {
    fn apply(self, base: AnnotationStyle) -> AnnotationStyle {
        AnnotationStyle {
            font_size: self.font_size.unwrap_or(base.font_size),
            z_order: self.z_order.unwrap_or(base.z_order),
        }
    }
}

// An empty section (`title:` with nothing under it) reads as null.
fn label_style_over<'de, D>(deserializer: D, base: LabelStyle) -> Result<LabelStyle, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = Option::<LabelStyleOverrides>::deserialize(deserializer)?;
    Ok(overrides.unwrap_or_default().apply(base))
}

fn annotation_style_over<'de, D>(
    deserializer: D,
    base: AnnotationStyle,
) -> Result<AnnotationStyle, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = Option::<AnnotationStyleOverrides>::deserialize(deserializer)?;
    Ok(overrides.unwrap_or_default().apply(base))
}

fn title_style<'de, D: Deserializer<'de>>(d: D) -> Result<LabelStyle, D::Error> {
    label_style_over(d, crate::defaults::title_style())
}

fn xlabel_style<'de, D: Deserializer<'de>>(d: D) -> Result<LabelStyle, D::Error> {
    label_style_over(d, crate::defaults::xlabel_style())
}

fn ylabel_style<'de, D: Deserializer<'de>>(d: D) -> Result<LabelStyle, D::Error> {
    label_style_over(d, crate::defaults::ylabel_style())
}

fn text_style<'de, D: Deserializer<'de>>(d: D) -> Result<AnnotationStyle, D::Error> {
    annotation_style_over(d, crate::defaults::text_style())
}

fn cell_style<'de, D: Deserializer<'de>>(d: D) -> Result<AnnotationStyle, D::Error> {
    annotation_style_over(d, crate::defaults::cell_style())
}

/// Subplot margins reserved around the axes grid, as figure fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMargins {
    #[serde(default = "crate::defaults::layout_left")]
    pub left: f32,
    #[serde(default = "crate::defaults::layout_right")]
    pub right: f32,
    #[serde(default = "crate::defaults::layout_bottom")]
    pub bottom: f32,
    #[serde(default = "crate::defaults::layout_top")]
    pub top: f32,
}

impl Default for LayoutMargins {
    fn default() -> Self {
        Self {
            left: crate::defaults::layout_left(),
            right: crate::defaults::layout_right(),
            bottom: crate::defaults::layout_bottom(),
            top: crate::defaults::layout_top(),
        }
    }
}

impl LayoutMargins {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }
}

/// Canvas sizes and fonts for the standalone word/paragraph renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandaloneConfig {
    #[serde(default = "crate::defaults::background")]
    pub background: Background,

    #[serde(default = "crate::defaults::text_width")]
    pub text_width: u32,

    #[serde(default = "crate::defaults::text_height")]
    pub text_height: u32,

    #[serde(default = "crate::defaults::text_font_size")]
    pub text_font_size: f32,

    #[serde(default = "crate::defaults::paragraph_width")]
    pub paragraph_width: u32,

    #[serde(default = "crate::defaults::paragraph_height")]
    pub paragraph_height: u32,

    #[serde(default = "crate::defaults::paragraph_font_size")]
    pub paragraph_font_size: f32,

    /// Margin between the canvas edge and the wrapped text block, in pixels
    #[serde(default = "crate::defaults::paragraph_margin")]
    pub paragraph_margin: u32,
}

impl Default for StandaloneConfig {
    fn default() -> Self {
        Self {
            background: crate::defaults::background(),
            text_width: crate::defaults::text_width(),
            text_height: crate::defaults::text_height(),
            text_font_size: crate::defaults::text_font_size(),
            paragraph_width: crate::defaults::paragraph_width(),
            paragraph_height: crate::defaults::paragraph_height(),
            paragraph_font_size: crate::defaults::paragraph_font_size(),
            paragraph_margin: crate::defaults::paragraph_margin(),
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Font family requested from the shaping engine
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Text color for labels and standalone renders
    #[serde(default = "crate::defaults::color")]
    pub color: Color,

    /// Transparent margin around rasterized labels, in pixels
    #[serde(default = "crate::defaults::padding")]
    pub padding: u32,

    #[serde(
        default = "crate::defaults::title_style",
        deserialize_with = "title_style"
    )]
    pub title: LabelStyle,

    #[serde(
        default = "crate::defaults::xlabel_style",
        deserialize_with = "xlabel_style"
    )]
    pub xlabel: LabelStyle,

    #[serde(
        default = "crate::defaults::ylabel_style",
        deserialize_with = "ylabel_style"
    )]
    pub ylabel: LabelStyle,

    /// Free-form text placed with `text()`
    #[serde(
        default = "crate::defaults::text_style",
        deserialize_with = "text_style"
    )]
    pub text: AnnotationStyle,

    /// Heatmap cell text placed with `add_in_cell()`
    #[serde(
        default = "crate::defaults::cell_style",
        deserialize_with = "cell_style"
    )]
    pub cell: AnnotationStyle,

    #[serde(default)]
    pub layout: LayoutMargins,

    #[serde(default)]
    pub standalone: StandaloneConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_family: crate::defaults::font_family(),
            color: crate::defaults::color(),
            padding: crate::defaults::padding(),
            title: crate::defaults::title_style(),
            xlabel: crate::defaults::xlabel_style(),
            ylabel: crate::defaults::ylabel_style(),
            text: crate::defaults::text_style(),
            cell: crate::defaults::cell_style(),
            layout: LayoutMargins::default(),
            standalone: StandaloneConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_layout(mut self, layout: LayoutMargins) -> Self {
        self.layout = layout;
        self
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific YAML file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (XDG convention on every platform but Windows).
    pub fn config_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("bangla-render").join("config.yaml")
            } else {
                PathBuf::from("config.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("bangla-render")
                    .join("config.yaml")
            } else {
                PathBuf::from("config.yaml")
            }
        }
    }

    /// Check that sizes are positive and layout margins are ordered fractions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let labels = [
            ("title", &self.title),
            ("xlabel", &self.xlabel),
            ("ylabel", &self.ylabel),
        ];
        for (name, style) in labels {
            if style.font_size <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name}.font_size must be positive, got {}",
                    style.font_size
                )));
            }
            if style.zoom <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name}.zoom must be positive, got {}",
                    style.zoom
                )));
            }
        }
        for (name, style) in [("text", &self.text), ("cell", &self.cell)] {
            if style.font_size <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name}.font_size must be positive, got {}",
                    style.font_size
                )));
            }
        }

        let m = &self.layout;
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !(in_unit(m.left) && in_unit(m.right) && in_unit(m.bottom) && in_unit(m.top)) {
            return Err(ConfigError::Validation(format!(
                "layout margins must lie in [0, 1], got left={} right={} bottom={} top={}",
                m.left, m.right, m.bottom, m.top
            )));
        }
        if m.left >= m.right || m.bottom >= m.top {
            return Err(ConfigError::Validation(format!(
                "layout requires left < right and bottom < top, \
                 got left={} right={} bottom={} top={}",
                m.left, m.right, m.bottom, m.top
            )));
        }

        let s = &self.standalone;
        if s.text_width == 0 || s.text_height == 0 {
            return Err(ConfigError::Validation(
                "standalone text canvas must be non-empty".to_string(),
            ));
        }
        let fits = |side: u32| {
            s.paragraph_margin
                .checked_mul(2)
                .is_some_and(|margins| side > margins)
        };
        if !fits(s.paragraph_width) || !fits(s.paragraph_height) {
            return Err(ConfigError::Validation(format!(
                "paragraph margin {} leaves no room in a {}x{} canvas",
                s.paragraph_margin, s.paragraph_width, s.paragraph_height
            )));
        }

        Ok(())
    }
}
