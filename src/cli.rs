//! Command-line interface for bangla-render.
//!
//! Subcommands render standalone words and paragraphs, export tight label
//! bitmaps, build demo figures and write a default configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bangla_render_config::{Background, Color, Config};
use bangla_render_fonts::{FontSpec, shared_engine};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use crate::compositor::with_shared_compositor;
use crate::demos::{DemoKind, run_demo};
use crate::placement::{HorizontalAlign, VerticalAlign};
use crate::raster::{ParagraphLayout, RenderRequest, rasterize, render_paragraph, render_text};

/// bangla-render - correctly shaped Bengali text for plots and images
#[derive(Parser)]
#[command(name = "bangla-render")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ~/.config/bangla-render/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level for the debug log (overrides RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Font and color overrides shared by the rendering subcommands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Font family (default from config)
    #[arg(long)]
    pub font_family: Option<String>,

    /// Font size in points
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Text color: a name or #rgb / #rrggbb / #rrggbbaa
    #[arg(long)]
    pub color: Option<Color>,

    /// Background color, or "transparent"
    #[arg(long)]
    pub background: Option<Background>,
}

impl StyleArgs {
    fn request(&self, text: &str, default_size: f32, config: &Config) -> RenderRequest {
        let family = self
            .font_family
            .clone()
            .unwrap_or_else(|| config.font_family.clone());
        RenderRequest::new(text, FontSpec::new(family, self.font_size.unwrap_or(default_size)))
            .with_color(self.color.unwrap_or(config.color))
            .with_background(self.background.unwrap_or(config.standalone.background))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one line of text into a fixed-size PNG
    Text {
        text: String,

        /// Output PNG path
        #[arg(short, long, default_value = "bangla_text.png")]
        output: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Render word-wrapped text into a fixed-size PNG
    Paragraph {
        text: String,

        /// Output PNG path
        #[arg(short, long, default_value = "bangla_paragraph.png")]
        output: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Margin around the text block in pixels
        #[arg(long)]
        margin: Option<u32>,

        /// Horizontal flow: left, center or right
        #[arg(long, default_value = "left")]
        align: String,

        /// Vertical flow: top, center or bottom
        #[arg(long, default_value = "top")]
        valign: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Export a tightly cropped label bitmap as PNG
    Label {
        text: String,

        /// Output PNG path
        #[arg(short, long, default_value = "bangla_label.png")]
        output: PathBuf,

        /// Transparent margin around the ink in pixels
        #[arg(long)]
        padding: Option<u32>,

        /// Turn the bitmap a quarter counter-clockwise, as for a y-axis label
        #[arg(long)]
        rotate: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Build a demo figure
    Demo {
        #[arg(value_enum)]
        kind: DemoKind,

        /// Output PNG path (default depends on the demo)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Config::load().context("loading default configuration"),
    }
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config;
    let load = || load_config(config_path.as_deref());

    match cli.command {
        Commands::Text {
            text,
            output,
            width,
            height,
            style,
        } => {
            let config = load()?;
            let standalone = &config.standalone;
            let request = style.request(&text, standalone.text_font_size, &config);
            let mut engine = shared_engine().lock();
            let path = render_text(
                &mut *engine,
                &request,
                width.unwrap_or(standalone.text_width),
                height.unwrap_or(standalone.text_height),
                &output,
            )?;
            println!("{}", path.display());
        }
        Commands::Paragraph {
            text,
            output,
            width,
            height,
            margin,
            align,
            valign,
            style,
        } => {
            let config = load()?;
            let standalone = &config.standalone;
            let request = style.request(&text, standalone.paragraph_font_size, &config);
            let layout = ParagraphLayout::new(
                width.unwrap_or(standalone.paragraph_width),
                height.unwrap_or(standalone.paragraph_height),
                margin.unwrap_or(standalone.paragraph_margin),
            )
            .with_alignment(
                HorizontalAlign::from_token(&align),
                VerticalAlign::from_token(&valign),
            );
            let mut engine = shared_engine().lock();
            let path = render_paragraph(&mut *engine, &request, &layout, &output)?;
            println!("{}", path.display());
        }
        Commands::Label {
            text,
            output,
            padding,
            rotate,
            style,
        } => {
            let config = load()?;
            // Labels default to transparent so they can be composited elsewhere
            let request = style
                .request(&text, config.title.font_size, &config)
                .with_background(style.background.unwrap_or(Background::Transparent))
                .with_padding(padding.unwrap_or(config.padding));
            let bitmap = {
                let mut engine = shared_engine().lock();
                rasterize(&mut *engine, &request)?
            };
            let bitmap = if rotate { bitmap.rotated_ccw() } else { bitmap };
            if bitmap.is_empty() {
                bail!("label {:?} produced an empty bitmap", text);
            }
            bitmap
                .to_rgba8()
                .save_with_format(&output, image::ImageFormat::Png)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "{} ({}x{})",
                output.display(),
                bitmap.width(),
                bitmap.height()
            );
        }
        Commands::Demo { kind, output } => {
            let config = load()?;
            let output = output.unwrap_or_else(|| PathBuf::from(kind.default_file_name()));
            let path = with_shared_compositor(&config, |compositor| {
                run_demo(compositor, kind, &output)
            })?;
            println!("{}", path.display());
        }
        Commands::InitConfig { force } => {
            let path = config_path.clone().unwrap_or_else(Config::config_path);
            init_config(&path, force)?;
        }
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    Config::default()
        .save_to(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
