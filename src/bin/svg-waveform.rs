use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use svg_waveform::{BarStyle, ChannelMode, RenderOptions, Rgba8};

const DEFAULT_RESOLUTION: usize = 1000;

#[derive(Parser, Debug)]
#[command(name = "svg-waveform", version, about = "Render a WAV or MP3 file as a waveform image")]
struct Cli {
    /// Input audio file (.wav or .mp3).
    input: PathBuf,

    /// Output path. Defaults to the input path with the format's extension.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Output image format.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Number of bars (default 1000).
    #[arg(long, short)]
    resolution: Option<usize>,

    /// Image width in pixels (default: resolution * 5).
    #[arg(long, short)]
    width: Option<u32>,

    /// Image height in pixels (default: 540).
    #[arg(long)]
    height: Option<u32>,

    /// Color preset, applied to colors not set elsewhere.
    #[arg(long, short, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,

    /// Bar shape: `min-max` or `rms`.
    #[arg(long, value_parser = serde_name::<BarStyle>)]
    style: Option<BarStyle>,

    /// Bar color as #rrggbb.
    #[arg(long, value_parser = Rgba8::from_hex)]
    color: Option<Rgba8>,

    /// Background color as #rrggbb.
    #[arg(long, value_parser = Rgba8::from_hex)]
    background: Option<Rgba8>,

    /// JSON render options; flags given on the command line take precedence.
    #[arg(long)]
    options: Option<PathBuf>,

    /// How multi-channel audio collapses into one waveform: `first` or `mix`.
    #[arg(long, value_parser = serde_name::<ChannelMode>, default_value = "first")]
    channels: ChannelMode,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Theme {
    Light,
    Dark,
    Plain,
}

impl Theme {
    /// `(background, bars)`
    fn colors(self) -> (Option<Rgba8>, Option<Rgba8>) {
        match self {
            Self::Light => (Some(Rgba8::WHITE), Some(Rgba8::rgb(0x22, 0x22, 0x22))),
            Self::Dark => (
                Some(Rgba8::rgb(0x12, 0x14, 0x1c)),
                Some(Rgba8::rgb(0xe6, 0xe6, 0xe6)),
            ),
            Self::Plain => (None, None),
        }
    }
}

/// Parse a flag value by the type's serde name, so flags and JSON options agree.
fn serde_name<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_owned())).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let options = build_options(&cli)?;
    tracing::info!(
        input = %cli.input.display(),
        resolution = options.resolution,
        "rendering waveform"
    );

    let svg = svg_waveform::render_path(&cli.input, options, cli.channels)
        .with_context(|| format!("render '{}'", cli.input.display()))?;

    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(cli.format.extension()));
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    match cli.format {
        OutputFormat::Svg => std::fs::write(&out, svg.as_bytes())
            .with_context(|| format!("write svg '{}'", out.display()))?,
        OutputFormat::Png => svg
            .to_rgba_image()?
            .save_with_format(&out, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", out.display()))?,
    }

    tracing::debug!(bars = svg.bars.len(), "done");
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_options_json(path: &Path) -> anyhow::Result<RenderOptions> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let opts: RenderOptions = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse options JSON '{}'", path.display()))?;
    Ok(opts)
}

fn build_options(cli: &Cli) -> anyhow::Result<RenderOptions> {
    let mut opts = match &cli.options {
        Some(path) => read_options_json(path)?,
        None => RenderOptions::default(),
    };

    if let Some(resolution) = cli.resolution {
        opts.resolution = resolution;
    } else if opts.resolution == 0 {
        opts.resolution = DEFAULT_RESOLUTION;
    }
    if cli.width.is_some() {
        opts.width = cli.width;
    }
    if cli.height.is_some() {
        opts.height = cli.height;
    }
    if cli.color.is_some() {
        opts.color = cli.color;
    }
    if cli.background.is_some() {
        opts.background = cli.background;
    }
    if let Some(style) = cli.style {
        opts.style = style;
    }

    let (background, color) = cli.theme.colors();
    opts.background = opts.background.or(background);
    opts.color = opts.color.or(color);
    Ok(opts)
}
