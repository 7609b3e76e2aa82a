use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "meme-captioner-rust",
    version,
    about = "Overlay meme captions on images over HTTP or from the command line"
)]
struct Cli {
    /// Host address for the HTTP server
    #[arg(long = "host")]
    host: Option<String>,

    /// Port for the HTTP server
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,

    /// Directory holding the uploads/ and memes/ asset roots
    #[arg(long = "public-dir")]
    public_dir: Option<String>,

    /// Caption a single image file and exit instead of serving
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Top caption text
    #[arg(long = "top")]
    top_text: Option<String>,

    /// Bottom caption text
    #[arg(long = "bottom")]
    bottom_text: Option<String>,

    /// Output path for the captioned PNG (defaults to <input>_meme.png)
    #[arg(short = 'o', long = "out")]
    out: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    meme_captioner_rust::logging::init(cli.verbose)?;

    let settings_path = cli.read_settings.as_deref().map(Path::new);
    let mut settings = meme_captioner_rust::settings::load_settings(settings_path)?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(dir) = cli.public_dir {
        settings.public_dir = PathBuf::from(dir);
    }

    if let Some(data) = cli.data.as_deref() {
        return caption_file(
            &settings,
            Path::new(data),
            cli.top_text.as_deref().unwrap_or(""),
            cli.bottom_text.as_deref().unwrap_or(""),
            cli.out.as_deref().map(Path::new),
        );
    }

    let addr = settings.bind_addr();
    meme_captioner_rust::run_server(settings, addr).await
}

fn caption_file(
    settings: &meme_captioner_rust::settings::Settings,
    input: &Path,
    top_text: &str,
    bottom_text: &str,
    out: Option<&Path>,
) -> Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("failed to read image: {}", input.display()))?;
    let compositor = meme_captioner_rust::Compositor::new(
        settings.overlay_font_family.as_deref(),
        settings.overlay_font_path.as_deref().map(Path::new),
    )?;
    let output = compositor
        .caption(&bytes, top_text, bottom_text)
        .with_context(|| format!("failed to caption image: {}", input.display()))?;
    let out_path = match out {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input)?,
    };
    std::fs::write(&out_path, output)
        .with_context(|| format!("failed to write captioned image: {}", out_path.display()))?;
    println!("{}", out_path.display());
    Ok(())
}

fn default_output_path(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|value| value.to_str())
        .ok_or_else(|| anyhow!("cannot derive an output name from {}", input.display()))?;
    Ok(input.with_file_name(format!("{}_meme.png", stem)))
}
