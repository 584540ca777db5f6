//! asciigrid CLI - Convert images to ASCII art by glyph brightness

use asciigrid::output::ConsoleOutput;
use asciigrid::shell::{Command, Session};
use asciigrid::{AsciiGridError, Config, Converter, FontRasterizer};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asciigrid", version, about = "Convert images to ASCII art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Font file used to measure character brightness
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Initial output width in characters
    #[arg(short, long)]
    width: Option<u32>,
    /// Render to the console instead of the HTML file
    #[arg(long)]
    console: bool,
    /// Render once with the initial settings and exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<(), AsciiGridError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(font) = args.font {
        config.font = Some(font);
    }
    if let Some(width) = args.width {
        config.initial_chars_in_row = width;
    }
    config.validate().map_err(|message| AsciiGridError::Config {
        path: args.config.clone().unwrap_or_else(asciigrid::config::default_path),
        message,
    })?;

    let font_path = config
        .font
        .clone()
        .ok_or_else(|| AsciiGridError::Font("no font given (use --font or set `font` in config)".into()))?;
    let rasterizer = FontRasterizer::from_file(&font_path)?;
    let converter = Converter::new(rasterizer).with_resolution(config.glyph_resolution);

    let image = image::open(&args.input)?.to_rgb8();
    log::info!("loaded {} ({}x{})", args.input.display(), image.width(), image.height());

    let mut session = Session::new(image, converter, &config);
    if args.console {
        session = session.with_output(Box::new(ConsoleOutput::stdout()));
    }

    if args.once {
        session.execute(Command::Render, &mut std::io::stdout())?;
        return Ok(());
    }

    session.run(std::io::stdin().lock(), std::io::stdout())
}
