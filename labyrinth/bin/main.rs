use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image::ImageFormat;
use labyrinth::{config::DEFAULT_THRESHOLD, solve_image, Crop, SolveConfig, Vector2};
use log::info;

/// Finds a way through a maze image by following the wall on the left.
#[derive(Parser, Debug)]
#[command(name = "labsolve")]
struct Cli {
    /// Image file to read
    #[arg(short = 'f', long = "file")]
    image: PathBuf,

    /// PNG file to write the solved maze to
    #[arg(short, long)]
    output: PathBuf,

    /// Pixels to cut off as [left, top, right, bottom]
    #[arg(short, long, default_value = "[0, 0, 0, 0]")]
    crop: Crop,

    /// Start coordinates in pixels (pre-crop), e.g. [0, 14]
    #[arg(long)]
    start: Vector2,

    /// End coordinates in pixels (pre-crop)
    #[arg(long)]
    end: Vector2,

    /// Values above the brightness threshold are walls
    #[arg(short = 'b', long, default_value_t = DEFAULT_THRESHOLD)]
    brightness_threshold: f64,

    /// Walls are darker than the threshold instead of brighter
    #[arg(long)]
    invert: bool,

    /// Give up after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Sample the whole image once before walking
    #[arg(long)]
    rasterize: bool,

    /// Print a JSON summary of the walk to stdout
    #[arg(long)]
    report: bool,

    /// Log every turn
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn solve_config(&self) -> SolveConfig {
        SolveConfig {
            start: self.start,
            end: self.end,
            threshold: self.brightness_threshold,
            invert: self.invert,
            crop: self.crop,
            max_steps: self.max_steps,
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = cli.solve_config();

    let img = image::open(&cli.image)
        .with_context(|| format!("Could not decode image {}", cli.image.display()))?;
    let mut canvas = img.to_rgba8();

    let report = solve_image(&img, &config, &mut canvas, cli.rasterize)?;
    info!(
        "walked from {} to {} in {} steps",
        report.start, report.end, report.moves
    );

    canvas
        .save_with_format(&cli.output, ImageFormat::Png)
        .with_context(|| format!("Could not save image {}", cli.output.display()))?;

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
