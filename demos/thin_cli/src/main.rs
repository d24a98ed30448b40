use argh::FromArgs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use voronoi::image::{BinaryImage, ImageSize};
use voronoi::thinning::config::ThinningConfig;
use voronoi::thinning::engine::ThinningEngine;
use voronoi::thinning::parallel::ExecutionStrategy;
use voronoi::thinning::{ThinningAlgorithm, ThinningMode, Thinner};

#[derive(FromArgs)]
/// Thin binary images into one pixel wide skeletons
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Thin(ThinArgs),
    Benchmark(BenchmarkArgs),
    Steps(StepsArgs),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "thin")]
/// thin an image and write the skeleton as a black and white image
struct ThinArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// algorithm identifier
    #[argh(option, short = 'a', default = "String::from(\"guo_hall_fast\")")]
    algorithm: String,

    /// gray level above which a pixel is foreground
    #[argh(option, default = "127")]
    threshold: u8,

    /// only thin the bounding box of the foreground
    #[argh(switch)]
    crop: bool,

    /// abort after this many passes
    #[argh(option)]
    max_passes: Option<usize>,

    /// number of worker threads, 0 runs serially
    #[argh(option)]
    threads: Option<usize>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "benchmark")]
/// time every registered algorithm on an image
struct BenchmarkArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// gray level above which a pixel is foreground
    #[argh(option, default = "127")]
    threshold: u8,

    /// number of timed runs per algorithm
    #[argh(option, default = "5")]
    runs: usize,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "steps")]
/// log how many pixels every pass removes
struct StepsArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// algorithm identifier
    #[argh(option, short = 'a', default = "String::from(\"guo_hall_fast\")")]
    algorithm: String,

    /// gray level above which a pixel is foreground
    #[argh(option, default = "127")]
    threshold: u8,
}

fn read_mask(path: &Path, threshold: u8) -> Result<BinaryImage, Box<dyn std::error::Error>> {
    let gray = image::open(path)?.to_luma8();
    let size = ImageSize {
        width: gray.width() as usize,
        height: gray.height() as usize,
    };
    let data = gray
        .into_raw()
        .into_iter()
        .map(|v| u8::from(v > threshold))
        .collect();
    Ok(BinaryImage::new(size, data)?)
}

fn write_mask(path: &Path, mask: BinaryImage) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (u32::try_from(mask.width())?, u32::try_from(mask.height())?);
    let data = mask.into_vec().into_iter().map(|v| v * 255).collect();
    let gray = image::GrayImage::from_raw(width, height, data)
        .ok_or("mask does not fit into an image buffer")?;
    gray.save(path)?;
    Ok(())
}

fn run_thin(args: ThinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut mask = read_mask(&args.input, args.threshold)?;

    let strategy = match args.threads {
        None => ExecutionStrategy::ParallelRows,
        Some(0) => ExecutionStrategy::Serial,
        Some(n) => ExecutionStrategy::Fixed(n),
    };
    let mut config = ThinningConfig::default()
        .with_crop_to_foreground(args.crop)
        .with_strategy(strategy);
    if let Some(max_passes) = args.max_passes {
        config = config.with_max_passes(max_passes);
    }

    let thinner = Thinner::new(config);
    log::debug!("{:?}", thinner.config());

    let before = mask.count_foreground();
    let output = thinner.thin(ThinningMode::InPlace(&mut mask), &args.algorithm)?;
    let report = output.report();

    log::info!(
        "{}: {:?} after {} passes, {} -> {} foreground pixels",
        args.algorithm,
        report.status,
        report.passes,
        before,
        mask.count_foreground()
    );

    write_mask(&args.output, mask)
}

fn run_benchmark(args: BenchmarkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mask = read_mask(&args.input, args.threshold)?;
    let runs = u32::try_from(args.runs.max(1))?;

    for crop in [false, true] {
        let thinner = Thinner::new(ThinningConfig::default().with_crop_to_foreground(crop));
        for id in thinner.registry().names() {
            let start = Instant::now();
            let mut skeleton = None;
            for _ in 0..runs {
                skeleton = thinner.thin(ThinningMode::CopyOnWrite(&mask), id)?.into_image();
            }
            let elapsed = start.elapsed() / runs;

            log::info!(
                "{:<16} crop={:<5} {:>10.3?} per run, {} skeleton pixels",
                id,
                crop,
                elapsed,
                skeleton.map_or(0, |s| s.count_foreground())
            );
        }
    }

    Ok(())
}

fn run_steps(args: StepsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut mask = read_mask(&args.input, args.threshold)?;
    let algorithm: ThinningAlgorithm = args.algorithm.parse()?;

    let mut engine = ThinningEngine::new(&mut mask, algorithm.rule(), &ThinningConfig::default())?;
    while let Some(stats) = engine.step() {
        log::info!(
            "pass {:>3}: removed {:>6} + {:>6}, {} foreground pixels left",
            stats.pass,
            stats.removed[0],
            stats.removed[1],
            engine.image().count_foreground()
        );
    }
    log::info!("{} finished: {:?}", algorithm, engine.report());

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match args.command {
        Command::Thin(args) => run_thin(args),
        Command::Benchmark(args) => run_benchmark(args),
        Command::Steps(args) => run_steps(args),
    }
}
