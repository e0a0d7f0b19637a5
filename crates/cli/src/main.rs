use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};

use blobtrack_core::detection::domain::blob_detector::BlobDetectorParams;
use blobtrack_core::output::infrastructure::csv_record_sink::CsvRecordSink;
use blobtrack_core::pipeline::infrastructure::component_factory::{
    create_detector, create_executor, create_tracker_factory,
};
use blobtrack_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use blobtrack_core::pipeline::track_blobs_use_case::TrackBlobsUseCase;
use blobtrack_core::pipeline::tracking_config::TrackingConfig;
use blobtrack_core::shared::constants::{
    DEFAULT_BLOB_COLOR, DEFAULT_BOX_SIZE, DEFAULT_MIN_AREA, DEFAULT_OUTPUT_FILE,
};
use blobtrack_core::tracking::domain::tracker_algorithm::TrackerAlgorithm;
use blobtrack_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// Detect blobs on the first frame of a video and track each one through
/// the remaining frames, writing `frame_index,x,y` rows to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "blobtrack")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Output CSV file.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Tracker algorithm: mosse, boosting, mil, kcf, tld, medianflow or csrt.
    #[arg(long, default_value_t = TrackerAlgorithm::Csrt)]
    algorithm: TrackerAlgorithm,

    /// Side of the square box seeded around each blob, in pixels.
    #[arg(long, default_value_t = DEFAULT_BOX_SIZE)]
    box_size: f64,

    /// Filter detected blobs by area.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    filter_by_area: bool,

    /// Minimum blob area in pixels.
    #[arg(long, default_value_t = DEFAULT_MIN_AREA)]
    min_area: f32,

    /// Filter detected blobs by intensity.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    filter_by_color: bool,

    /// Blob intensity to keep (0 = dark, 255 = bright).
    #[arg(long, default_value_t = DEFAULT_BLOB_COLOR)]
    blob_color: u8,

    /// Update trackers concurrently within each frame.
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    fn tracking_config(&self) -> TrackingConfig {
        TrackingConfig {
            algorithm: self.algorithm,
            box_size: self.box_size,
            detector: BlobDetectorParams {
                filter_by_area: self.filter_by_area,
                min_area: self.min_area,
                filter_by_color: self.filter_by_color,
                blob_color: self.blob_color,
            },
            parallel: self.parallel,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.tracking_config();
    log::debug!("{config:?}");

    let mut use_case = TrackBlobsUseCase::new(
        Box::new(FfmpegReader::new()),
        create_detector(&config)?,
        create_tracker_factory(&config),
        Box::new(CsvRecordSink::new()),
        create_executor(&config),
        Box::new(StdoutPipelineLogger::default()),
        config.initializer(),
    );

    let stats = use_case.execute(&cli.input, &cli.output)?;
    log::info!(
        "Output written to {} ({} rows)",
        cli.output.display(),
        stats.records
    );
    Ok(())
}
