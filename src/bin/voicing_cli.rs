use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

use voicing_classifier::analysis::segments::{select_example_frames, DEFAULT_EXAMPLE_LIMIT};
use voicing_classifier::audio::{read_wav_mono, Signal};
use voicing_classifier::error::log_audio_error;
use voicing_classifier::report::{write_class_segments, AnalysisReport};
use voicing_classifier::{AppConfig, VoicingClass, VoicingPipeline};

#[derive(Parser, Debug)]
#[command(
    name = "voicing_cli",
    about = "Classify frames of a mono WAV file as silent, unvoiced or voiced"
)]
struct Cli {
    /// Log progress to stderr (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a whole file and print the JSON report
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Directory to write report.json (and exported audio) into
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write per-class WAV files and example frame diagnostics (requires --output)
        #[arg(long, requires = "output")]
        export_segments: bool,
    },
    /// Print full features, including autocorrelation, for one frame
    Frame {
        #[command(flatten)]
        input: InputArgs,
        /// Frame index
        #[arg(long)]
        index: usize,
    },
    /// Print the default configuration as JSON
    Defaults,
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Mono WAV file to analyse
    #[arg(short, long)]
    input: PathBuf,
    /// JSON configuration file (missing sections use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override frame length in milliseconds
    #[arg(long)]
    frame_length_ms: Option<f32>,
    /// Override frame stride in milliseconds
    #[arg(long)]
    frame_stride_ms: Option<f32>,
}

impl InputArgs {
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::try_load_from_file(path)?,
            None => AppConfig::default(),
        };
        if let Some(ms) = self.frame_length_ms {
            config.framing.frame_length_ms = ms;
        }
        if let Some(ms) = self.frame_stride_ms {
            config.framing.frame_stride_ms = ms;
        }
        Ok(config)
    }

    fn load_signal(&self) -> Result<Signal> {
        let signal = read_wav_mono(&self.input).map_err(|err| {
            log_audio_error(&err, "load_signal");
            err
        })?;
        info!(
            path = %self.input.display(),
            sample_rate = signal.sample_rate,
            duration_secs = signal.duration_secs() as f64,
            "loaded input"
        );
        Ok(signal)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            export_segments,
        } => run_analyze(&input, output.as_deref(), export_segments),
        Commands::Frame { input, index } => run_frame(&input, index),
        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&AppConfig::default())?);
            Ok(())
        }
    }
}

fn run_analyze(input: &InputArgs, output_dir: Option<&Path>, export_segments: bool) -> Result<()> {
    let config = input.load_config()?;
    let pipeline = VoicingPipeline::from_config(&config)?;
    let signal = input.load_signal()?;

    let output = pipeline
        .process(&signal.samples, signal.sample_rate)
        .with_context(|| format!("analysing {}", input.input.display()))?;

    let summary = output.summary();
    for class in VoicingClass::ALL {
        info!(
            class = class.name(),
            frames = summary.count(class),
            percent = summary.percentage(class) as f64,
            "classification"
        );
    }

    let report = AnalysisReport::build(
        Some(input.input.display().to_string()),
        signal.samples.len(),
        pipeline.classifier().thresholds(),
        &output,
    );
    let json = serde_json::to_string_pretty(&report)?;

    let Some(dir) = output_dir else {
        println!("{json}");
        return Ok(());
    };

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let report_path = dir.join("report.json");
    fs::write(&report_path, &json).with_context(|| format!("writing {}", report_path.display()))?;
    info!(path = %report_path.display(), "wrote report");

    if export_segments {
        let segments = output.split_by_class(&signal.samples);
        write_class_segments(dir, &segments, signal.sample_rate)?;

        let frames_dir = dir.join("frames");
        fs::create_dir_all(&frames_dir)
            .with_context(|| format!("creating {}", frames_dir.display()))?;
        for index in select_example_frames(&output.labels, DEFAULT_EXAMPLE_LIMIT) {
            let diagnostic =
                pipeline.diagnose_frame(&signal.samples, signal.sample_rate, index)?;
            let path = frames_dir.join(format!("frame_{index}.json"));
            fs::write(&path, serde_json::to_string_pretty(&diagnostic)?)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(index, label = diagnostic.label.name(), "wrote frame diagnostic");
        }
    }

    println!("{json}");
    Ok(())
}

fn run_frame(input: &InputArgs, index: usize) -> Result<()> {
    let config = input.load_config()?;
    let pipeline = VoicingPipeline::from_config(&config)?;
    let signal = input.load_signal()?;

    let diagnostic = pipeline
        .diagnose_frame(&signal.samples, signal.sample_rate, index)
        .with_context(|| format!("inspecting frame {} of {}", index, input.input.display()))?;
    println!("{}", serde_json::to_string_pretty(&diagnostic)?);
    Ok(())
}
