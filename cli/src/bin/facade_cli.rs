use clap::{Parser, Subcommand};
use cli::{AnalysisJob, JobError};
use color_eyre::eyre::Result;
use facade::{
    AnalysisMode, Analyzer, HighlightCompositor, LabelStyle,
    algorithms::{WallThresholds, WindowThresholds},
    io,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one combined mask (windows red, wall blue, background black)
    Combined {
        /// Path to the clean building photo
        #[arg(short, long)]
        reference: PathBuf,
        /// Path to the combined mask image
        #[arg(short, long)]
        mask: PathBuf,
        /// Directory for result.png / result.json
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Red-channel floor for the window rule
        #[arg(long, default_value = "80")]
        window_floor: u8,
        /// Red-over-green/blue margin for the window rule
        #[arg(long, default_value = "30")]
        window_margin: u8,
        /// TTF/OTF font for the label text
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Analyze separate window and facade masks (wall by subtraction)
    TwoMask {
        #[arg(short, long)]
        reference: PathBuf,
        /// Mask marking windows vs everything else
        #[arg(short, long)]
        window_mask: PathBuf,
        /// Mask marking the whole facade vs everything else
        #[arg(short, long)]
        facade_mask: PathBuf,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Analyze a photo-with-red-overlay mask (red-channel delta rule)
    Overlay {
        #[arg(short, long)]
        reference: PathBuf,
        /// The reference photo with translucent red painted over windows
        #[arg(short, long)]
        mask: PathBuf,
        /// Minimum red-channel increase over the reference
        #[arg(long, default_value = "30")]
        delta: i16,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Run an analysis described by a TOML/JSON job file
    Job {
        /// Path to the job file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the available analysis modes and their JSON schema
    Modes,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Combined {
            reference,
            mask,
            output_dir,
            window_floor,
            window_margin,
            font,
        } => {
            let mode = AnalysisMode::CombinedMask {
                window_thresholds: WindowThresholds {
                    floor: window_floor,
                    margin: window_margin,
                },
                wall_thresholds: WallThresholds::default(),
            };
            let job = AnalysisJob {
                reference: path_string(&reference),
                output_dir: path_string(&output_dir),
                mask: Some(path_string(&mask)),
                window_mask: None,
                facade_mask: None,
                font: font.as_deref().map(path_string),
                mode,
            };
            run_job(&job)
        }
        Commands::TwoMask {
            reference,
            window_mask,
            facade_mask,
            output_dir,
            font,
        } => {
            let job = AnalysisJob {
                reference: path_string(&reference),
                output_dir: path_string(&output_dir),
                mask: None,
                window_mask: Some(path_string(&window_mask)),
                facade_mask: Some(path_string(&facade_mask)),
                font: font.as_deref().map(path_string),
                mode: AnalysisMode::TwoMask {
                    window_thresholds: WindowThresholds::default(),
                    wall_thresholds: WallThresholds::default(),
                },
            };
            run_job(&job)
        }
        Commands::Overlay {
            reference,
            mask,
            delta,
            output_dir,
            font,
        } => {
            let job = AnalysisJob {
                reference: path_string(&reference),
                output_dir: path_string(&output_dir),
                mask: Some(path_string(&mask)),
                window_mask: None,
                facade_mask: None,
                font: font.as_deref().map(path_string),
                mode: AnalysisMode::OverlayOnPhoto {
                    delta,
                    wall_thresholds: WallThresholds::default(),
                },
            };
            run_job(&job)
        }
        Commands::Job { config } => {
            let job = AnalysisJob::from_file(&config)?;
            run_job(&job)
        }
        Commands::Modes => {
            print_modes()
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn build_analyzer(job: &AnalysisJob) -> Result<Analyzer> {
    let mut builder = job.mode.builder();
    if let Some(font) = &job.font {
        let compositor = HighlightCompositor {
            label: LabelStyle::with_font_file(font)?,
            ..Default::default()
        };
        builder = builder.set_renderer(compositor);
    }
    Ok(builder.build())
}

fn run_job(job: &AnalysisJob) -> Result<()> {
    info!(mode = %job.mode, "{}", job.mode.description());
    std::fs::create_dir_all(&job.output_dir)?;

    let reference = io::load_rgb(&job.reference)?;
    let analyzer = build_analyzer(job)?;

    let (analysis, vis) = if job.mode.is_two_mask() {
        let window_mask =
            io::load_rgb(job.window_mask.as_ref().ok_or(JobError::MissingTwoMasks)?)?;
        let facade_mask =
            io::load_rgb(job.facade_mask.as_ref().ok_or(JobError::MissingTwoMasks)?)?;
        let baseline = job.mode.needs_reference().then_some(&reference);
        let analysis = analyzer.analyze_two_mask(&window_mask, &facade_mask, baseline)?;
        let vis = analyzer.visualize_two_mask(
            &reference,
            &window_mask,
            &facade_mask,
            analysis.result.window_ratio(),
        )?;
        (analysis, vis)
    } else {
        let mask = io::load_rgb(
            job.mask
                .as_ref()
                .ok_or_else(|| JobError::MissingMask(job.mode.to_string()))?,
        )?;
        let baseline = job.mode.needs_reference().then_some(&reference);
        let analysis = analyzer.analyze(&mask, baseline)?;
        let vis = analyzer.visualize(&reference, &mask, analysis.result.window_ratio())?;
        (analysis, vis)
    };

    println!("{}", analysis.result.summary());

    let vis_path = Path::new(&job.output_dir).join("result.png");
    io::save_png(&vis, &vis_path)?;
    let json_path = Path::new(&job.output_dir).join("result.json");
    analysis.result.to_json_file(&json_path)?;
    info!(
        vis = %vis_path.display(),
        report = %json_path.display(),
        "analysis complete"
    );

    Ok(())
}

fn print_modes() -> Result<()> {
    println!("Available modes:");
    for name in AnalysisMode::mode_names() {
        println!("  - {name}");
    }
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&AnalysisMode::schema())?
    );
    Ok(())
}
