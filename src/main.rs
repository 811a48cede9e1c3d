use chrono::{Local, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use dynamic_wallpaper::container::read_attribute;
use dynamic_wallpaper::{
    CaptureTimezone, DESKTOP_PLIST_ATTRIBUTE, ExifRecord, ImageFrame, MetadataExtractor,
    ScheduleDocument, ScheduleMode, Selection, WallpaperExporter,
};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Create {
            frames,
            mode,
            output,
            attribute_key,
        } => run_create(&frames, mode.into(), output, attribute_key).await,
        Commands::Preview { frames, json } => run_preview(&frames, json),
        Commands::Inspect {
            file,
            attribute_key,
        } => run_inspect(file, &attribute_key),
    }
}

async fn run_create(
    args: &FrameArgs,
    mode: ScheduleMode,
    output: PathBuf,
    attribute_key: String,
) -> color_eyre::Result<()> {
    let selection = load_selection(args);

    if mode == ScheduleMode::SunBased && !selection.all_exif_complete() {
        println!("Some images are missing EXIF date or GPS and get no schedule entry:");
        for frame in selection.missing_exif() {
            println!("  {}", frame.file_name());
        }
    }

    let exporter = WallpaperExporter::builder()
        .attribute_key(attribute_key)
        .build();
    let report = exporter
        .export_in_background(output, selection.frames().to_vec(), mode)
        .await
        .wrap_err("Failed to export dynamic wallpaper")?;

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    println!(
        "Exported {} of {} frames ({mode}, {} schedule entries) to {}",
        report.frames_written,
        report.frames_selected,
        report.document.len(),
        report.destination.display()
    );
    Ok(())
}

fn run_preview(args: &FrameArgs, json: bool) -> color_eyre::Result<()> {
    let previews = load_selection(args).previews();

    if json {
        println!("{}", serde_json::to_string_pretty(&previews)?);
        return Ok(());
    }
    for preview in previews {
        print!(
            "{:>3}  {}  {}",
            preview.position,
            preview.display_time.format("%H:%M:%S"),
            preview.file_name
        );
        match (
            preview.captured_at,
            preview.latitude,
            preview.longitude,
            preview.solar_elevation,
        ) {
            (Some(at), Some(lat), Some(lon), Some(elevation)) => println!(
                "  taken {}  GPS: {lat:.4}, {lon:.4}  Solar Elevation: {elevation:.2}°",
                at.format("%Y-%m-%d %H:%M:%S")
            ),
            _ => println!("  No EXIF or GPS data"),
        }
    }
    Ok(())
}

fn run_inspect(file: PathBuf, attribute_key: &str) -> color_eyre::Result<()> {
    let value = read_attribute(&file, attribute_key)
        .wrap_err_with(|| format!("Failed to read {attribute_key} from {}", file.display()))?
        .ok_or_else(|| eyre!("{} carries no {attribute_key} attribute", file.display()))?;
    let document = ScheduleDocument::from_attribute_value(&value)?;
    let mode = document.mode();
    info!(
        path = %file.display(),
        %mode,
        key = mode.document_key(),
        entries = document.len(),
        "read schedule"
    );
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Reads metadata for every input and assigns display times.
///
/// An explicit `@HH:MM` wins; otherwise the capture time on the local clock is
/// used, and the current time when the photo has none.
fn load_selection(args: &FrameArgs) -> Selection {
    let capture_timezone = if args.gps_timezone {
        CaptureTimezone::GpsLocation
    } else {
        CaptureTimezone::ProcessLocal
    };
    let mut extractor = match MetadataExtractor::builder()
        .maybe_exiftool_path(args.exiftool.clone())
        .capture_timezone(capture_timezone)
        .build()
    {
        Ok(extractor) => Some(extractor),
        Err(err) => {
            warn!(error = %err, "continuing without EXIF data");
            None
        }
    };

    let now = Local::now().time();
    args.inputs
        .iter()
        .map(|input| {
            let exif = extractor
                .as_mut()
                .map_or_else(ExifRecord::empty, |e| e.extract(&input.path));
            let mut frame = ImageFrame::from_exif(input.path.clone(), exif, now);
            if let Some(time) = input.time {
                frame.set_display_time(time);
            }
            frame
        })
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Create time- and sun-scheduled dynamic wallpapers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a dynamic wallpaper from a set of photos.
    Create {
        #[command(flatten)]
        frames: FrameArgs,
        /// What decides when each frame is shown.
        #[arg(short, long, value_enum, default_value_t = ModeArg::Time)]
        mode: ModeArg,
        /// Destination file.
        #[arg(short, long)]
        output: PathBuf,
        /// Extended attribute the schedule is stored under.
        #[arg(long, default_value = DESKTOP_PLIST_ATTRIBUTE)]
        attribute_key: String,
    },
    /// List the photos in display order with their EXIF data and sun elevation.
    Preview {
        #[command(flatten)]
        frames: FrameArgs,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the schedule stored on an existing wallpaper file.
    Inspect {
        file: PathBuf,
        #[arg(long, default_value = DESKTOP_PLIST_ATTRIBUTE)]
        attribute_key: String,
    },
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Photos, optionally with a display time: `photo.jpg@07:30`.
    ///
    /// Frames are decoded with the `image` crate (JPEG, PNG, TIFF, WebP and
    /// similar). HEIC/HEIF photos are not supported and are skipped with a
    /// warning; convert them to JPEG first.
    #[arg(required = true)]
    inputs: Vec<FrameInput>,
    /// A specific exiftool executable instead of the one on PATH.
    #[arg(long)]
    exiftool: Option<PathBuf>,
    /// Read capture times in the timezone of the photo's GPS position instead of the local one.
    #[arg(long)]
    gps_timezone: bool,
}

#[derive(Debug, Clone)]
struct FrameInput {
    path: PathBuf,
    time: Option<NaiveTime>,
}

impl FromStr for FrameInput {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((path, time)) = s.rsplit_once('@')
            && let Ok(time) = NaiveTime::parse_from_str(time, "%H:%M")
        {
            return Ok(Self {
                path: PathBuf::from(path),
                time: Some(time),
            });
        }
        Ok(Self {
            path: PathBuf::from(s),
            time: None,
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Time,
    Sun,
}

impl From<ModeArg> for ScheduleMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Time => Self::TimeBased,
            ModeArg::Sun => Self::SunBased,
        }
    }
}
