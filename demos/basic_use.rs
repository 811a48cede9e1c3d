use chrono::Local;
use dynamic_wallpaper::{MetadataExtractor, ScheduleMode, Selection, export_dynamic_wallpaper};
use std::path::Path;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut extractor = MetadataExtractor::builder().build()?;
    let selection = Selection::from_sources(
        &mut extractor,
        ["assets/dawn.jpg", "assets/noon.jpg", "assets/dusk.jpg"],
        Local::now().time(),
    );

    for frame in selection.missing_exif() {
        println!("Missing EXIF date or GPS: {}", frame.file_name());
    }

    let report = export_dynamic_wallpaper(
        Path::new("wallpaper.tiff"),
        selection.frames(),
        ScheduleMode::SunBased,
    )?;
    println!("{}", serde_json::to_string_pretty(&report.document)?);

    Ok(())
}
