//! `cds inspect`: print what an archive recorded at dump time.

use cds_archive::Archive;
use cds_config::Overrides;

use crate::settings;
use crate::{GlobalArgs, InspectArgs, ReportFormat};

/// Runs the `cds inspect` command.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = Overrides {
        archive: args.archive.clone(),
        ..Overrides::default()
    };
    let settings = settings::resolve(global, &overrides)?;
    let archive = Archive::read(settings.archive_path()?)?;

    match args.format {
        ReportFormat::Text => print!("{}", render_text(&archive)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(archive.header())?),
    }
    Ok(0)
}

fn render_text(archive: &Archive) -> String {
    let header = archive.header();
    let mut out = format!(
        "format version: {}\ntool version:   {}\npayload:        {} bytes, checksum {}\nclasspath:      {} entries\n",
        header.format_version(),
        header.tool_version(),
        archive.payload().len(),
        header.checksum(),
        header.fingerprint().len(),
    );
    for entry in header.fingerprint() {
        out.push_str(&format!(
            "  [{}] {} {} size={} mtime={}\n",
            entry.index,
            entry.kind,
            entry.path.display(),
            entry.size,
            entry.modified,
        ));
    }
    out
}
