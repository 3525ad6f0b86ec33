//! kodegen-inliner - turn a captured asset directory into one HTML file

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use kodegen_tools_inliner::{InlineConfig, inline_directory};

#[derive(Parser)]
#[command(name = "kodegen-inliner")]
#[command(version, about = "Inline a captured web page into a single self-contained HTML file", long_about = None)]
#[command(after_help = "EXAMPLES:
    kodegen-inliner -d ./snapshot > page.html           Inline the detected document
    kodegen-inliner -d ./snapshot -i about.html -o a.html   Inline a specific document")]
struct Cli {
    /// Directory holding the captured page and its assets
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dir: PathBuf,

    /// Document to inline instead of the detected one
    #[arg(short, long, value_name = "FILE")]
    inline: Option<String>,

    /// Re-indent embedded JavaScript
    #[arg(short, long)]
    prettify: bool,

    /// Do not embed images
    #[arg(long)]
    no_images: bool,

    /// Do not embed fonts
    #[arg(long)]
    no_fonts: bool,

    /// Do not embed videos
    #[arg(long)]
    no_videos: bool,

    /// Write the document here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log every classification and replacement
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = InlineConfig::builder()
        .asset_dir(&cli.dir)
        .inline_file(cli.inline.clone())
        .prettify(cli.prettify)
        .exclude_images(cli.no_images)
        .exclude_fonts(cli.no_fonts)
        .exclude_videos(cli.no_videos)
        .build();

    let document = inline_directory(&config)
        .with_context(|| format!("Failed to inline {}", cli.dir.display()))?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            document
                .write_to(BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!(
                "Wrote {} ({}) to {}",
                document.source_name(),
                document.encoding(),
                path.display()
            );
        }
        None => document
            .write_to(io::stdout().lock())
            .context("Failed to write to standard output")?,
    }
    Ok(())
}
