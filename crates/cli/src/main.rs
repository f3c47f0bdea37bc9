//! CLI tool for converting PowerPoint (.pptx) files to Markdown.

use anyhow::{Context, Result};
use clap::Parser;
use slidemark_pptx::{convert, markdown_path, ConvertOptions, Presentation};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert PowerPoint decks to Markdown, exporting embedded images.
#[derive(Parser, Debug)]
#[command(name = "pptx2md")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Image directory name, relative to each input file (default: <name>_images)
    #[arg(short, long)]
    image_dir: Option<String>,

    /// Print Markdown to stdout instead of writing <name>.md
    #[arg(short, long)]
    print: bool,

    /// Print the parsed slides as JSON instead of converting
    #[arg(long, conflicts_with = "print")]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = ConvertOptions {
        image_dir: args.image_dir.clone(),
    };

    let mut succeeded = 0;
    let mut failed = 0;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        let outcome = if args.json {
            dump_json(input_path)
        } else {
            process_file(input_path, &args, &options)
        };

        match outcome {
            Ok(()) => succeeded += 1,
            Err(e) => {
                eprintln!("✗ {}: {:#}", display_name(input_path), e);
                failed += 1;
            }
        }
    }

    if args.input.len() > 1 || failed > 0 {
        print_summary(succeeded, failed);
    }

    Ok(())
}

/// Convert a single file and write (or print) its Markdown.
fn process_file(input_path: &Path, args: &Args, options: &ConvertOptions) -> Result<()> {
    log::debug!("Converting {} (image dir: {:?})", input_path.display(), options.image_dir);
    let result = convert(input_path, options)
        .with_context(|| format!("Failed to convert {}", input_path.display()))?;

    for failure in &result.failures {
        eprintln!("  ! {}", failure);
    }

    if args.print {
        print!("{}", result.markdown);
    } else {
        let output_path = markdown_path(input_path);
        write_output(&output_path, &result.markdown)?;
        eprintln!(
            "✓ {} → {}",
            display_name(input_path),
            display_name(&output_path)
        );
    }

    if let Some(dir) = &result.image_dir {
        eprintln!("  Images: {} ({} exported)", dir.display(), result.exported);
    }

    Ok(())
}

/// Print the parsed slides of a file as JSON.
fn dump_json(input_path: &Path) -> Result<()> {
    let pres = Presentation::open(input_path)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;
    let json = serde_json::to_string_pretty(pres.slides())?;
    println!("{}", json);
    Ok(())
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_summary(succeeded: usize, failed: usize) {
    if failed > 0 {
        eprintln!("\nDone: {} succeeded, {} failed", succeeded, failed);
    } else {
        eprintln!("\nDone: {} succeeded", succeeded);
    }
}
