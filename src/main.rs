// mixtape - pick an order for the tracks in a folder, then weld them into one file
// All the interesting machinery is in the library; this wires it together

mod audio;
mod config;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use audio::{Combiner, TrackScanner};
use config::Config;
use ui::{run_editor, ScreenContext, SessionOutcome};

#[derive(Parser)]
#[command(name = "mixtape")]
#[command(about = "Combine the audio files in a folder into a single track, in an order you choose")]
struct Args {
    /// Folder containing the audio files to combine
    input_folder: PathBuf,
    /// Path where the combined file will be written
    output_file: PathBuf,
}

fn init_logging() -> Result<()> {
    // Log to a file, never the screen - the interactive loop owns the terminal
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "mixtape.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mixtape=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(base_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Keep the appender guard alive for the life of the process
    std::mem::forget(guard);

    Ok(())
}

fn clear_screen() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0));
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging()?;
    info!("mixtape starting up");

    let config = Config::load()?;

    // Validate the input folder and gather the track list before touching
    // the terminal mode at all
    let scanner = TrackScanner::new(&config.extensions);
    let files = scanner.list(&args.input_folder)?;
    if files.is_empty() {
        bail!(
            "no matching audio files found in '{}'",
            args.input_folder.display()
        );
    }

    let context = ScreenContext {
        input_folder: args.input_folder.display().to_string(),
        output_file: args.output_file.display().to_string(),
    };

    // Raw mode is held inside run_editor and released before it returns
    match run_editor(files, &context)? {
        SessionOutcome::Quit => {
            clear_screen();
            println!("Exiting mixtape.");
        }
        SessionOutcome::Combine(order) => {
            clear_screen();
            println!("Combining files...\n");
            println!("Files will be combined in this order:");
            for (idx, name) in order.iter().enumerate() {
                println!("{}. {}", idx + 1, name);
            }
            println!("\nOutput will be saved to: {}", args.output_file.display());

            let combiner = Combiner::new(Duration::from_millis(config.silence_ms), &config.output);
            let summary = combiner.combine(&order, &args.input_folder, &args.output_file)?;

            println!(
                "Successfully saved combined audio to {}",
                args.output_file.display()
            );
            println!(
                "Total duration: {:.2} seconds ({} track(s), {} skipped)",
                summary.duration.as_secs_f64(),
                summary.files_combined,
                summary.files_skipped
            );
        }
    }

    Ok(())
}
