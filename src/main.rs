use clap::{Parser, Subcommand};
use simple_folio::probe::ProbeEvent;
use simple_folio::{config, generate, output};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static generator for single-page project portfolios")]
#[command(long_about = "\
Static generator for single-page project portfolios

A JSON document describes who you are and what you built. Every image it
references is probed at build time; projects get a carousel of the images
that actually load, with a full-screen viewer and keyboard navigation.

Content structure:

  content/
  ├── config.json                  # Portfolio: name, bio, links, projects
  ├── config.toml                  # Build settings (optional)
  ├── images/                      # Referenced images (only loadable ones are copied)
  │   ├── avatar.jpg
  │   └── notes/
  │       ├── hero.png             # images.hero
  │       ├── demo.gif             # images.demo
  │       └── 1.png                # images.gallery[0]
  └── assets/                      # Copied verbatim to the output

Gallery order: hero, demo, then gallery entries. Missing or undecodable
images are skipped; a project with none left renders without a carousel.

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Only print failed probes
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe images and write the portfolio page
    Build,
    /// Probe images and report galleries without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            init_thread_pool(&cli.source)?;
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let (tx, printer) = spawn_printer(cli.quiet);
            let result = generate::build(&cli.source, &cli.output, Some(tx));
            join_printer(printer);
            let report = result?;
            output::print_build_report(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            init_thread_pool(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let (tx, printer) = spawn_printer(cli.quiet);
            let result = generate::check(&cli.source, Some(tx));
            join_printer(printer);
            output::print_build_report(&result?);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Print probe events from worker threads as they arrive.
fn spawn_printer(quiet: bool) -> (mpsc::Sender<ProbeEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            if quiet && !matches!(event, ProbeEvent::Failed { .. }) {
                continue;
            }
            println!("{}", output::format_probe_event(&event));
        }
    });
    (tx, printer)
}

fn join_printer(printer: JoinHandle<()>) {
    if printer.join().is_err() {
        eprintln!("probe output thread panicked");
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(source: &Path) -> Result<(), config::ConfigError> {
    let site_config = config::load_config(source)?;
    let threads = config::effective_threads(&site_config.processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
    Ok(())
}
