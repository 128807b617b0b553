//! Plotstore - inspect containers of stored plot elements.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plotstore::data::DataReader;
use plotstore::store::{Container, MemoryStore, Store};
use plotstore::util;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "plotstore")]
#[command(about = "Inspect containers of stored plot elements", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print library version strings
    Info,
    /// Print the group/record tree of a container
    Ls {
        /// Path to the container (.nc, .h5 or .json)
        file: PathBuf,
    },
    /// Print one record with its attributes
    Show {
        /// Path to the container
        file: PathBuf,
        /// Key of the record, e.g. fig/curve
        key: String,
    },
    /// Copy every record into a JSON mapping
    Export {
        /// Path to the source container
        file: PathBuf,
        /// Output JSON file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    match args.command {
        Command::Info => {
            for line in plotstore::info() {
                println!("{}", line);
            }
        }
        Command::Ls { file } => {
            check_exists(&file)?;
            let dataset = DataReader::read_file(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string());
            print!("{}", util::format_tree(&dataset.root_node, file_name.as_deref()));
        }
        Command::Show { file, key } => {
            check_exists(&file)?;
            let container = Container::open_read(&file)?;
            let record = container.read_record(&key)?;
            print!("{}", util::format_record(&key, &record));
        }
        Command::Export { file, output } => {
            check_exists(&file)?;
            let count = export(&file, &output)?;
            println!("Exported {} records to {}", count, output.display());
        }
    }

    tracing::info!("plotstore exited");
    Ok(())
}

fn init_logging(log_path: Option<&Path>) -> Result<()> {
    match log_path {
        Some(log_path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(log_path)
                .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(Level::DEBUG)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            tracing::info!("Starting plotstore");
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn check_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path not found: {}", path.display());
    }
    Ok(())
}

fn export(source: &Path, output: &Path) -> Result<usize> {
    let container = Container::open_read(source)?;
    let mut mapping = MemoryStore::new();
    let keys = container.keys()?;

    for key in &keys {
        let record = container.read_record(key)?;
        mapping.write_record(key, &record)?;
    }

    mapping.save(output)?;
    tracing::debug!("Exported {} records from {}", keys.len(), source.display());
    Ok(keys.len())
}
