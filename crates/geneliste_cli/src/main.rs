//! `geneliste` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto record store edits and tree rendering.
//! - Save (with backup) and rewrite the tree file after every mutating command.
//!
//! # Invariants
//! - Errors are reported on stderr with a non-zero exit code; nothing panics.

use clap::{Parser, Subcommand};
use geneliste_core::config::{default_js_export_path, default_tree_path, DEFAULT_DATA_PATH};
use geneliste_core::clock::{self, OffsetDateTime};
use geneliste_core::{
    core_version, default_log_level, init_logging, CsvRecordStore, GeneConfig, Record,
    RecordSource, TreeService,
};
use log::{error, info};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "geneliste", about = "Genealogy record editor and tree renderer")]
struct Cli {
    /// Path to the delimited data file.
    #[arg(long, env = "GENELISTE_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "GENELISTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files.
    #[arg(long, env = "GENELISTE_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the genealogy tree and write it to a text file.
    Tree {
        /// Output file (defaults to `Arbre.txt` next to the data file).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },
    /// List all records.
    List,
    /// Show one record.
    Show { id: String },
    /// Add a blank record with the next free id.
    Add,
    /// Set one field of a record.
    Set {
        id: String,
        field: String,
        value: String,
    },
    /// Delete a record.
    Delete { id: String },
    /// Renumber ids as 1..n in current order.
    Renumber,
    /// Export headers and rows as a JS snapshot for the web client.
    ExportJs {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &cli.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Command::Version = cli.command {
        println!("geneliste_core version={}", core_version());
        return Ok(());
    }

    let config = GeneConfig::default();
    let mut store = CsvRecordStore::open(&cli.data, config.columns.id.as_str())?;
    let now = clock::now();

    match cli.command {
        Command::Tree { out, stdout } => {
            let service = TreeService::new(&store, config);
            if stdout {
                print!("{}", service.render(now));
            } else {
                let target = out.unwrap_or_else(|| default_tree_path(&cli.data));
                service.write_tree(&target, now)?;
                println!("tree written to {}", target.display());
            }
        }
        Command::List => {
            println!("{}", store.headers().join(" | "));
            for record in store.records() {
                println!("{}", format_row(store.headers(), record));
            }
        }
        Command::Show { id } => {
            let record = store.get(&id)?;
            for header in store.headers() {
                println!("{header}: {}", record.get(header));
            }
        }
        Command::Add => {
            let id_key = store.id_key()?;
            let id = store.create()?.get(&id_key).to_string();
            save(&store, &config, &cli.data, now)?;
            println!("created record {id}");
        }
        Command::Set { id, field, value } => {
            store.update_field(&id, &field, &value)?;
            save(&store, &config, &cli.data, now)?;
            println!("updated {field} on record {id}");
        }
        Command::Delete { id } => {
            store.delete(&id)?;
            save(&store, &config, &cli.data, now)?;
            println!("deleted record {id}");
        }
        Command::Renumber => {
            let updated = store.renumber()?;
            save(&store, &config, &cli.data, now)?;
            println!("renumbered {updated} records");
        }
        Command::ExportJs { out } => {
            let target = out.unwrap_or_else(|| default_js_export_path(&cli.data));
            let rows = store.export_js(&target, now)?;
            println!("exported {rows} records to {}", target.display());
        }
        Command::Version => {}
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

fn save(
    store: &CsvRecordStore,
    config: &GeneConfig,
    data: &Path,
    now: OffsetDateTime,
) -> Result<(), Box<dyn Error>> {
    let tree_path = default_tree_path(data);
    let report = TreeService::new(store, config.clone()).save_and_render(&tree_path, now)?;
    if let Some(backup) = report.backup {
        println!("backup written to {}", backup.display());
    }
    println!("tree written to {}", tree_path.display());
    Ok(())
}

fn format_row(headers: &[String], record: &Record) -> String {
    headers
        .iter()
        .map(|header| record.get(header))
        .collect::<Vec<_>>()
        .join(" | ")
}
