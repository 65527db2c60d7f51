// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dm_sys::{decode_versions, Custom, TableLayout, Target, TargetSpecHeader};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dm-encode")]
#[command(about = "Encode device-mapper table entries and decode target version lists")]
struct Args {
    /// Enable debug logging on stderr
    #[arg(long, short)]
    verbose: bool,

    /// TOML file overriding the record alignment
    #[arg(long)]
    layout: Option<PathBuf>,

    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Zero-filled range
    Zero {
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long)]
        length: u64,
    },
    /// Range where every I/O fails
    Error {
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long)]
        length: u64,
    },
    /// Range mapped onto another block device
    Linear {
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long)]
        length: u64,
        #[arg(long)]
        device: String,
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Any target type, with a raw parameter string
    Custom {
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long)]
        length: u64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        params: String,
    },
    /// Decode a captured DM_LIST_VERSIONS payload
    Versions { file: PathBuf },
}

#[derive(Debug, Serialize)]
struct RecordSummary {
    name: String,
    start: u64,
    length: u64,
    params: String,
    record_len: usize,
    padded_len: usize,
    hex: String,
}

#[derive(Debug, Serialize)]
struct VersionEntry {
    name: String,
    version: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let layout = match &args.layout {
        Some(path) => TableLayout::load(path)?,
        None => TableLayout::default(),
    };

    let target = match args.command {
        Command::Zero { start, length } => Target::zero(start, length),
        Command::Error { start, length } => Target::error(start, length),
        Command::Linear {
            start,
            length,
            device,
            offset,
        } => Target::linear(start, length, device, offset)?,
        Command::Custom {
            start,
            length,
            name,
            params,
        } => Target::new(start, length, Custom::new(name, params)?),
        Command::Versions { file } => return print_versions(&file, args.json),
    };

    let record = target.serialize();
    let params = &record[TargetSpecHeader::SIZE..record.len() - 1];
    let summary = RecordSummary {
        name: target.name().to_string(),
        start: target.start(),
        length: target.size(),
        params: String::from_utf8_lossy(params).into_owned(),
        record_len: record.len(),
        padded_len: layout.padded_len(record.len()),
        hex: to_hex(&record),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} start={} length={} params={:?}",
        summary.name, summary.start, summary.length, summary.params
    );
    println!(
        "record_len={} padded_len={} alignment={}",
        summary.record_len, summary.padded_len, layout.alignment()
    );
    println!();
    for (index, chunk) in record.chunks(16).enumerate() {
        println!("{:08x}  {}", index * 16, to_hex(chunk));
    }

    Ok(())
}

fn print_versions(file: &Path, json: bool) -> Result<()> {
    let payload = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let targets = decode_versions(&payload)?;

    if json {
        let entries: Vec<VersionEntry> = targets
            .iter()
            .map(|info| VersionEntry {
                name: info.name().to_string(),
                version: info.version(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("TARGET           VERSION");
    println!("-------------------------");
    for info in &targets {
        println!("{:<16} {}", info.name(), info.version());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
