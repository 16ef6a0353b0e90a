// SPDX-License-Identifier: MIT

mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use gptio::prelude::*;
use gptpart::prelude::*;

use crate::utils::{LogLevel, init_logger, pretty_bytes};

#[derive(Parser, Debug)]
#[command(name = "lsgpt", version, about = "List the GUID Partition Table of a disk or image", long_about = None)]
struct Cli {
    /// Block device or disk image (e.g., /dev/sda, disk.img)
    device: PathBuf,

    /// Verify the header and partition entry array CRC32
    #[arg(long)]
    check_crc: bool,

    /// Only read and print the GPT header
    #[arg(long)]
    header_only: bool,

    /// Also classify the MBR at LBA 0
    #[arg(long)]
    mbr: bool,

    /// Logical sector size in bytes
    #[arg(long, default_value_t = gptpart::DEFAULT_SECTOR_SIZE)]
    sector_size: u64,

    /// Show library diagnostics
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print the report and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(LogLevel::from_flags(cli.verbose, cli.quiet));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[lsgpt] {} {:#}", "error:".red().bold(), e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let opts = ReadOptions::new().with_sector_size(cli.sector_size);

    let mut io = FileReader::open(&cli.device)
        .map_err(GptError::from)
        .with_context(|| format!("cannot open {}", cli.device.display()))?;
    log_verbose!("Reading {} ({} bytes per sector)", cli.device.display(), opts.sector_size);

    if cli.mbr {
        let kind = probe_mbr(&mut io).context("reading MBR")?;
        log_info!("MBR: {}", mbr_label(kind));
    }

    if cli.header_only {
        let header = read_header(&mut io, &opts)
            .with_context(|| format!("reading GPT header of {}", cli.device.display()))?;
        print!("{header}");
        if cli.check_crc {
            report_crc("Header", header.header_crc32, header.calculate_crc32(), cli.quiet);
            header.verify_crc32()?;
        }
        return Ok(());
    }

    let table = read_gpt(&mut io, &opts)
        .with_context(|| format!("reading GPT of {}", cli.device.display()))?;
    print!("{table}");

    let allocated = allocated_sectors(&table);
    log_info!(
        "{} partition(s), {} allocated",
        table.used_count(),
        pretty_bytes(allocated.saturating_mul(opts.sector_size))
    );

    if cli.check_crc {
        report_crc("Header", table.header_crc32(), table.calculate_crc32(), cli.quiet);
        report_crc(
            "Partition array",
            table.header().array_crc32,
            table.calculate_entries_crc32(),
            cli.quiet,
        );
        table.verify_crc32()?;
    }

    Ok(())
}

/// Sectors covered by used partitions, saturating on crafted ranges.
fn allocated_sectors(table: &GuidPartitionTable) -> u64 {
    table
        .partitions()
        .fold(0u64, |acc, p| acc.saturating_add(p.entry.size_sectors()))
}

fn report_crc(what: &str, stored: u32, computed: u32, quiet: bool) {
    if stored == computed {
        if !quiet {
            log_normal!("{} CRC32 {} ({:#010x})", what, "OK".green().bold(), stored);
        }
    } else {
        log_normal!(
            "{} CRC32 {} (stored {:#010x}, computed {:#010x})",
            what,
            "MISMATCH".red().bold(),
            stored,
            computed
        );
    }
}

fn mbr_label(kind: MbrKind) -> &'static str {
    match kind {
        MbrKind::Protective => "protective (0xEE)",
        MbrKind::Legacy => "legacy partitions, not protective",
        MbrKind::Empty => "empty",
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GptError>() {
        Some(GptError::SourceUnavailable(_)) => 2,
        Some(GptError::NoGptFound) => 3,
        Some(GptError::TruncatedInput { .. }) => 4,
        Some(GptError::ChecksumMismatch { .. }) => 5,
        _ => 1,
    }
}
