mod args;
mod input;
mod logger;
mod output;

use args::Args;
use clap::Parser;
use colored::Colorize;
use log::{debug, info, warn};
use mp4_pssh::Pssh;
use std::{
    io::{IsTerminal, Write, stderr, stdout},
    process,
};

/// Decode every top level `pssh` box once, logging each one before folding it in.
fn scan(data: &[u8]) -> Pssh {
    let boxes = mp4_pssh::boxes(data).collect::<Vec<_>>();

    for box_ in &boxes {
        debug!(
            "{} pssh box v{} (flags {:#08x}, {} key ids, {} bytes data): {}",
            box_.system_id.kind(),
            box_.version,
            box_.flags,
            box_.key_ids.len(),
            box_.data_size(),
            box_.as_base64()
        );
    }

    boxes.into_iter().collect()
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let color_stdout = args.color_for(stdout().is_terminal());
    let color_stderr = args.color_for(stderr().is_terminal());

    // Styling is decided per stream by the writers themselves.
    colored::control::set_override(color_stdout || color_stderr);
    logger::init(args.log_level(), color_stderr)?;

    let data = input::read(&args.input)?;
    let mut pssh = scan(&data);

    if pssh.is_empty() {
        warn!("No PSSH boxes found in {} bytes of input.", data.len());
    } else {
        info!(
            "Found {} system id(s) and {} key id(s).",
            pssh.system_ids.len(),
            pssh.cenc_key_ids.len()
        );
    }

    if args.unique {
        pssh = output::unique(&pssh);
    }

    let mut stdout = stdout().lock();
    stdout.write_all(output::render(&pssh, args.format, args.uuid, color_stdout)?.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".bold().red(), e);
        process::exit(1);
    }
}
