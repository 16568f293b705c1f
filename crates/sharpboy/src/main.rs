use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sharpboy::AddressRange;
use sharpboy_gb::SessionConfig;

#[derive(Parser)]
#[command(version, about = "Run a Game Boy cartridge on the SharpBoy CPU core")]
struct Args {
    /// Path to ROM file
    rom: PathBuf,

    /// Trace every instruction and log serial register changes
    #[arg(long)]
    debug: bool,

    /// Stop after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print the disassembly of START:END (hex) and exit without running
    #[arg(long, value_name = "START:END")]
    disassemble: Option<AddressRange>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(range) = args.disassemble {
        let listing = sharpboy::disassemble(&args.rom, range)?;
        print!("{listing}");
        return Ok(());
    }

    let config = SessionConfig::builder()
        .cartridge(args.rom)
        .debug(args.debug)
        .max_steps(args.max_steps)
        .build();

    let (exit, serial) = sharpboy::run(config)?;
    if !serial.is_empty() {
        std::io::stdout().write_all(&serial)?;
        println!();
    }
    log::info!("exit: {exit}");

    Ok(())
}
