//! RV64IM pipeline simulator CLI.
//!
//! This binary is the command-line front end to the simulator library. It performs:
//! 1. **Run:** Loads a flat binary or ELF image, clocks the pipeline until an environment
//!    call retires or the cycle budget runs out, then prints statistics.
//! 2. **Disassemble:** Lists the instruction words of an image with their mnemonics.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rvpipe_core::config::Config;
use rvpipe_core::isa::disasm::disassemble;
use rvpipe_core::sim::{StopReason, loader};
use rvpipe_core::{Simulator, System};

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "Cycle-level RV64IM five-stage pipeline simulator",
    long_about = "Run a bare-metal RV64IM program on a five-stage pipelined core with caches \
                  and a BTB, or disassemble an image.\n\nExamples:\n  \
                  rvpipe run -f prog.bin\n  \
                  rvpipe run -f prog.elf --config sim.json --json\n  \
                  rvpipe disasm -f prog.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts or the cycle budget is spent.
    Run {
        /// Program image (ELF, or a flat binary loaded at the RAM base).
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file; defaults are used for missing fields.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overrides `general.max_cycles`.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Per-stage trace logging (`RUST_LOG` takes precedence).
        #[arg(long)]
        trace: bool,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Dump the register file after the run.
        #[arg(long)]
        regs: bool,

        /// Statistics sections to print (summary, core, instruction_mix, branch, memory).
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Disassemble the code of an image.
    Disasm {
        /// Program image (ELF `.text`, or a whole flat binary).
        #[arg(short, long)]
        file: PathBuf,

        /// Address of the first word of a flat binary.
        #[arg(long, value_parser = parse_addr)]
        base: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            trace,
            json,
            regs,
            stats,
        } => {
            let config = load_config(config.as_deref());
            init_tracing(trace || config.general.trace);
            cmd_run(&file, &config, max_cycles, json, regs, &stats);
        }
        Commands::Disasm { file, base } => {
            init_tracing(false);
            cmd_disasm(&file, base.unwrap_or(Config::default().memory.base));
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the `--trace` default.
fn init_tracing(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads and validates a configuration file, or returns the defaults.
///
/// Exits the process with code 1 when the file cannot be read or is invalid.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Invalid config {}: {e}", path.display());
        process::exit(1);
    })
}

/// Runs one program to completion and reports on it.
///
/// # Arguments
///
/// * `file`       - Program image path.
/// * `config`     - Validated configuration.
/// * `max_cycles` - Optional override of the configured cycle budget.
/// * `json`       - Print statistics as JSON.
/// * `regs`       - Dump the register file after the run.
/// * `sections`   - Statistics sections to print; empty prints all.
///
/// Exits with code 1 on a load failure or a halting decode fault, 2 when the
/// cycle budget runs out before the program halts.
fn cmd_run(
    file: &Path,
    config: &Config,
    max_cycles: Option<u64>,
    json: bool,
    regs: bool,
    sections: &[String],
) {
    let mut system = System::new(config);
    let entry = loader::load_program(&mut system, file, config.memory.base).unwrap_or_else(|e| {
        eprintln!("[!] Load failed: {e}");
        process::exit(1);
    });

    if !json {
        println!("[*] Running {} from {entry:#x}", file.display());
        println!(
            "    predictor: {:?}  icache: {}x{}B  dcache: {}x{}B  memory: {:?}",
            config.pipeline.branch_predictor,
            config.cache.icache.lines,
            config.cache.icache.line_bytes,
            config.cache.dcache.lines,
            config.cache.dcache.line_bytes,
            config.memory.timing,
        );
    }

    let budget = max_cycles.unwrap_or(config.general.max_cycles);
    let mut sim = Simulator::new(system, config).unwrap_or_else(|e| {
        eprintln!("[!] Invalid configuration: {e}");
        process::exit(1);
    });
    let outcome = sim.run(budget);

    let code = match outcome {
        Ok(StopReason::Halted { pc }) => {
            if !json {
                println!("\n[*] Halted at {pc:#x} after {} cycles", sim.stats.cycles);
            }
            0
        }
        Ok(StopReason::CycleLimit | StopReason::Retired) => {
            eprintln!("\n[!] Cycle limit of {budget} reached");
            2
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            1
        }
    };

    if json {
        match serde_json::to_string_pretty(&sim.stats) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("[!] Could not serialize statistics: {e}"),
        }
    } else {
        sim.stats.print_sections(sections);
    }
    if regs || code == 1 {
        println!("{}", sim.system.regs.dump());
    }
    process::exit(code);
}

/// Prints `address: word  mnemonic` for each 32-bit word of the image's code.
fn cmd_disasm(file: &Path, base: u64) {
    let image = loader::read_binary(file).and_then(|data| loader::code_image(&data, base));
    let (addr, bytes) = image.unwrap_or_else(|e| {
        eprintln!("[!] {e}");
        process::exit(1);
    });

    for (i, chunk) in bytes.chunks_exact(4).enumerate() {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let pc = addr + (i as u64) * 4;
        println!("{pc:>10x}:  {word:08x}  {}", disassemble(word));
    }
}

/// Accepts decimal or `0x`-prefixed hexadecimal addresses.
fn parse_addr(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}
