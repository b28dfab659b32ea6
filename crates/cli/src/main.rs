//! Command-line runner for the segmented-memory virtual machine.
//!
//! This binary loads one program image and runs it to completion. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then flag overrides.
//! 2. **Logging:** A stderr `tracing` subscriber whose level follows `RUST_LOG`, the
//!    instruction-trace setting, or the verbosity flags.
//! 3. **Execution:** Loads the image as segment 0 and runs until halt (exit 0) or fault (exit 1).

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use umvm_core::common::constants::DEFAULT_PROGRAM;
use umvm_core::io::{self, StdConsole};
use umvm_core::sim::loader;
use umvm_core::{Config, Machine, Simulator, VmError};

#[derive(Parser, Debug)]
#[command(
    name = "um",
    author,
    version,
    about = "Segmented-memory virtual machine",
    long_about = "Load a big-endian program image into segment 0 and run it until it halts.\n\nstdin feeds the input operation; stdout receives the output operation.\n\nExamples:\n  um sandmark.umz\n  um -v --stats codex.umz\n  um -e adventure.umz < moves.txt"
)]
struct Cli {
    /// Program image to run.
    #[arg(default_value = DEFAULT_PROGRAM)]
    file: PathBuf,

    /// Debug logging (segment allocation, program loads); implies --verbose.
    #[arg(short, long)]
    debug: bool,

    /// Informational logging (load, start, halt).
    #[arg(short, long)]
    verbose: bool,

    /// Trace every executed instruction to stderr.
    #[arg(short = 'o', long = "trace")]
    trace: bool,

    /// Copy every consumed input byte to the output.
    #[arg(short, long)]
    echo: bool,

    /// JSON configuration file; flags are applied on top.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop with a fault after this many instructions.
    #[arg(long)]
    max_instructions: Option<u64>,

    /// Print run statistics to stderr on exit.
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = build_config(&cli).unwrap_or_else(|e| fatal(&e));
    init_logging(&cli, &config);
    debug!(?config, "resolved configuration");

    let code = run(&cli, &config);
    process::exit(code);
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the flags and config.
fn init_logging(cli: &Cli, config: &Config) {
    let level = if config.general.trace_instructions {
        "trace"
    } else if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Resolves the configuration: file (or defaults), then flag overrides.
fn build_config(cli: &Cli) -> Result<Config, VmError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.general.trace_instructions |= cli.trace;
    config.general.echo_input |= cli.echo;
    if cli.max_instructions.is_some() {
        config.limits.max_instructions = cli.max_instructions;
    }
    Ok(config)
}

/// Loads and runs the program, returning the process exit status.
fn run(cli: &Cli, config: &Config) -> i32 {
    let mut machine = Machine::new(&config.memory);
    if let Err(e) = loader::load_file(&mut machine, &cli.file) {
        eprintln!("[!] FATAL: could not load '{}': {}", cli.file.display(), e);
        return 1;
    }

    let console = io::configured(StdConsole::new(), config.general.echo_input);
    let mut sim = Simulator::new(machine, console, config);

    let result = sim.run();
    if let Err(e) = &result {
        error!(category = e.category(), pc = sim.machine.pc, "run aborted");
        eprintln!("\n[!] FATAL ({} fault): {}", e.category(), e);
        eprint!("{}", sim.machine.dump_state());
    }
    if cli.stats {
        sim.stats.print();
    }
    drop(sim);
    let _ = std::io::stdout().flush();

    i32::from(result.is_err())
}

fn fatal(e: &VmError) -> ! {
    eprintln!("[!] FATAL: {e}");
    process::exit(1);
}
