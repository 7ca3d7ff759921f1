use clap::{Parser, Subcommand};
use log::warn;
use sim6502::sim::{SNAPSHOT_FILE, Session, SimError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

//===========================================================================//

/// Exit code for a load or host I/O failure.
const EXIT_LOAD: u8 = 1;
/// Exit code for a runtime decode failure.
const EXIT_DECODE: u8 = 2;

//===========================================================================//

#[derive(Parser)]
#[clap(author, about, long_about = None, version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Loads a raw 6502 binary image and runs it until it halts.
    Run {
        /// The binary image file to load and run.
        binary: PathBuf,
        /// Microseconds to sleep after each retired instruction, to
        /// throttle emulated execution speed.
        #[clap(long)]
        pace_us: Option<u64>,
    },
}

//===========================================================================//

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run { binary, pace_us } => run_command(&binary, pace_us),
    }
}

fn run_command(binary: &Path, pace_us: Option<u64>) -> ExitCode {
    let image = match std::fs::read(binary) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("sim6502: error: {}: {}", binary.display(), err);
            return ExitCode::from(EXIT_LOAD);
        }
    };

    let mut session = Session::new();
    let result = session.load(&image).and_then(|()| {
        let mut pace = pace_us
            .map(|us| move || thread::sleep(Duration::from_micros(us)));
        let mut stdout = io::stdout().lock();
        session.run(
            pace.as_mut().map(|hook| hook as &mut dyn FnMut()),
            &mut stdout,
        )
    });

    // The snapshot is written whether or not the run succeeded; losing
    // the debug dump must not change the run's own exit status.
    if let Err(err) = session.write_snapshot(Path::new(SNAPSHOT_FILE)) {
        warn!("failed to write {SNAPSHOT_FILE}: {err}");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ SimError::Decode(_)) => {
            eprintln!("sim6502: error: {err}");
            ExitCode::from(EXIT_DECODE)
        }
        Err(err) => {
            eprintln!("sim6502: error: {err}");
            ExitCode::from(EXIT_LOAD)
        }
    }
}

//===========================================================================//
