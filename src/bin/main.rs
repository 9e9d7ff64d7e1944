use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use emulator::program::Chunk;
use emulator::vm::Vm;
use emulator::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Run an LS-8 program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Program file, one binary instruction byte per line
  program: PathBuf,
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(io::stderr)
    .init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let _ = e.print();
      // --help and --version are not failures
      return if e.use_stderr() {
        ExitCode::from(1)
      } else {
        ExitCode::SUCCESS
      };
    }
  };

  let chunk = match Chunk::from_path(&cli.program) {
    Ok(chunk) => chunk,
    Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
      eprintln!("file not found: {}", cli.program.display());
      error!("file not found: {}", cli.program.display());
      return ExitCode::from(2);
    }
    Err(e) => {
      eprintln!("{}: {e}", cli.program.display());
      error!("{}: {e}", cli.program.display());
      return ExitCode::from(3);
    }
  };

  let mut vm = Vm::new();
  if let Err(e) = vm.load(&chunk) {
    eprintln!("{}: {e}", cli.program.display());
    error!("{}: {e}", cli.program.display());
    return ExitCode::from(3);
  }

  let mut stdout = io::stdout().lock();
  if let Err(e) = vm.run(&mut stdout) {
    eprintln!("{e}");
    eprintln!("{}", vm.trace_line());
    error!("{e}");
    return ExitCode::from(4);
  }

  ExitCode::SUCCESS
}
