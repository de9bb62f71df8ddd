use clap::Parser;
use std::process::exit;

use rover::{Console, ConsoleTransport, ScriptTransport, SimButton, SimMotion, SimRange, Transport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command script to run instead of the interactive console
    #[arg(value_name = "SCRIPT")]
    script: Option<String>,

    /// Block at startup until the range sensor sees an object within CM
    #[arg(short, long, value_name = "CM")]
    gate: Option<u32>,

    /// Simulated motion pace in milliseconds per centimetre or degree
    #[arg(short, long, value_name = "MS", default_value_t = 20)]
    pace: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut transport: Box<dyn Transport> = match args.script.as_ref() {
        Some(path) => Box::new(ScriptTransport::from_file(path).unwrap_or_else(|err| {
            eprintln!("Failed to read {}: {}", path, err);
            exit(1);
        })),
        None => Box::new(ConsoleTransport::new().unwrap_or_else(|err| {
            eprintln!("Failed to initialise terminal: {}", err);
            exit(1);
        })),
    };

    let mut console = Console::new(SimMotion::new(args.pace), SimRange, SimButton);
    if let Some(threshold) = args.gate {
        console.gate(transport.as_mut(), threshold);
    }

    if let Err(err) = console.run(transport.as_mut()) {
        eprintln!("{}", err);
        exit(1);
    }
}
