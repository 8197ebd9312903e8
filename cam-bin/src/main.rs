use std::process::ExitCode;

use clap::Parser;

use cam_core::execute;
use cam_core::vm::{History, Silent};

/// Runs a program on the categorical abstract machine.
#[derive(Parser, Debug)]
#[command(name = "cam", version)]
struct Args {
    /// Print every machine state as a table, and the final term
    #[arg(short, long)]
    verbose: bool,

    /// Print the final term
    #[arg(short = 'r', long = "result")]
    print_result: bool,

    /// Exit with a non-zero status if the program aborts
    #[arg(long)]
    strict: bool,

    /// The instruction string, e.g. "'(2)<'(3)>+"
    #[arg(allow_hyphen_values = true)]
    code: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    ).init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let mut history = History::new();
    let run = if args.verbose {
        execute(&args.code, &mut history)
    } else {
        execute(&args.code, Silent)
    };

    if let Some(e) = &run.error {
        eprintln!("{}", e);
    }
    if args.verbose {
        print!("{}", history);
    }
    println!("time: {:.6}", run.elapsed.as_secs_f64());
    if args.verbose || args.print_result {
        println!("term: {}", run.result);
    }

    if args.strict && !run.is_ok() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
