//! Intcode CLI: run programs and amplifier circuits.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage/read/parse error
//! - 2: Program stalled waiting for input
//! - 3: Runtime error

mod commands;
mod logger;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "amplify" => commands::amplify(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: intcode <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog> [--input a,b,..] [--poke A=V].. [--peek A].. [--interactive]");
    eprintln!("                                       Run a program, printing each output");
    eprintln!("  amplify <prog> --phases p,.. [--input N] [--feedback]");
    eprintln!("                                       Run one machine per phase as a circuit");
    eprintln!("  amplify <prog> --search p,.. [--input N] [--feedback]");
    eprintln!("                                       Find the phase order with the best signal");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v                                   Log suspensions and halts to stderr");
    eprintln!("  --trace                              Log every executed instruction");
}
