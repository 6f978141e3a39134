//! CLI command implementations.

use crate::logger;
use intcode_common::{Program, Word};
use intcode_vm::{Circuit, CircuitError, Machine, Signal, Topology};
use std::fs;
use std::io::{self, BufRead, Write};

/// Flags accepted by `run`.
#[derive(Debug, Default, PartialEq)]
struct RunOptions {
    inputs: Vec<Word>,
    pokes: Vec<(Word, Word)>,
    peeks: Vec<Word>,
    interactive: bool,
}

/// Flags accepted by `amplify`.
#[derive(Debug, Default, PartialEq)]
struct AmplifyOptions {
    phases: Vec<Word>,
    input: Word,
    feedback: bool,
    /// Try every ordering of `phases` instead of running the given one.
    search: bool,
}

/// Run a program, printing each output value on its own line.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: intcode run <prog> [--input a,b,..] [--poke A=V] [--peek A] [--interactive]");
        return Err(1);
    }

    let input = &args[0];
    let options = parse_run_options(&args[1..])?;
    logger::init(logger::level_from_args(args));

    let program = read_program(input)?;
    let mut machine = Machine::new(&program);
    for &(address, value) in &options.pokes {
        machine.poke_memory(address, value).map_err(|e| {
            eprintln!("error: cannot patch memory: {e}");
            1
        })?;
    }
    machine.provide_inputs(options.inputs.iter().copied());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    loop {
        let signal = machine.resume().map_err(|e| {
            eprintln!("runtime error: {e}");
            3
        })?;
        match signal {
            Signal::Output(value) => {
                machine.take_output();
                write_line(&mut out, &value.to_string())?;
            }
            Signal::NeedsInput if options.interactive => {
                out.flush().map_err(write_failed)?;
                let value = prompt(&mut stdin.lock())?;
                machine.provide_input(value);
            }
            Signal::NeedsInput => {
                eprintln!(
                    "error: program is waiting for input at instruction {}",
                    machine.ip()
                );
                return Err(2);
            }
            Signal::Halted => break,
        }
    }

    for &address in &options.peeks {
        let value = machine.peek_memory(address).map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;
        write_line(&mut out, &format!("[{address}] = {value}"))?;
    }
    Ok(())
}

/// Run one machine per phase setting, wired output-to-input.
///
/// With `--search`, every ordering of the phase set is tried and the best
/// signal is printed followed by the ordering that produced it.
pub fn amplify(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: amplify requires an input file and --phases or --search");
        eprintln!("{AMPLIFY_USAGE}");
        return Err(1);
    }

    let input = &args[0];
    let options = parse_amplify_options(&args[1..])?;
    logger::init(logger::level_from_args(args));

    let program = read_program(input)?;
    let topology = if options.feedback {
        Topology::Feedback
    } else {
        Topology::Chain
    };

    let result = if options.search {
        Circuit::max_signal(&program, &options.phases, options.input, topology)
    } else {
        Circuit::new(&program, &options.phases)
            .and_then(|mut circuit| circuit.run(topology, options.input))
            .map(|signal| (options.phases.clone(), signal))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match result {
        Ok((phases, signal)) => {
            write_line(&mut out, &signal.to_string())?;
            if options.search {
                let order: Vec<String> = phases.iter().map(Word::to_string).collect();
                write_line(&mut out, &format!("phases {}", order.join(",")))?;
            }
            Ok(())
        }
        Err(e @ CircuitError::Runtime { .. }) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err(2)
        }
    }
}

// --- Helpers ---

const AMPLIFY_USAGE: &str =
    "Usage: intcode amplify <prog> (--phases p,.. | --search p,..) [--input N] [--feedback]";

/// Write one line of program output.
fn write_line(out: &mut impl Write, line: &str) -> Result<(), i32> {
    writeln!(out, "{line}").map_err(write_failed)
}

fn write_failed(e: io::Error) -> i32 {
    eprintln!("error: cannot write output: {e}");
    1
}

/// Read and parse a program text file.
fn read_program(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    Program::parse(&text).map_err(|e| {
        eprintln!("error: invalid program: {e}");
        1
    })
}

/// Ask for one integer on stderr and read it from `reader`.
fn prompt(reader: &mut impl BufRead) -> Result<Word, i32> {
    eprint!("input> ");
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| {
        eprintln!("error: cannot read input: {e}");
        1
    })?;
    if read == 0 {
        eprintln!("error: input closed while program is waiting for input");
        return Err(2);
    }
    parse_word(line.trim())
}

fn parse_run_options(args: &[String]) -> Result<RunOptions, i32> {
    let mut options = RunOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => options.inputs.extend(parse_list(flag_value(args, i)?)?),
            "--poke" => {
                options.pokes.push(parse_poke(flag_value(args, i)?)?);
            }
            "--peek" => options.peeks.push(parse_word(flag_value(args, i)?)?),
            "--interactive" => {
                options.interactive = true;
                i += 1;
                continue;
            }
            "-v" | "--trace" => {
                i += 1;
                continue;
            }
            other => {
                eprintln!("error: unknown option '{other}'");
                return Err(1);
            }
        }
        i += 2;
    }
    Ok(options)
}

fn parse_amplify_options(args: &[String]) -> Result<AmplifyOptions, i32> {
    let mut options = AmplifyOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--phases" | "--search" => {
                if !options.phases.is_empty() {
                    eprintln!("error: give either --phases or --search, once");
                    return Err(1);
                }
                options.phases = parse_list(flag_value(args, i)?)?;
                options.search = args[i] == "--search";
            }
            "--input" => options.input = parse_word(flag_value(args, i)?)?,
            "--feedback" => {
                options.feedback = true;
                i += 1;
                continue;
            }
            "-v" | "--trace" => {
                i += 1;
                continue;
            }
            other => {
                eprintln!("error: unknown option '{other}'");
                return Err(1);
            }
        }
        i += 2;
    }
    if options.phases.is_empty() {
        eprintln!("error: --phases or --search is required");
        eprintln!("{AMPLIFY_USAGE}");
        return Err(1);
    }
    Ok(options)
}

/// The value following the flag at `args[i]`.
fn flag_value(args: &[String], i: usize) -> Result<&str, i32> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => {
            eprintln!("error: {} requires a value", args[i]);
            Err(1)
        }
    }
}

fn parse_word(s: &str) -> Result<Word, i32> {
    s.trim().parse::<Word>().map_err(|_| {
        eprintln!("error: '{s}' is not an integer");
        1
    })
}

/// Parse a comma-separated list of integers.
fn parse_list(s: &str) -> Result<Vec<Word>, i32> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_word)
        .collect()
}

/// Parse `ADDR=VALUE`.
fn parse_poke(s: &str) -> Result<(Word, Word), i32> {
    match s.split_once('=') {
        Some((address, value)) => Ok((parse_word(address)?, parse_word(value)?)),
        None => {
            eprintln!("error: --poke expects ADDR=VALUE, got '{s}'");
            Err(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_list_values() {
        assert_eq!(parse_list("1,-2, 3"), Ok(vec![1, -2, 3]));
        assert_eq!(parse_list(""), Ok(vec![]));
        assert_eq!(parse_list("1,x"), Err(1));
    }

    #[test]
    fn parse_poke_pairs() {
        assert_eq!(parse_poke("0=2"), Ok((0, 2)));
        assert_eq!(parse_poke("12=-1"), Ok((12, -1)));
        assert_eq!(parse_poke("12"), Err(1));
    }

    #[test]
    fn run_options_collect_repeated_flags() {
        let options = parse_run_options(&args(&[
            "--input", "1,2", "--poke", "1=12", "--poke", "2=2", "--peek", "0", "--input", "3",
            "-v",
        ]))
        .unwrap();
        assert_eq!(
            options,
            RunOptions {
                inputs: vec![1, 2, 3],
                pokes: vec![(1, 12), (2, 2)],
                peeks: vec![0],
                interactive: false,
            }
        );
    }

    #[test]
    fn run_options_reject_unknown_and_dangling() {
        assert_eq!(parse_run_options(&args(&["--frob"])), Err(1));
        assert_eq!(parse_run_options(&args(&["--input"])), Err(1));
    }

    #[test]
    fn amplify_options_require_phases() {
        assert_eq!(parse_amplify_options(&args(&["--feedback"])), Err(1));
        let options =
            parse_amplify_options(&args(&["--phases", "9,8", "--feedback", "--input", "4"]))
                .unwrap();
        assert_eq!(
            options,
            AmplifyOptions {
                phases: vec![9, 8],
                input: 4,
                feedback: true,
                search: false,
            }
        );
    }

    #[test]
    fn amplify_options_search() {
        let options = parse_amplify_options(&args(&["--search", "5,6,7"])).unwrap();
        assert_eq!(options.phases, vec![5, 6, 7]);
        assert!(options.search);
        assert_eq!(
            parse_amplify_options(&args(&["--search", "1,2", "--phases", "2,1"])),
            Err(1)
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_line_reports_failed_writes() {
        let mut buf = Vec::new();
        assert_eq!(write_line(&mut buf, "42"), Ok(()));
        assert_eq!(buf, b"42\n");
        assert_eq!(write_line(&mut ClosedPipe, "42"), Err(1));
    }

    #[test]
    fn prompt_reads_one_value() {
        let mut reader = io::Cursor::new("17\n-3\n");
        assert_eq!(prompt(&mut reader), Ok(17));
        assert_eq!(prompt(&mut reader), Ok(-3));
        assert_eq!(prompt(&mut reader), Err(2));
    }
}
