//! Langlang CLI: execute files, evaluate one-liners, or run the REPL.

use std::env;
use std::fs;
use std::process;

use colored::Colorize;

use langlang::bytecode::{disassembler, InterpretResult, Vm};
use langlang::error::LanglangError;

mod repl;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// BSD sysexits conventions
const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_SOFTWARE: i32 = 70;
const EX_IOERR: i32 = 74;

/// CLI command to execute.
#[derive(Debug, PartialEq)]
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
    /// Start the REPL
    Repl,
    /// Print usage and exit successfully
    Help,
}

#[derive(Debug, PartialEq)]
struct Options {
    command: Command,
    disassemble: bool,
}

fn print_usage() {
    eprintln!("Langlang {VERSION}");
    eprintln!();
    eprintln!("Usage: langlang [options] [script.ll]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e <code>        Evaluate code directly");
    eprintln!("  --disassemble    Print the compiled bytecode before running it");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  langlang                 Start interactive REPL");
    eprintln!("  langlang script.ll       Run a script file");
    eprintln!("  langlang -e 'print 1+1'  Evaluate code directly");
}

/// Parse command-line arguments. At most one of a script path or `-e` may
/// be given; anything more is an invocation error.
fn parse_command(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        command: Command::Repl,
        disassemble: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Options {
                command: Command::Help,
                disassemble: options.disassemble,
            }),
            "--disassemble" => options.disassemble = true,
            "-e" => {
                if options.command != Command::Repl {
                    return Err("-e cannot be combined with another command".to_string());
                }
                i += 1;
                let Some(code) = args.get(i) else {
                    return Err("-e requires an argument".to_string());
                };
                options.command = Command::Eval { code: code.clone() };
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option '{arg}'"));
            }
            file => {
                if options.command != Command::Repl {
                    return Err(format!("unexpected argument '{file}'"));
                }
                options.command = Command::Run {
                    file: file.to_string(),
                };
            }
        }
        i += 1;
    }

    Ok(options)
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_command(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", format!("Error: {message}").red());
            print_usage();
            process::exit(EX_USAGE);
        }
    }
}

fn report_errors(errors: &[LanglangError]) {
    for error in errors {
        eprintln!("{}", error.to_string().red());
    }
}

/// Compile and run one source unit; returns the process exit code.
fn execute(source: &str, name: &str, disassemble: bool) -> i32 {
    let chunk = match langlang::compile(source) {
        Ok(chunk) => chunk,
        Err(errors) => {
            report_errors(&errors);
            return EX_DATAERR;
        }
    };

    if disassemble {
        print!("{}", disassembler::disassemble_chunk(&chunk, name));
    }

    let mut vm = Vm::new();
    match vm.run(&chunk) {
        InterpretResult::Ok => 0,
        InterpretResult::CompileError => EX_DATAERR,
        InterpretResult::RuntimeError => EX_SOFTWARE,
    }
}

fn main() {
    let options = parse_args();

    let code = match options.command {
        Command::Run { file } => match fs::read_to_string(&file) {
            Ok(source) => execute(&source, &file, options.disassemble),
            Err(err) => {
                eprintln!("{}", format!("Error reading '{file}': {err}").red());
                EX_IOERR
            }
        },
        Command::Eval { code } => execute(&code, "eval", options.disassemble),
        Command::Repl => {
            repl::Repl::new().run();
            0
        }
        Command::Help => {
            print_usage();
            0
        }
    };

    process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_command(&args)
    }

    #[test]
    fn test_no_args_starts_the_repl() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.command, Command::Repl);
        assert!(!options.disassemble);
    }

    #[test]
    fn test_single_file_and_eval() {
        assert_eq!(
            parse(&["script.ll"]).unwrap().command,
            Command::Run {
                file: "script.ll".to_string()
            }
        );
        assert_eq!(
            parse(&["-e", "print 1"]).unwrap().command,
            Command::Eval {
                code: "print 1".to_string()
            }
        );
    }

    #[test]
    fn test_disassemble_with_file() {
        let options = parse(&["--disassemble", "script.ll"]).unwrap();
        assert!(options.disassemble);
        assert_eq!(
            options.command,
            Command::Run {
                file: "script.ll".to_string()
            }
        );
    }

    #[test]
    fn test_extra_positional_argument_is_rejected() {
        assert!(parse(&["a.ll", "b.ll"]).is_err());
        assert!(parse(&["a.ll", "-e", "print 1"]).is_err());
        assert!(parse(&["-e", "print 1", "b.ll"]).is_err());
    }

    #[test]
    fn test_dash_e_without_code_is_rejected() {
        assert!(parse(&["-e"]).is_err());
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
