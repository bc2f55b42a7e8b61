//! Interactive REPL with a persistent history file.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;

use langlang::bytecode::Vm;

const HISTORY_FILE: &str = ".langlang_history";

pub struct Repl {
    vm: Vm,
    history: Vec<String>,
    history_file: PathBuf,
}

impl Repl {
    pub fn new() -> Self {
        let mut repl = Self {
            vm: Vm::new(),
            history: Vec::new(),
            history_file: Self::history_path(),
        };
        repl.load_history();
        repl
    }

    fn history_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(HISTORY_FILE)
        } else {
            PathBuf::from(HISTORY_FILE)
        }
    }

    fn load_history(&mut self) {
        if let Ok(content) = std::fs::read_to_string(&self.history_file) {
            for line in content.lines() {
                if !line.trim().is_empty() {
                    self.history.push(line.to_string());
                }
            }
        }
    }

    fn save_history(&self) {
        let content = self.history.join("\n");
        let _ = std::fs::write(&self.history_file, content);
    }

    pub fn run(&mut self) {
        println!("Langlang {} - REPL", env!("CARGO_PKG_VERSION"));
        println!("Type 'exit' or press Ctrl-D to quit.\n");

        let stdin = io::stdin();

        loop {
            print!("> ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => {
                    self.save_history();
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {
                    let line = line.trim_end();
                    if line.is_empty() {
                        continue;
                    }
                    if line == "exit" || line == "quit" {
                        self.save_history();
                        println!("Goodbye!");
                        break;
                    }

                    self.history.push(line.to_string());
                    self.execute(line);
                }
                Err(_) => {
                    self.save_history();
                    break;
                }
            }
        }
    }

    /// Each REPL entry is compiled as its own program; the VM instance is
    /// shared across entries and survives runtime faults.
    fn execute(&mut self, line: &str) {
        let mut source = line.to_string();
        source.push('\n');

        match langlang::compile(&source) {
            Ok(chunk) => {
                self.vm.run(&chunk);
            }
            Err(errors) => {
                for error in errors {
                    eprintln!("{}", error.to_string().red());
                }
            }
        }
    }
}
