// glispy REPL and script runner

use clap::Parser;
use glispy::input_handling::{read_input_content, InputConfig, InputSource};
use glispy::{GlispyError, Interpreter, InterpreterConfig};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glispy-repl")]
#[command(about = "Interactive glispy REPL with multi-source input support")]
struct Args {
    /// Input source type
    #[arg(short, long, value_enum, default_value_t = InputSource::Interactive)]
    input: InputSource,

    /// Program text (when using --input string)
    #[arg(short, long)]
    string: Option<String>,

    /// Program file (when using --input file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => InterpreterConfig::load(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        }),
        None => InterpreterConfig::default(),
    };

    init_tracing(&config, args.verbose);

    let interpreter = match Interpreter::from_config(&config) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    info!(prelude = config.prelude.len(), "interpreter ready");

    match args.input {
        InputSource::Interactive => run_interactive_repl(&interpreter, &config.prompt),
        source => {
            let input_config = InputConfig::from_args(source, args.file, args.string, args.verbose)
                .unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            let input = read_input_content(&input_config).unwrap_or_else(|e| {
                eprintln!("{}", e);
                process::exit(1);
            });

            match interpreter.eval_str(&input.content) {
                Ok(result) => println!("{}", result),
                Err(e) => {
                    eprintln!("{}: {}", input.source_name, e);
                    process::exit(1);
                }
            }
        }
    }
}

fn init_tracing(config: &InterpreterConfig, verbose: bool) {
    let default_directive = if verbose {
        "glispy=debug"
    } else {
        config.log_filter.as_str()
    };
    let mut filter = EnvFilter::from_default_env();
    match default_directive.parse::<Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring log filter '{}': {}", default_directive, e),
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run_interactive_repl(interpreter: &Interpreter, prompt: &str) {
    println!("glispy {} (type :help for commands)", env!("CARGO_PKG_VERSION"));

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create line editor: {}", e);
            process::exit(1);
        }
    };

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line.starts_with(':') {
                    if !handle_repl_command(line, interpreter) {
                        break;
                    }
                    continue;
                }

                match interpreter.eval_str(line) {
                    Ok(result) => println!("{}", result),
                    Err(e) => report_error(&e),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }
}

/// Returns `false` when the session should end.
fn handle_repl_command(command: &str, interpreter: &Interpreter) -> bool {
    match command {
        ":quit" | ":q" => return false,
        ":help" => show_help(),
        ":env" => {
            let names = interpreter.scope().local_names();
            if names.is_empty() {
                println!("(no user definitions)");
            }
            for name in names {
                if let Some(value) = interpreter.get(&name) {
                    println!("{} = {}", name, value);
                }
            }
        }
        other => println!("Unknown command {} (type :help)", other),
    }
    true
}

fn report_error(error: &GlispyError) {
    warn!(%error, "evaluation failed");
    eprintln!("{}", error);
}

fn show_help() {
    println!(":help   show this message");
    println!(":env    list user definitions");
    println!(":quit   leave the REPL");
    println!();
    println!("Builtins: + - * / sqrt pi > < >= <= = begin println");
    println!("          define defun make-hash-map set-value get-value if");
}
