use std::{path::PathBuf, process, thread};

use clap::Parser;
use log::{LevelFilter, debug};
use skimskript::{
    error::{Error, INTERPRETER_BUG_EXIT_CODE, SOURCE_FILE_EXIT_CODE},
    interpreter::{
        analyzer::analyze, evaluator::scope::INTERPRETER_STACK_SIZE, lexer::tokenize,
        parser::core::parse_program, terminal::StdTerminal,
    },
    run_program,
    util::source::load_lines,
};

/// skim runs SkimSkript programs: a readable scripting language whose
/// keywords may span several words.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source files to run, in order. Each must end in `.skim`.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Logs the tokens and the syntax tree of every file.
    #[arg(short, long)]
    debug: bool,

    /// Raises the log level; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Stops after checking the programs, without running them.
    #[arg(long)]
    check: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        if self.debug { level.max(LevelFilter::Debug) } else { level }
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new().filter_level(args.log_level())
                              .parse_default_env()
                              .init();

    // Deep recursion in a program needs more stack than the main thread has.
    let worker = thread::Builder::new().name("interpreter".to_string())
                                       .stack_size(INTERPRETER_STACK_SIZE)
                                       .spawn(move || run_files(&args));
    let code = match worker.map(thread::JoinHandle::join) {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => INTERPRETER_BUG_EXIT_CODE,
        Err(e) => {
            eprintln!("Failed to start the interpreter thread: {e}");
            INTERPRETER_BUG_EXIT_CODE
        },
    };
    process::exit(code);
}

/// Runs every file in order and stops at the first failure.
///
/// # Returns
/// The process exit code.
fn run_files(args: &Args) -> i32 {
    for path in &args.files {
        let lines = match load_lines(path) {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("{e}");
                return SOURCE_FILE_EXIT_CODE;
            },
        };

        match execute(&lines, args) {
            Ok(0) => {},
            Ok(code) => return code,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                debug!("{} stopped at line {}", path.display(), e.line());
                return e.exit_code();
            },
        }
    }
    0
}

/// Runs one file through every phase.
///
/// # Returns
/// The program's exit code, or `0` when only checking.
fn execute(lines: &[String], args: &Args) -> Result<i32, Error> {
    let stream = tokenize(lines)?;
    if args.debug {
        for token in stream.tokens() {
            debug!("line {:>4}  {:<16} {}",
                   stream.line(token),
                   format!("{:?}", token.kind),
                   stream.text(token));
        }
    }

    let program = parse_program(&stream)?;
    if args.debug {
        debug!("{program:#?}");
    }
    analyze(&program)?;

    if args.check {
        return Ok(0);
    }
    run_program(&program, &mut StdTerminal)
}
