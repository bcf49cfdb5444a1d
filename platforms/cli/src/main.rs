use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use tmsim::{
    normalize_input, render_tape, Halt, ProgramLoader, ProgramManager, Step, TuringMachine,
    TuringMachineError,
};

/// Run a Turing machine transition table against an input string.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The transition table file to execute
    #[clap(
        short,
        long,
        conflicts_with = "builtin",
        required_unless_present_any = ["builtin", "list"]
    )]
    program: Option<String>,

    /// Run a bundled demo program by name instead of a file
    #[clap(short, long)]
    builtin: Option<String>,

    /// List the bundled demo programs and exit
    #[clap(long)]
    list: bool,

    /// The input file; piped stdin is read when this is omitted
    #[clap(short, long)]
    input: Option<String>,

    /// Check the input against the table alphabet before running
    #[clap(long)]
    validate: bool,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        for name in ProgramManager::names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TuringMachineError> {
    let program = match (&cli.program, &cli.builtin) {
        (Some(path), _) => ProgramLoader::load_program(Path::new(path))?,
        (None, Some(name)) => ProgramManager::get(name)?,
        (None, None) => unreachable!("clap requires a program source"),
    };

    let input = normalize_input(&read_input(cli)?);

    if cli.validate {
        program.validate_input(&input)?;
    }

    let mut machine = TuringMachine::new(program);
    machine.reset(&input);

    if cli.debug {
        print_state(&machine);
        loop {
            match machine.step()? {
                Step::Continue => print_state(&machine),
                Step::Halted(halt) => {
                    print_state(&machine);
                    match halt {
                        Halt::State(state) => eprintln!("halted in state {state}"),
                        Halt::NoTransition { state, symbol } => eprintln!(
                            "halted: no transition for state {state} and symbol {symbol:?}"
                        ),
                    }
                    break;
                }
            }
        }
    } else {
        machine.run()?;
    }

    println!("{}", render_tape(machine.tape()));

    Ok(())
}

fn read_input(cli: &Cli) -> Result<String, TuringMachineError> {
    if let Some(path) = &cli.input {
        return fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("failed to read input {path}: {e}"))
        });
    }

    // No input file: accept piped stdin, otherwise start from a blank tape.
    if atty::is(atty::Stream::Stdin) {
        return Ok(String::new());
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| TuringMachineError::FileError(format!("failed to read stdin: {e}")))?;

    Ok(input)
}

fn print_state(machine: &TuringMachine) {
    println!(
        "step: {}, state: {}, head: {}, tape: {}",
        machine.step_count(),
        machine.state().name(),
        machine.tape().cursor(),
        machine.tape().iter().collect::<String>()
    );
}
