//! scicalc: keystroke-driven scientific calculator
//!
//! ## Usage
//!
//! ```bash
//! scicalc eval 3 + 4 x 2 =              # 14
//! scicalc eval 2 pow 10                 # 1024
//! scicalc --state calc.json eval 9 ms   # memory survives between runs
//! scicalc --state calc.json history
//! echo "30 sin" | scicalc repl
//! ```

use calc_cli::{
    load_engine_config, Cli, CliConfig, CliResult, Commands, EvalArgs, HistoryArgs, TokenRunner,
    Verbosity,
};
use clap::Parser;
use console::style;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Eval(args) => run_eval(&config, &args),
        Commands::Repl => run_repl(&config),
        Commands::History(args) => run_history(&config, &args),
        Commands::Reset => run_reset(&config),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let engine = match &cli.config {
        Some(path) => load_engine_config(path)?,
        None => Default::default(),
    };
    Ok(CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_state(cli.state.clone())
        .with_engine(engine))
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_display(runner: &TokenRunner, verbosity: Verbosity) {
    let display = runner.display();
    if verbosity.is_quiet() {
        println!("{}", display.main());
    } else {
        print!("{}", display.render());
    }
}

fn run_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let mut runner = TokenRunner::open(config)?;
    runner.run(&args.tokens)?;
    if args.json {
        println!("{}", runner.view_json()?);
    } else {
        print_display(&runner, config.verbosity);
    }
    Ok(())
}

fn run_repl(config: &CliConfig) -> CliResult<()> {
    let mut runner = TokenRunner::open(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if !config.verbosity.is_quiet() {
        print!("{}", runner.display().render());
    }
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "history" => print!("{}", runner.display().render_history()),
            keys => match runner.run([keys]) {
                Ok(()) => print_display(&runner, config.verbosity),
                // A typo should not end the session
                Err(e) => eprintln!("{} {e}", style("!").yellow()),
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn run_history(config: &CliConfig, args: &HistoryArgs) -> CliResult<()> {
    let runner = TokenRunner::open(config)?;
    if args.json {
        println!("{}", runner.history_json()?);
    } else {
        print!("{}", runner.display().render_history());
    }
    Ok(())
}

fn run_reset(config: &CliConfig) -> CliResult<()> {
    let mut runner = TokenRunner::open(config)?;
    runner.reset();
    if !config.verbosity.is_quiet() {
        println!("{}", style("Memory, history and angle mode cleared").green());
    }
    Ok(())
}
