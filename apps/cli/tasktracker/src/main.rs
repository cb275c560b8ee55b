use tasktracker::cli::Cli;
use tasktracker::commands::execute_with;
use tasktracker::error::CliError;
use tasktracker::logger::initialize as LoggerInitialize;

use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::dotenv::load_dotenv;
use tasktracker_core::error::CoreError;
use tasktracker_core::report::{ErrorReporter, FAILURE_EXIT_CODE, SUCCESS_EXIT_CODE};

use std::env;
use std::io::{Stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version print to stdout and succeed
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() {
                FAILURE_EXIT_CODE
            } else {
                SUCCESS_EXIT_CODE
            });
        }
    };

    let mut reporter = ErrorReporter::stderr();

    match run(&cli, &mut reporter) {
        Ok(code) => ExitCode::from(code),
        Err(CliError::Core(e)) => ExitCode::from(reporter.report(&e)),
        Err(e) => {
            debug!("Setup failed at {}", e.location());
            reporter.execution_error(&e);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

fn run(cli: &Cli, reporter: &mut ErrorReporter<Stderr>) -> Result<u8, CliError> {
    LoggerInitialize(cli.log_level(), cli.log_file.as_deref())?;

    // Before the runtime exists: this mutates the process environment
    let dotenv = load_dotenv().map_err(CoreError::from)?;
    if let Some(path) = &dotenv.path {
        info!("Using {}", path.display());
    }

    let settings = Settings::resolve(&cli.overrides(), |key| env::var(key).ok());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to start async runtime: {e}")))?;

    let code = runtime.block_on(async {
        let dispatcher = match Dispatcher::new(settings.timeout()) {
            Ok(dispatcher) => dispatcher,
            Err(e) => return reporter.report(&CoreError::from(e)),
        };

        execute_with(
            &cli.command,
            &settings,
            &dispatcher,
            &mut stdout().lock(),
            reporter,
        )
        .await
    });

    Ok(code)
}
