mod agency;
#[cfg(any(target_arch = "wasm32", test))]
mod input;
#[cfg(any(target_arch = "wasm32", test))]
mod time;
#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(any(target_arch = "wasm32", test))]
mod widgets;

#[cfg(not(target_arch = "wasm32"))]
mod cli;
#[cfg(not(target_arch = "wasm32"))]
mod config;
#[cfg(not(target_arch = "wasm32"))]
mod error;
#[cfg(not(target_arch = "wasm32"))]
mod logging;
#[cfg(not(target_arch = "wasm32"))]
mod terminal;

#[cfg(target_arch = "wasm32")]
fn main() -> std::io::Result<()> {
    console_error_panic_hook::set_once();
    web::run(agency::rules::RuleSet::daily())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    let cli = cli::Cli::parse();
    logging::init_logging(cli.verbose);

    match play(&cli) {
        Ok(()) => std::process::ExitCode::from(error::ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            eprintln!("error: {e}");
            std::process::ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn play(cli: &cli::Cli) -> Result<(), error::AppError> {
    let rules = config::load_rules(cli.mode, cli.config.as_deref())?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    terminal::run(&rules, stdin.lock(), &mut stdout)?;
    Ok(())
}
