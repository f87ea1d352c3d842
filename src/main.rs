use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_phase_planner::config::Settings;
use studio_phase_planner::io::load_user_templates;
use studio_phase_planner::planner::Planner;
use studio_phase_planner::store::JsonFileStore;

mod cli;

fn main() -> ExitCode {
    let settings = Settings::load();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match cli::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let store = match JsonFileStore::open(&settings.data_file) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(path = %settings.data_file.display(), error = %e, "cannot open data file");
            return ExitCode::FAILURE;
        }
    };
    let templates = load_user_templates(&settings.templates_dir);
    tracing::debug!(count = templates.len(), "loaded user templates");

    let mut planner = Planner::with_templates(store, templates);
    match cli::run(&mut planner, command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
