use std::path::PathBuf;
use std::process::ExitCode;

use catalog_contract::cli::run;
use catalog_contract::settings::{DEFAULT_SETTINGS_PATH, Settings};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let settings = match Settings::load(DEFAULT_SETTINGS_PATH) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    ExitCode::from(run(path, &settings).code())
}
