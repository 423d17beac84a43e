use std::process::ExitCode;

use dotenv::dotenv;
use printfarm_scheduler::batch::{exit_code, run_files};
use printfarm_scheduler::config::Config;
use printfarm_scheduler::error::ServiceError;

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Config::from_env()
        .map_err(ServiceError::from)
        .and_then(|config| run_files(&config));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
