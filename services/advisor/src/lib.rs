mod analyze;
mod cli;
mod demo;
mod infra;

use nearshore::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
