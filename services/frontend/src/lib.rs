mod cli;
mod console;
mod infra;
mod routes;
mod server;

use credit_score::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
