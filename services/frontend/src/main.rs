use credit_score_frontend::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        match err.user_message() {
            Some(message) => eprintln!("{message}"),
            None => eprintln!("application error: {err}"),
        }
        std::process::exit(1);
    }
}
