use crate::console::{run_months, run_options, run_predict, MonthsArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_score::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Score Front End",
    about = "Collect applicant answers, compute credit history length, and request a credit score",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP front end (default command)
    Serve(ServeArgs),
    /// Count whole months between two aaaa/mm/dd dates
    Months(MonthsArgs),
    /// List the labels offered by each selection control
    Options,
    /// Submit an applicant form to the scoring service and render the result card
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Months(args) => run_months(args),
        Command::Options => run_options(),
        Command::Predict(args) => run_predict(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["credit-score-frontend"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn months_requires_a_start_date() {
        assert!(Cli::try_parse_from(["credit-score-frontend", "months"]).is_err());

        let cli = Cli::try_parse_from([
            "credit-score-frontend",
            "months",
            "--start",
            "2019/01/01",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Months(args)) => {
                assert_eq!(args.start, "2019/01/01");
                assert_eq!(args.end, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn predict_flags_parse() {
        let cli = Cli::try_parse_from([
            "credit-score-frontend",
            "predict",
            "--form",
            "applicant.json",
            "--dry-run",
            "--no-color",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Predict(args)) => {
                assert!(args.dry_run);
                assert!(args.no_color);
                assert_eq!(
                    args.form.as_deref().and_then(|path| path.to_str()),
                    Some("applicant.json")
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
