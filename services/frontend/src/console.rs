use crate::infra::{load_form, today};
use clap::Args;
use credit_score::config::{AppConfig, PredictionConfig};
use credit_score::error::AppError;
use credit_score::telemetry;
use credit_score::workflows::history::months_between;
use credit_score::workflows::scoring::{
    option_sets, PredictionCard, PredictionClient, PredictionPayload, ScoringError, ScoringService,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MonthsArgs {
    /// Start date of the credit history (aaaa/mm/dd)
    #[arg(long)]
    pub(crate) start: String,
    /// End date (aaaa/mm/dd). Defaults to today.
    #[arg(long)]
    pub(crate) end: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JSON applicant form; omitted fields keep the form defaults
    #[arg(long)]
    pub(crate) form: Option<PathBuf>,
    /// Print the request payload instead of contacting the scoring service
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Render the result card without ANSI colours
    #[arg(long)]
    pub(crate) no_color: bool,
}

pub(crate) fn run_months(args: MonthsArgs) -> Result<(), AppError> {
    let end = args.end.unwrap_or_else(today);
    let length = months_between(&args.start, &end)?;
    println!("{}", length.advisory());
    Ok(())
}

pub(crate) fn run_options() -> Result<(), AppError> {
    for set in option_sets() {
        println!("{} ({})", set.prompt, set.field);
        for label in set.labels {
            println!("  - {label}");
        }
    }
    Ok(())
}

pub(crate) async fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let form = load_form(args.form.as_deref())?;

    if args.dry_run {
        let profile = form.into_profile()?;
        let payload = PredictionPayload::assemble(&profile);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let prediction = PredictionConfig::load()?;
    let client = PredictionClient::from_config(&prediction).map_err(ScoringError::from)?;
    let service = ScoringService::new(client);

    let result = service.submit(form).await?;
    println!("{}", render_card(&result.card(), !args.no_color));
    Ok(())
}

/// Two lines: the class label in the palette colours, then the model version caption.
pub(crate) fn render_card(card: &PredictionCard, colour: bool) -> String {
    let label = match (colour, rgb(card.background), rgb(card.foreground)) {
        (true, Some((br, bg, bb)), Some((fr, fg, fb))) => format!(
            "\x1b[48;2;{br};{bg};{bb}m\x1b[38;2;{fr};{fg};{fb}m\x1b[1m {} \x1b[0m",
            card.label
        ),
        _ => card.label.to_string(),
    };
    format!("{label}\n{}", card.caption)
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_score::workflows::scoring::{PredictionResult, RiskClass};

    fn card(class: RiskClass) -> PredictionCard {
        PredictionResult {
            class,
            code: None,
            version: Some("v3".to_string()),
        }
        .card()
    }

    #[test]
    fn palette_hex_is_decoded() {
        assert_eq!(rgb("#f8d7da"), Some((0xf8, 0xd7, 0xda)));
        assert_eq!(rgb("#155724"), Some((0x15, 0x57, 0x24)));
        assert_eq!(rgb("155724"), None);
        assert_eq!(rgb("#1557"), None);
        assert_eq!(rgb("#zz5724"), None);
    }

    #[test]
    fn coloured_card_uses_palette() {
        let rendered = render_card(&card(RiskClass::Poor), true);
        assert!(rendered.contains("\x1b[48;2;248;215;218m"));
        assert!(rendered.contains("\x1b[38;2;114;28;36m"));
        assert!(rendered.contains("Poor (Alto risco)"));
        assert!(rendered.ends_with("Versão do modelo: v3"));
    }

    #[test]
    fn plain_card_has_no_escape_codes() {
        let rendered = render_card(&card(RiskClass::Good), false);
        assert_eq!(rendered, "Good (Bom histórico)\nVersão do modelo: v3");
    }

    #[test]
    fn months_rejects_reversed_dates() {
        let error = run_months(MonthsArgs {
            start: "2025/01/01".to_string(),
            end: Some("2020/01/01".to_string()),
        })
        .expect_err("end precedes start");
        assert!(error.user_message().is_some());
    }
}
