use chrono::Local;
use credit_score::error::AppError;
use credit_score::workflows::scoring::ApplicantForm;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Today in the calculator's aaaa/mm/dd layout.
pub(crate) fn today() -> String {
    Local::now().date_naive().format("%Y/%m/%d").to_string()
}

/// Reads an applicant form from JSON. Without a path the widget defaults are used.
pub(crate) fn load_form(path: Option<&Path>) -> Result<ApplicantForm, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(ApplicantForm::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_uses_slash_separated_layout() {
        let today = today();
        let parts: Vec<&str> = today.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
    }

    #[test]
    fn missing_form_path_yields_defaults() {
        let form = load_form(None).expect("defaults");
        assert_eq!(form, ApplicantForm::default());
    }

    #[test]
    fn form_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!(
            "credit-score-form-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"attributes": {"age": 42}, "loan_type": "Mortgage Loan (Hipoteca)"}"#,
        )
        .expect("write form");

        let form = load_form(Some(&path)).expect("form loads");
        let _ = std::fs::remove_file(&path);

        assert_eq!(form.attributes.age, 42);
        assert_eq!(form.loan_type, "Mortgage Loan (Hipoteca)");
        assert_eq!(form.occupation, ApplicantForm::default().occupation);
    }

    #[test]
    fn unknown_form_fields_are_rejected() {
        let path = std::env::temp_dir().join(format!(
            "credit-score-bad-form-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"salary": 10}"#).expect("write form");

        let error = load_form(Some(&path)).expect_err("unknown field");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(error, AppError::Json(_)));
    }
}
