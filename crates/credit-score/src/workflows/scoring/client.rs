use std::future::Future;
use std::net::IpAddr;

use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::payload::PredictionPayload;
use crate::config::PredictionConfig;

pub const API_KEY_HEADER: &str = "x-api-key";

pub const PREDICTION_FAILURE_MESSAGE: &str =
    "Erro ao obter a previsão. Por favor, tente novamente mais tarde ou revise seus dados.";

/// Status and body of the scoring service reply. The body is only read for a 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to scoring service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("scoring service unreachable: {0}")]
    Unavailable(String),
}

impl TransportError {
    /// Connection failures mean the service is unreachable; anything else stays a request error.
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() {
            TransportError::Unavailable(err.to_string())
        } else {
            TransportError::Request(err)
        }
    }
}

/// Outbound hook for the JSON POST so the client can run against fakes.
pub trait PredictionTransport: Send + Sync {
    fn post_json(
        &self,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<TransportReply, TransportError>> + Send;
}

/// `reqwest` transport that posts to the configured endpoint with the API key header.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &PredictionConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if is_loopback(config.endpoint()) {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint().clone(),
            api_key: config.api_key().to_string(),
        })
    }
}

fn is_loopback(endpoint: &Url) -> bool {
    match endpoint.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

impl PredictionTransport for HttpTransport {
    async fn post_json(&self, body: Vec<u8>) -> Result<TransportReply, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.as_str())
            .body(body)
            .send()
            .await
            .map_err(TransportError::from_send)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(TransportReply {
                status: status.as_u16(),
                body: Vec::new(),
            });
        }

        let body = response.bytes().await?;
        Ok(TransportReply {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

/// Background and text colours of the result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Risk category returned by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClass {
    Poor,
    Standard,
    Good,
    Unknown,
}

impl RiskClass {
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Poor,
            Some(1) => Self::Standard,
            Some(2) => Self::Good,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor (Alto risco)",
            Self::Standard => "Standard (Risco moderado)",
            Self::Good => "Good (Bom histórico)",
            Self::Unknown => "Classe desconhecida",
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Poor => Palette {
                background: "#f8d7da",
                foreground: "#721c24",
            },
            Self::Standard => Palette {
                background: "#fff3cd",
                foreground: "#856404",
            },
            Self::Good => Palette {
                background: "#d4edda",
                foreground: "#155724",
            },
            Self::Unknown => Palette {
                background: "#d1ecf1",
                foreground: "#0c5460",
            },
        }
    }
}

/// Interpreted 200 reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub class: RiskClass,
    pub code: Option<i64>,
    pub version: Option<String>,
}

impl PredictionResult {
    pub fn card(&self) -> PredictionCard {
        let palette = self.class.palette();
        let version = self.version.as_deref().unwrap_or("não informada");
        PredictionCard {
            class: self.class,
            label: self.class.label(),
            background: palette.background,
            foreground: palette.foreground,
            caption: format!("Versão do modelo: {version}"),
        }
    }
}

/// What the front end displays: the label in the class colours and the model version below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionCard {
    pub class: RiskClass,
    pub label: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub caption: String,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    #[serde(default)]
    prediction: Option<Value>,
    #[serde(default)]
    version: Option<Value>,
}

impl ScoreResponse {
    fn into_result(self) -> PredictionResult {
        let code = self.prediction.as_ref().and_then(class_code);
        let version = match self.version {
            None | Some(Value::Null) => None,
            Some(Value::String(version)) => Some(version),
            Some(other) => Some(other.to_string()),
        };

        PredictionResult {
            class: RiskClass::from_code(code),
            code,
            version,
        }
    }
}

/// Integral JSON numbers and booleans; `2.0` counts as class 2 and `true` as class 1, `"2"` is unknown.
fn class_code(value: &Value) -> Option<i64> {
    if let Some(flag) = value.as_bool() {
        return Some(i64::from(flag));
    }
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.fract() == 0.0 && number.abs() <= i64::MAX as f64)
            .map(|number| number as i64)
    })
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("failed to encode prediction payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("scoring service answered with HTTP {status}")]
    Remote { status: u16 },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("scoring service returned an unreadable body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl PredictionError {
    /// Every failure of the call reads the same to the user.
    pub fn user_message(&self) -> &'static str {
        PREDICTION_FAILURE_MESSAGE
    }
}

/// Single-attempt client for the remote scoring service.
pub struct PredictionClient<T> {
    transport: T,
}

impl PredictionClient<HttpTransport> {
    pub fn from_config(config: &PredictionConfig) -> Result<Self, PredictionError> {
        let transport = HttpTransport::new(config)?;
        info!(endpoint = %config.endpoint(), "prediction client configured");
        Ok(Self::new(transport))
    }
}

impl<T> PredictionClient<T>
where
    T: PredictionTransport,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST the payload once and interpret the reply. There is no retry.
    pub async fn predict(
        &self,
        payload: &PredictionPayload,
    ) -> Result<PredictionResult, PredictionError> {
        let body = payload.to_json().map_err(PredictionError::Encode)?;
        debug!(bytes = body.len(), "posting prediction payload");

        let reply = match self.transport.post_json(body).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "prediction request did not complete");
                return Err(err.into());
            }
        };

        if reply.status != StatusCode::OK.as_u16() {
            warn!(status = reply.status, "scoring service rejected the request");
            return Err(PredictionError::Remote {
                status: reply.status,
            });
        }

        let response: ScoreResponse = serde_json::from_slice(&reply.body).map_err(|err| {
            warn!(error = %err, "scoring service body is not a JSON object");
            PredictionError::Decode(err)
        })?;

        Ok(response.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::scoring::profile::ApplicantForm;
    use std::sync::Mutex;

    struct CannedTransport {
        reply: Result<TransportReply, String>,
        requests: Mutex<Vec<Vec<u8>>>,
    }

    impl CannedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(TransportReply {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: Err("connection refused".to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl PredictionTransport for CannedTransport {
        async fn post_json(&self, body: Vec<u8>) -> Result<TransportReply, TransportError> {
            self.requests.lock().expect("request log poisoned").push(body);
            self.reply.clone().map_err(TransportError::Unavailable)
        }
    }

    fn payload() -> PredictionPayload {
        let profile = ApplicantForm::default().into_profile().expect("valid");
        PredictionPayload::assemble(&profile)
    }

    #[tokio::test]
    async fn good_class_renders_green_card_with_version() {
        let client = PredictionClient::new(CannedTransport::replying(
            200,
            r#"{"prediction": 2, "version": "v3"}"#,
        ));
        let result = client.predict(&payload()).await.expect("prediction");

        assert_eq!(result.class, RiskClass::Good);
        assert_eq!(result.version.as_deref(), Some("v3"));
        let card = result.card();
        assert_eq!(card.label, "Good (Bom histórico)");
        assert_eq!(card.background, "#d4edda");
        assert_eq!(card.foreground, "#155724");
        assert_eq!(card.caption, "Versão do modelo: v3");
    }

    #[tokio::test]
    async fn sends_serialized_payload_once() {
        let client = PredictionClient::new(CannedTransport::replying(
            200,
            r#"{"prediction": 0, "version": "v1"}"#,
        ));
        let payload = payload();
        client.predict(&payload).await.expect("prediction");

        let requests = client.transport().requests.lock().expect("log").clone();
        assert_eq!(requests, vec![payload.to_json().expect("json")]);
    }

    #[tokio::test]
    async fn poor_and_standard_classes_map_to_red_and_yellow() {
        let poor = PredictionClient::new(CannedTransport::replying(200, r#"{"prediction": 0}"#))
            .predict(&payload())
            .await
            .expect("prediction");
        assert_eq!(poor.card().label, "Poor (Alto risco)");
        assert_eq!(poor.class.palette().background, "#f8d7da");

        let standard = PredictionClient::new(CannedTransport::replying(200, r#"{"prediction": 1}"#))
            .predict(&payload())
            .await
            .expect("prediction");
        assert_eq!(standard.card().label, "Standard (Risco moderado)");
        assert_eq!(standard.class.palette().foreground, "#856404");
    }

    #[tokio::test]
    async fn unexpected_class_falls_back_to_unknown() {
        let client = PredictionClient::new(CannedTransport::replying(200, r#"{"prediction": 9}"#));
        let result = client.predict(&payload()).await.expect("prediction");

        assert_eq!(result.class, RiskClass::Unknown);
        assert_eq!(result.code, Some(9));
        assert_eq!(result.version, None);
        let card = result.card();
        assert_eq!(card.label, "Classe desconhecida");
        assert_eq!(card.background, "#d1ecf1");
    }

    #[tokio::test]
    async fn missing_or_textual_class_is_unknown() {
        for body in [r#"{"version": "v2"}"#, r#"{"prediction": "2", "version": "v2"}"#] {
            let client = PredictionClient::new(CannedTransport::replying(200, body));
            let result = client.predict(&payload()).await.expect("prediction");
            assert_eq!(result.class, RiskClass::Unknown, "body {body}");
        }

        let client = PredictionClient::new(CannedTransport::replying(200, r#"{"prediction": 2.0}"#));
        let result = client.predict(&payload()).await.expect("prediction");
        assert_eq!(result.class, RiskClass::Good);
    }

    #[tokio::test]
    async fn non_ok_status_is_remote_failure() {
        let client = PredictionClient::new(CannedTransport::replying(503, "not json at all"));
        let error = client.predict(&payload()).await.expect_err("503 fails");

        assert!(matches!(error, PredictionError::Remote { status: 503 }));
        assert_eq!(error.user_message(), PREDICTION_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let client = PredictionClient::new(CannedTransport::unreachable());
        let error = client.predict(&payload()).await.expect_err("unreachable");

        assert!(matches!(
            error,
            PredictionError::Transport(TransportError::Unavailable(_))
        ));
        assert_eq!(error.user_message(), PREDICTION_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn unreadable_ok_body_is_decode_failure() {
        let client = PredictionClient::new(CannedTransport::replying(200, "<html>oops</html>"));
        let error = client.predict(&payload()).await.expect_err("bad body");
        assert!(matches!(error, PredictionError::Decode(_)));
        assert_eq!(error.user_message(), PREDICTION_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn boolean_class_codes_map_to_poor_and_standard() {
        let standard = PredictionClient::new(CannedTransport::replying(200, r#"{"prediction": true}"#))
            .predict(&payload())
            .await
            .expect("prediction");
        assert_eq!(standard.class, RiskClass::Standard);
        assert_eq!(standard.code, Some(1));

        let poor = PredictionClient::new(CannedTransport::replying(200, r#"{"prediction": false}"#))
            .predict(&payload())
            .await
            .expect("prediction");
        assert_eq!(poor.class, RiskClass::Poor);
    }

    #[test]
    fn loopback_endpoints_are_detected() {
        let url = |raw: &str| Url::parse(raw).expect("valid url");
        assert!(is_loopback(&url("http://localhost:8080/predict")));
        assert!(is_loopback(&url("http://127.0.0.1:9000/predict")));
        assert!(is_loopback(&url("http://[::1]:9000/predict")));
        assert!(!is_loopback(&url("https://scoring.example.com/predict")));
    }

    #[test]
    fn non_string_version_is_rendered_verbatim() {
        let response: ScoreResponse =
            serde_json::from_str(r#"{"prediction": 1, "version": 4}"#).expect("parse");
        let result = response.into_result();
        assert_eq!(result.version.as_deref(), Some("4"));
    }
}
