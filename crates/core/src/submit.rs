//! Delivery of finished-game results to a chat bot endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{config::SubmissionConfig, error::SubmissionError, round::Score};

/// A validated end-of-game result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Player name.
    pub name: String,
    /// Player phone number.
    pub phone: String,
    /// Final score.
    pub score: Score,
    /// When the player pressed submit.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Plain-text message body sent to the chat.
    pub fn message(&self) -> String {
        format!(
            "New game result:\nName: {}\nPhone: {}\nScore: {}\nMissed: {}\nSubmitted: {}",
            self.name,
            self.phone,
            self.score.correct,
            self.score.incorrect,
            self.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
}

#[derive(Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Posts results through a Telegram-style `sendMessage` bot API.
///
/// Not `Debug`: the endpoint embeds the bot token.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Build a notifier, or `Ok(None)` when token or chat id are not configured.
    pub fn from_config(config: &SubmissionConfig) -> anyhow::Result<Option<Self>> {
        let token = config.bot_token.as_deref().map(str::trim).unwrap_or("");
        let chat_id = config.chat_id.as_deref().map(str::trim).unwrap_or("");
        if token.is_empty() || chat_id.is_empty() {
            warn!("Result submission disabled: bot token or chat id missing");
            return Ok(None);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Some(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                token
            ),
            chat_id: chat_id.to_string(),
        }))
    }

    /// Send one result. Errors leave nothing half-done; the caller may retry.
    pub async fn send(&self, submission: &Submission) -> Result<(), SubmissionError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: submission.message(),
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let reply = response.json::<BotReply>().await.ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => {
                info!(score = submission.score.correct, "Result submitted");
                Ok(())
            }
            Some(reply) => Err(SubmissionError::Rejected(
                reply.description.unwrap_or_else(|| status.to_string()),
            )),
            None => Err(SubmissionError::Rejected(format!(
                "unexpected response ({status})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn submission() -> Submission {
        Submission {
            name: "Kim".to_string(),
            phone: "010-1234-5678".to_string(),
            score: Score {
                correct: 7,
                incorrect: 2,
            },
            submitted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(api_base: String) -> SubmissionConfig {
        SubmissionConfig {
            api_base,
            bot_token: Some("TESTTOKEN".to_string()),
            chat_id: Some("1234".to_string()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn message_contains_identity_and_score() {
        let text = submission().message();
        assert!(text.contains("Name: Kim"));
        assert!(text.contains("Phone: 010-1234-5678"));
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Missed: 2"));
    }

    #[test]
    fn disabled_without_credentials() {
        let config = SubmissionConfig::default();
        assert!(TelegramNotifier::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn posts_message_to_bot_endpoint() {
        type Captured = Arc<Mutex<Option<Value>>>;

        async fn record(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
            *captured.lock().unwrap() = Some(body);
            Json(json!({"ok": true}))
        }

        let captured = Captured::default();
        let router = Router::new()
            .route("/botTESTTOKEN/sendMessage", post(record))
            .with_state(captured.clone());
        let base = serve(router).await;

        let notifier = TelegramNotifier::from_config(&config(base)).unwrap().unwrap();
        notifier.send(&submission()).await.unwrap();

        let body = captured.lock().unwrap().clone().expect("request body");
        assert_eq!(body["chat_id"], json!("1234"));
        assert!(body["text"].as_str().unwrap().contains("Score: 7"));
    }

    #[tokio::test]
    async fn reports_rejection() {
        let router = Router::new().route(
            "/botTESTTOKEN/sendMessage",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"ok": false, "description": "chat not found"})),
                )
            }),
        );
        let base = serve(router).await;

        let notifier = TelegramNotifier::from_config(&config(base)).unwrap().unwrap();
        let err = notifier.send(&submission()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(ref msg) if msg == "chat not found"));
    }

    #[tokio::test]
    async fn transport_errors_hide_the_token() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = config(format!("http://{addr}"));
        config.bot_token = Some("SECRET123".to_string());
        let notifier = TelegramNotifier::from_config(&config).unwrap().unwrap();
        let err = notifier.send(&submission()).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Transport(_)));
        let text = err.to_string();
        assert!(!text.contains("SECRET123"), "token leaked: {text}");
        assert!(!format!("{err:?}").contains("SECRET123"));
    }
}
