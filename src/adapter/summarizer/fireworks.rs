//! Fireworks "Dobby" summarization client.
//!
//! Turns one transaction into a 1-2 sentence plain-text summary via the
//! Fireworks chat-completions API. Strictly best-effort: every failure
//! collapses to `None` so notifications fall back to the structured
//! message alone.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{Direction, Network, Transaction, TxKind};
use crate::domain::{format_units, format_units_fixed};
use crate::error::Result;
use crate::port::Summarizer;

const API_URL: &str = "https://api.fireworks.ai/inference/v1/chat/completions";
const MODEL: &str =
    "accounts/sentientfoundation-serverless/models/dobby-mini-unhinged-plus-llama-3-1-8b";
const SYSTEM_PROMPT: &str =
    "You are a professional transaction summarizer. Keep language neutral and concise.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fireworks-backed summarizer.
pub struct FireworksSummarizer {
    client: Client,
    api_key: String,
}

#[derive(Serialize)]
struct Request {
    model: &'static str,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: usize,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

impl FireworksSummarizer {
    /// Create a new summarizer with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    async fn complete(&self, prompt: String) -> Result<Value> {
        let request = Request {
            model: MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.3,
            max_tokens: 120,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl Summarizer for FireworksSummarizer {
    async fn summarize(
        &self,
        tx: &Transaction,
        direction: Direction,
        network: Network,
    ) -> Option<String> {
        let prompt = build_prompt(tx, direction, network);
        match self.complete(prompt).await {
            Ok(response) => extract_text(&response),
            Err(e) => {
                warn!(error = %e, hash = %tx.hash, "summarization failed");
                None
            }
        }
    }
}

fn build_prompt(tx: &Transaction, direction: Direction, network: Network) -> String {
    let value_line = match &tx.kind {
        TxKind::Native => format!("ETH Amount: {}", format_units_fixed(&tx.value, 18, 6)),
        TxKind::Token {
            symbol,
            name,
            decimals,
        } => format!(
            "Token: {name} ({symbol}), Amount: {}",
            format_units(&tx.value, *decimals)
        ),
    };

    format!(
        "Summarize this {network} transaction for a non-technical investor in 1-2 short sentences.\n\n\
        Hash: {hash}\nFrom: {from}\nTo: {to}\nWhen: {when}\n{value_line}\n\
        GasUsed: {gas_used}\nGasPrice(wei): {gas_price}\nDirection: {direction}\n\n\
        Keep it professional. No hashtags or markdown formatting. Output plain text.",
        hash = tx.hash,
        from = tx.from,
        to = tx.to,
        when = tx.time_utc(),
        gas_used = tx.gas_used,
        gas_price = tx.gas_price,
    )
}

/// Pull the completion text out of the handful of response shapes
/// Fireworks has been seen to return. Blank or absent text is `None`.
fn extract_text(data: &Value) -> Option<String> {
    let choice = data.get("choices").and_then(|c| c.get(0));

    let text = choice
        .and_then(|ch| {
            ch.get("message")
                .and_then(|m| m.get("content"))
                .and_then(Value::as_str)
                .or_else(|| ch.get("text").and_then(Value::as_str))
                .or_else(|| ch.get("content").and_then(Value::as_str))
        })
        .or_else(|| data.get("output").and_then(Value::as_str))
        .or_else(|| data.get("text").and_then(Value::as_str))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tx() -> Transaction {
        Transaction {
            hash: "0xh1".into(),
            from: "0xfrom".into(),
            to: "0xto".into(),
            timestamp: 100,
            value: "1000000000000000000".into(),
            gas_used: "21000".into(),
            gas_price: "20000000000".into(),
            kind: TxKind::Native,
        }
    }

    #[test]
    fn extracts_chat_message_content() {
        let data = json!({"choices": [{"message": {"content": " A transfer. "}}]});
        assert_eq!(extract_text(&data).as_deref(), Some("A transfer."));
    }

    #[test]
    fn extracts_plain_text_choice() {
        let data = json!({"choices": [{"text": "A transfer."}]});
        assert_eq!(extract_text(&data).as_deref(), Some("A transfer."));
    }

    #[test]
    fn extracts_top_level_output() {
        let data = json!({"output": "A transfer."});
        assert_eq!(extract_text(&data).as_deref(), Some("A transfer."));
    }

    #[test]
    fn blank_or_missing_text_is_none() {
        assert_eq!(extract_text(&json!({"choices": [{"text": "  "}]})), None);
        assert_eq!(extract_text(&json!({"choices": []})), None);
        assert_eq!(extract_text(&json!({})), None);
    }

    #[test]
    fn prompt_carries_transaction_fields() {
        let prompt = build_prompt(&sample_tx(), Direction::Incoming, Network::Mainnet);
        assert!(prompt.contains("mainnet transaction"));
        assert!(prompt.contains("Hash: 0xh1"));
        assert!(prompt.contains("ETH Amount: 1.000000"));
        assert!(prompt.contains("Direction: INCOMING"));
        assert!(prompt.contains("When: 1970-01-01 00:01:40 UTC"));
    }

    #[test]
    fn prompt_uses_token_metadata() {
        let mut tx = sample_tx();
        tx.value = "12500000".into();
        tx.kind = TxKind::Token {
            symbol: "USDC".into(),
            name: "USD Coin".into(),
            decimals: 6,
        };
        let prompt = build_prompt(&tx, Direction::Outgoing, Network::Sepolia);
        assert!(prompt.contains("sepolia transaction"));
        assert!(prompt.contains("Token: USD Coin (USDC), Amount: 12.5"));
    }
}
