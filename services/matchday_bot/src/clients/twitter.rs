//! Twitter/X posting client.
//!
//! Posts via `POST /2/tweets` with an OAuth 1.0a user-context signature built
//! in-house: RFC 3986 percent-encoding, sorted parameter string, HMAC-SHA1
//! over the signature base string. The request body is JSON, so only the
//! oauth_* parameters enter the signature.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use log::{debug, info};
use rand::{distributions::Alphanumeric, Rng};
use reqwest::Client;
use serde::Serialize;
use sha1::Sha1;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use match_core::Publisher;

type HmacSha1 = Hmac<Sha1>;

#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

#[derive(Clone)]
pub struct TwitterClient {
    http: Client,
    base_url: String,
    credentials: TwitterCredentials,
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
}

impl TwitterClient {
    pub fn new(base_url: String, credentials: TwitterCredentials) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            credentials,
        }
    }

    fn authorization_header(&self, method: &str, url: &str) -> Result<String> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock before unix epoch")?
            .as_secs()
            .to_string();

        let oauth_params = [
            ("oauth_consumer_key", self.credentials.consumer_key.as_str()),
            ("oauth_nonce", nonce.as_str()),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.credentials.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base_string(method, url, &oauth_params);
        let signature = sign(
            &base,
            &self.credentials.consumer_secret,
            &self.credentials.access_secret,
        )?;

        let mut header = String::from("OAuth ");
        for (i, &(k, v)) in oauth_params
            .iter()
            .chain(std::iter::once(&("oauth_signature", signature.as_str())))
            .enumerate()
        {
            if i > 0 {
                header.push_str(", ");
            }
            header.push_str(&format!("{}=\"{}\"", percent_encode(k), percent_encode(v)));
        }
        Ok(header)
    }
}

#[async_trait]
impl Publisher for TwitterClient {
    async fn publish(&self, text: &str) -> Result<()> {
        let url = format!("{}/2/tweets", self.base_url.trim_end_matches('/'));
        let auth = self.authorization_header("POST", &url)?;

        debug!("Posting {} chars", text.chars().count());
        let resp = self
            .http
            .post(&url)
            .header("Authorization", auth)
            .json(&TweetRequest { text })
            .send()
            .await
            .with_context(|| format!("Posting API request failed: {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Posting API non-2xx: {status} body={body}"));
        }
        info!("Posted update ({status})");
        Ok(())
    }
}

/// RFC 3986 percent-encoding with the unreserved set, as OAuth 1.0a requires.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Build the OAuth signature base string from method, url and request params.
fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| anyhow!("Invalid HMAC key"))?;
    mac.update(base.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
