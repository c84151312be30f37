//! Google Sheets record store
//!
//! Talks to the Sheets REST API v4. Each worksheet's first row holds the
//! column names; every following row is one record. Requests are signed with
//! an OAuth2 bearer token obtained from a service-account JWT.

use std::time::{Duration, Instant};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use super::store::{Record, RecordStore, Sheet};
use crate::config::StorageConfig;
use crate::utils::errors::{BotError, Result, StoreError, StoreResult};
use crate::utils::logging::log_store_operation;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Fields of a Google service-account key file that are needed for signing
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

/// How requests to the Sheets API are authorized
#[derive(Debug, Clone)]
pub enum SheetsAuth {
    ServiceAccount(ServiceAccountKey),
    /// Pre-issued access token, used as is
    Bearer(String),
}

#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

pub struct GoogleSheetsStore {
    http_client: reqwest::Client,
    api_url: String,
    token_url: String,
    spreadsheet_id: String,
    auth: SheetsAuth,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsStore {
    pub fn new(
        http_client: reqwest::Client,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        auth: SheetsAuth,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            spreadsheet_id: spreadsheet_id.into(),
            auth,
            token: Mutex::new(None),
        }
    }

    /// Build the store from settings, loading the service-account key
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let credentials = match (&config.credentials_json, &config.credentials_path) {
            (Some(json), _) if !json.trim().is_empty() => json.clone(),
            (_, Some(path)) => std::fs::read_to_string(path)?,
            _ => return Err(BotError::Config("Google service account credentials are not set".to_string())),
        };

        let key: ServiceAccountKey = serde_json::from_str(&credentials)
            .map_err(|e| BotError::Config(format!("Invalid service account key: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("NailBuddy-Bot/1.0")
            .build()
            .map_err(StoreError::from)?;

        info!(client_email = %key.client_email, spreadsheet_id = %config.spreadsheet_id, "Google Sheets store configured");

        Ok(Self::new(
            http_client,
            &config.api_url,
            &config.token_url,
            &config.spreadsheet_id,
            SheetsAuth::ServiceAccount(key),
        ))
    }

    async fn access_token(&self) -> StoreResult<String> {
        let key = match &self.auth {
            SheetsAuth::Bearer(token) => return Ok(token.clone()),
            SheetsAuth::ServiceAccount(key) => key,
        };

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.exchange_jwt(key).await?;
        let token = fresh.access_token.clone();
        let lifetime = Duration::from_secs(fresh.expires_in.unwrap_or(TOKEN_LIFETIME_SECS as u64));
        *cached = Some(CachedToken {
            token: fresh.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
        });

        Ok(token)
    }

    async fn exchange_jwt(&self, key: &ServiceAccountKey) -> StoreResult<TokenResponse> {
        let now = chrono::Utc::now().timestamp();
        let claims = JwtClaims {
            iss: &key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_url,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Authentication(format!("invalid private key: {}", e)))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| StoreError::Authentication(format!("failed to sign token request: {}", e)))?;

        debug!(client_email = %key.client_email, "Exchanging service account assertion for access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Authentication(format!("token endpoint returned {}: {}", status, body)));
        }

        Ok(response.json::<TokenResponse>().await?)
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.api_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    async fn fetch_rows(&self, sheet: Sheet) -> StoreResult<Vec<Vec<String>>> {
        let token = self.access_token().await?;
        let response = self
            .http_client
            .get(self.values_url(sheet.name()))
            .bearer_auth(token)
            .send()
            .await?;

        let range: ValueRange = check_status(response).await?.json().await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn push_values(&self, sheet: Sheet, values: Vec<Vec<String>>) -> StoreResult<()> {
        let token = self.access_token().await?;
        let url = format!(
            "{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.values_url(sheet.name())
        );

        let response = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": values }))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn read_records(&self, sheet: Sheet) -> StoreResult<Vec<Record>> {
        let mut rows = self.fetch_rows(sheet).await?.into_iter();
        let header = match rows.next() {
            Some(header) => header,
            None => return Ok(Vec::new()),
        };

        Ok(rows
            .map(|row| {
                header
                    .iter()
                    .zip(row)
                    .filter(|(column, _)| !column.is_empty())
                    .map(|(column, value)| (column.clone(), value))
                    .collect()
            })
            .collect())
    }

    async fn append_record(&self, sheet: Sheet, record: Record) -> StoreResult<()> {
        let rows = self.fetch_rows(sheet).await?;
        let mut header: Vec<String> = match rows.first() {
            Some(header) if header.iter().any(|c| !c.is_empty()) => header.clone(),
            _ => sheet.columns().iter().map(|c| c.to_string()).collect(),
        };

        // Known columns the record fills but an older header lacks go to the right end
        let missing: Vec<String> = sheet
            .columns()
            .iter()
            .filter(|column| record.contains_key(**column) && !header.iter().any(|c| c == *column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() && !rows.is_empty() {
            info!(sheet = %sheet, columns = ?missing, "Extending sheet header");
            header.extend(missing);
            self.put_values(&format!("{}!A1", sheet.name()), vec![header.clone()]).await?;
        }

        let row: Vec<String> = header
            .iter()
            .map(|column| record.get(column).cloned().unwrap_or_default())
            .collect();

        let mut values = Vec::with_capacity(2);
        if rows.is_empty() {
            debug!(sheet = %sheet, "Writing header row to empty sheet");
            values.push(header);
        }
        values.push(row);

        self.push_values(sheet, values).await
    }

    async fn put_values(&self, range: &str, values: Vec<Vec<String>>) -> StoreResult<()> {
        let token = self.access_token().await?;
        let response = self
            .http_client
            .put(format!("{}?valueInputOption=RAW", self.values_url(range)))
            .bearer_auth(token)
            .json(&serde_json::json!({ "range": range, "values": values }))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn write_cell(&self, sheet: Sheet, row: usize, column: &str, value: &str) -> StoreResult<()> {
        let rows = self.fetch_rows(sheet).await?;
        let header = rows.first().cloned().unwrap_or_default();
        let column_index = header.iter().position(|c| c == column).ok_or_else(|| {
            StoreError::ColumnNotFound {
                sheet: sheet.name().to_string(),
                column: column.to_string(),
            }
        })?;

        if row + 1 >= rows.len() {
            return Err(StoreError::RowOutOfRange {
                sheet: sheet.name().to_string(),
                row,
            });
        }

        // A1 rows are one-based and the header occupies row 1
        let range = format!("{}!{}{}", sheet.name(), column_letter(column_index), row + 2);
        self.put_values(&range, vec![vec![value.to_string()]]).await
    }
}

#[async_trait]
impl RecordStore for GoogleSheetsStore {
    async fn read_all(&self, sheet: Sheet) -> StoreResult<Vec<Record>> {
        let started = Instant::now();
        let result = self.read_records(sheet).await;
        log_store_operation("read_all", sheet.name(), started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn append(&self, sheet: Sheet, record: Record) -> StoreResult<()> {
        let started = Instant::now();
        let result = self.append_record(sheet, record).await;
        log_store_operation("append", sheet.name(), started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn update_cell(&self, sheet: Sheet, row: usize, column: &str, value: &str) -> StoreResult<()> {
        let started = Instant::now();
        let result = self.write_cell(sheet, row, column, value).await;
        log_store_operation("update_cell", sheet.name(), started.elapsed().as_millis() as u64, result.is_ok());
        result
    }
}

async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    match status.as_u16() {
        401 | 403 => Err(StoreError::Authentication(message)),
        code => Err(StoreError::Api { status: code, message }),
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Spreadsheet column letters for a zero-based index: 0 -> A, 25 -> Z, 26 -> AA
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
