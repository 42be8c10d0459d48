//! Hosted data store client
//!
//! Talks the PostgREST dialect used by hosted Postgres services: tables live
//! under `/rest/v1/<table>`, filters are `column=eq.value`, and upserts are a
//! POST with `Prefer: resolution=merge-duplicates` plus `on_conflict`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use shared::{ContactSubmission, ContactSubmissionRecord, StoreRecord, StoreSummary, WeekHours};
use uuid::Uuid;

use crate::config::DataStoreConfig;
use crate::error::{AppError, AppResult};
use crate::repositories::{decode_hours, ContactRepository, StoreRepository, StoreRow};

const STORE_TABLE: &str = "store_settings";
const CONTACT_TABLE: &str = "contact_submissions";

/// Hosted data store client
#[derive(Clone)]
pub struct RestDataStore {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SummaryRow {
    id: Option<Uuid>,
    location: String,
}

#[derive(Debug, Deserialize)]
struct HoursRow {
    #[serde(default)]
    hours_of_operation: Option<serde_json::Value>,
}

impl RestDataStore {
    pub fn new(config: &DataStoreConfig) -> anyhow::Result<Self> {
        if config.rest_url.is_empty() {
            anyhow::bail!("data_store.rest_url must be set for the rest backend");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.rest_api_key.clone(),
            base_url: config.rest_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// `GET /rest/v1/<table>?<query>`
    fn select(&self, table: &str, query: &[(&str, String)]) -> RequestBuilder {
        self.authorized(self.client.get(self.table_url(table)).query(query))
    }

    /// `POST /rest/v1/store_settings?on_conflict=location`, merging into the
    /// existing row for the location
    fn upsert_request(&self, record: &StoreRecord) -> RequestBuilder {
        let body = json!([{
            "location": record.location,
            "store_name": record.store_name,
            "phone": record.phone,
            "email": record.email,
            "details": record.details,
            "address": record.address,
            "city": record.city,
            "state": record.state,
            "zip_code": record.zip_code,
            "country": record.country,
            "latitude": record.latitude,
            "longitude": record.longitude,
            "is_primary": record.is_primary,
            "status": record.status.as_str(),
            "hours_of_operation": record.hours_of_operation,
            "updated_at": record.updated_at,
        }]);

        self.authorized(self.client.post(self.table_url(STORE_TABLE)))
            .query(&[("on_conflict", "location")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&body)
    }

    fn insert_request(&self, submission: &ContactSubmission) -> RequestBuilder {
        self.authorized(self.client.post(self.table_url(CONTACT_TABLE)))
            .header("Prefer", "return=representation")
            .json(&[submission])
    }

    async fn rows<T: for<'de> Deserialize<'de>>(&self, request: RequestBuilder) -> AppResult<Vec<T>> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<Vec<T>>().await?)
    }
}

/// PostgREST equality filter value
fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(%status, body = %body, "Hosted data store rejected request");
    Err(AppError::DataStore(format!("{}: {}", status, body)))
}

#[async_trait]
impl StoreRepository for RestDataStore {
    async fn list_summaries(&self) -> AppResult<Vec<StoreSummary>> {
        let rows: Vec<SummaryRow> = self
            .rows(self.select(
                STORE_TABLE,
                &[("select", "location,id".to_string()), ("order", "location".to_string())],
            ))
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| StoreSummary::new(row.id, row.location))
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<StoreRecord>> {
        let rows: Vec<StoreRow> = self
            .rows(self.select(
                STORE_TABLE,
                &[("select", "*".to_string()), ("order", "location".to_string())],
            ))
            .await?;

        Ok(rows.into_iter().map(StoreRecord::from).collect())
    }

    async fn find_by_location(&self, location: &str) -> AppResult<Option<StoreRecord>> {
        let rows: Vec<StoreRow> = self
            .rows(self.select(
                STORE_TABLE,
                &[("select", "*".to_string()), ("location", eq_filter(location))],
            ))
            .await?;

        Ok(rows.into_iter().next().map(StoreRecord::from))
    }

    async fn find_hours(&self, location: &str) -> AppResult<Option<WeekHours>> {
        let rows: Vec<HoursRow> = self
            .rows(self.select(
                STORE_TABLE,
                &[
                    ("select", "hours_of_operation".to_string()),
                    ("location", eq_filter(location)),
                ],
            ))
            .await?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| decode_hours(location, row.hours_of_operation)))
    }

    async fn upsert(&self, record: &StoreRecord) -> AppResult<StoreRecord> {
        let request = self.upsert_request(record);
        let rows: Vec<StoreRow> = self.rows(request).await?;
        rows.into_iter()
            .next()
            .map(StoreRecord::from)
            .ok_or_else(|| AppError::DataStore("Upsert returned no rows".to_string()))
    }

    async fn ping(&self) -> AppResult<()> {
        let _: Vec<SummaryRow> = self
            .rows(self.select(
                STORE_TABLE,
                &[("select", "location,id".to_string()), ("limit", "1".to_string())],
            ))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for RestDataStore {
    async fn insert(&self, submission: &ContactSubmission) -> AppResult<ContactSubmissionRecord> {
        let request = self.insert_request(submission);
        let rows: Vec<ContactSubmissionRecord> = self.rows(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DataStore("Insert returned no rows".to_string()))
    }
}
