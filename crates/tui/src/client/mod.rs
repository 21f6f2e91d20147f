use api_types::expense::{Expense, ExpenseId, ExpenseNew};
use reqwest::Url;
use thiserror::Error;

use crate::error::{AppError, Result};

/// Failures of a single remote call.
///
/// The service contract makes no promises about error bodies, so any
/// non-2xx reply is reported by status alone; the body is never inspected.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request rejected with status {0}")]
    Status(reqwest::StatusCode),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    expenses_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        let expenses_url = base_url
            .join("expenses")
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            expenses_url,
            http: reqwest::Client::new(),
        })
    }

    /// `GET /expenses`: the full collection, in server-defined order.
    pub async fn expenses_list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        tracing::debug!(url = %self.expenses_url, "loading expenses");

        let res = self.http.get(self.expenses_url.clone()).send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        Ok(res.json::<Vec<Expense>>().await?)
    }

    /// `POST /expenses`: returns the created record with its server id.
    pub async fn expense_create(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<Expense, ClientError> {
        tracing::debug!(url = %self.expenses_url, category = %payload.category, "creating expense");

        let res = self
            .http
            .post(self.expenses_url.clone())
            .json(payload)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        Ok(res.json::<Expense>().await?)
    }

    /// `DELETE /expenses/{id}`: status only, the body is ignored.
    pub async fn expense_delete(&self, id: &ExpenseId) -> std::result::Result<(), ClientError> {
        let mut endpoint = self.expenses_url.clone();
        // http(s) URLs always expose mutable path segments
        if let Ok(mut path) = endpoint.path_segments_mut() {
            path.push(&id.to_string());
        }
        tracing::debug!(url = %endpoint, "deleting expense");

        let res = self.http.delete(endpoint).send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }

        Ok(())
    }

    /// The resolved collection endpoint, for the info bar.
    pub fn endpoint(&self) -> &Url {
        &self.expenses_url
    }
}
