//! # Trip Calculator Client SDK
//!
//! A typed Rust client for the trip calculator API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tripcalc_types::{
    CurrencyCode, CurrencyInfo, CustomsCalculation, CustomsRequest, ExchangeCalculation,
    ExchangeRequest, HistoryEntry, RateResult, TipCalculation, TipCultureResponse, TipRequest,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trip calculator API client.
pub struct TripcalcClient {
    base_url: String,
    http: Client,
}

impl TripcalcClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts `amount` from one currency to another.
    pub async fn exchange(
        &self,
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ExchangeCalculation, ClientError> {
        let req = ExchangeRequest {
            amount: Some(amount),
            from,
            to,
        };
        self.post("/api/exchange", &req).await
    }

    /// Estimates duty and VAT on a USD-priced order.
    pub async fn customs(
        &self,
        product_price: f64,
        shipping_cost: Option<f64>,
        category: &str,
    ) -> Result<CustomsCalculation, ClientError> {
        let req = CustomsRequest {
            product_price: Some(product_price),
            shipping_cost,
            category: category.to_string(),
        };
        self.post("/api/customs", &req).await
    }

    /// Computes a tip; `tip_percent` defaults to the country's custom.
    pub async fn tip(
        &self,
        meal_amount: f64,
        tip_percent: Option<f64>,
        party_size: i64,
        country_code: &str,
    ) -> Result<TipCalculation, ClientError> {
        let req = TipRequest {
            meal_amount: Some(meal_amount),
            tip_percent,
            party_size,
            country_code: country_code.to_string(),
        };
        self.post("/api/tip", &req).await
    }

    /// Lists all tipping cultures.
    pub async fn tip_cultures(&self) -> Result<Vec<TipCultureResponse>, ClientError> {
        self.get("/api/tip/cultures").await
    }

    /// Gets the tipping culture for one country.
    pub async fn tip_culture(&self, country_code: &str) -> Result<TipCultureResponse, ClientError> {
        self.get(&format!("/api/tip/cultures/{}", country_code))
            .await
    }

    /// Lists supported currencies.
    pub async fn currencies(&self) -> Result<Vec<CurrencyInfo>, ClientError> {
        self.get("/api/currencies").await
    }

    /// Gets the current rate for a currency pair.
    pub async fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<RateResult, ClientError> {
        self.get(&format!("/api/rates/{}/{}", from, to)).await
    }

    /// Lists recent calculations, most recent first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        self.get("/api/history").await
    }

    /// Clears the calculation history.
    pub async fn clear_history(&self) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/api/history", self.base_url))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, resp).await)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status, resp).await)
        }
    }
}

async fn api_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TripcalcClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = TripcalcClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
