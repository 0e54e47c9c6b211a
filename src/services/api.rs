use crate::config::Config;
use crate::models::{
    error::AppError,
    forecast::{DemandForecast, ForecastPoint, clamp_horizon},
    notification::Notification,
    service_plan::{PlanPayload, ServicePlan},
    station::{StationCreationRequest, StationSummary},
    wizard::StationCreator,
};
use crate::services::retry::{retry_with_backoff, with_timeout};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// API CONFIGURATION
/// Configuration for the operator backend client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stations_url(&self) -> String {
        format!("{}/stations", self.base_url)
    }

    pub fn notifications_url(&self) -> String {
        format!("{}/notifications", self.base_url)
    }

    pub fn notification_url(&self, id: &str) -> String {
        format!("{}/notifications/{id}", self.base_url)
    }

    pub fn notifications_read_all_url(&self) -> String {
        format!("{}/notifications/read-all", self.base_url)
    }

    pub fn plans_url(&self) -> String {
        format!("{}/service-plans", self.base_url)
    }

    pub fn plan_url(&self, id: &str) -> String {
        format!("{}/service-plans/{id}", self.base_url)
    }

    /// Forecast endpoint for the next `days` days, clamped to the supported horizon.
    pub fn forecast_url(&self, days: u32) -> String {
        format!(
            "{}/forecasts/demand?days={}",
            self.base_url,
            clamp_horizon(days)
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL. A trailing slash is dropped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| Config::API_BASE_URL.to_string());
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    data: T,
}

#[derive(Deserialize, Debug)]
struct CreatedStation {
    id: String,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize, Debug)]
struct ReadUpdate {
    read: bool,
}

// DASHBOARD CLIENT
/// HTTP client for the operator backend.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl DashboardClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // STATIONS
    pub async fn fetch_stations(&self) -> Result<Vec<StationSummary>, AppError> {
        let url = self.config.stations_url();
        retry_with_backoff(|| self.get(&url), Config::MAX_RETRY_ATTEMPTS).await
    }

    // NOTIFICATIONS
    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>, AppError> {
        let url = self.config.notifications_url();
        retry_with_backoff(|| self.get(&url), Config::MAX_RETRY_ATTEMPTS).await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), AppError> {
        let url = self.config.notification_url(id);
        self.send_without_reply(Method::PATCH, &url, Some(&ReadUpdate { read: true }))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), AppError> {
        let url = self.config.notifications_read_all_url();
        self.send_without_reply::<()>(Method::POST, &url, None)
            .await
    }

    pub async fn delete_notification(&self, id: &str) -> Result<(), AppError> {
        let url = self.config.notification_url(id);
        self.send_without_reply::<()>(Method::DELETE, &url, None)
            .await
    }

    // SERVICE PLANS
    pub async fn fetch_service_plans(&self) -> Result<Vec<ServicePlan>, AppError> {
        let url = self.config.plans_url();
        retry_with_backoff(|| self.get(&url), Config::MAX_RETRY_ATTEMPTS).await
    }

    pub async fn create_service_plan(&self, plan: &PlanPayload) -> Result<ServicePlan, AppError> {
        let url = self.config.plans_url();
        self.send(Method::POST, &url, plan).await
    }

    pub async fn update_service_plan(
        &self,
        id: &str,
        plan: &PlanPayload,
    ) -> Result<ServicePlan, AppError> {
        let url = self.config.plan_url(id);
        self.send(Method::PUT, &url, plan).await
    }

    pub async fn delete_service_plan(&self, id: &str) -> Result<(), AppError> {
        let url = self.config.plan_url(id);
        self.send_without_reply::<()>(Method::DELETE, &url, None)
            .await
    }

    // FORECASTS
    pub async fn fetch_demand_forecast(&self, days: u32) -> Result<DemandForecast, AppError> {
        let url = self.config.forecast_url(days);
        let points: Vec<ForecastPoint> =
            retry_with_backoff(|| self.get(&url), Config::MAX_RETRY_ATTEMPTS).await?;
        Ok(DemandForecast::new(points))
    }

    // TRANSPORT
    /// Executes a single GET attempt and unwraps the `data` envelope.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        Self::parse_data(Self::check_status(response).await?).await
    }

    /// Sends a JSON body and unwraps the `data` envelope of the reply.
    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        Self::parse_data(Self::check_status(response).await?).await
    }

    async fn send_without_reply<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(), AppError> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        Self::check_status(response).await.map(drop)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read error body>".to_string());
        Err(Self::error_for_status(status, &body))
    }

    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse response: {e}")))?;
        Ok(envelope.data)
    }

    /// Converts a reqwest error into an appropriate `AppError`.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::ApiError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::ApiError(format!("Request error: {error}"))
        } else {
            AppError::ApiError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    ///
    /// Client errors carrying a JSON `message` become `Rejected` so the
    /// message can be shown next to the generic notice.
    fn error_for_status(status: StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            429 => AppError::RateLimited,
            401 | 403 => AppError::AuthError(format!("Authentication failed: {status}")),
            404 => AppError::NotFound(format!("Resource not found: {body}")),
            code @ 400..=499 => match serde_json::from_str::<ErrorBody>(body) {
                Ok(parsed) => AppError::Rejected {
                    status: code,
                    message: parsed.message,
                },
                Err(_) => AppError::ApiError(format!("Client error {status}: {body}")),
            },
            500..=599 => AppError::ApiError(format!("Server error {status}: {body}")),
            _ => AppError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

impl StationCreator for DashboardClient {
    /// Posts the station once, giving up after `Config::SUBMIT_TIMEOUT_MS`.
    async fn create_station(&self, request: &StationCreationRequest) -> Result<String, AppError> {
        let url = self.config.stations_url();
        let created: CreatedStation = with_timeout(
            self.send(Method::POST, &url, request),
            Config::SUBMIT_TIMEOUT_MS,
        )
        .await?;
        Ok(created.id)
    }
}
