use super::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Longest horizon the forecasting service accepts, in days
pub const MAX_HORIZON_DAYS: u32 = 14;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub predicted_kwh: f64,
    #[serde(default)]
    pub lower_kwh: Option<f64>,
    #[serde(default)]
    pub upper_kwh: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DemandForecast {
    data: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub total: f64,
    pub peak_at: DateTime<Utc>,
    pub demand_range: String,
}

/// Keeps a requested horizon within what the service accepts.
pub fn clamp_horizon(days: u32) -> u32 {
    days.clamp(1, MAX_HORIZON_DAYS)
}

impl DemandForecast {
    pub fn new(data: Vec<ForecastPoint>) -> Self {
        Self { data }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn stats(&self) -> Result<ForecastStats, AppError> {
        let peak = self
            .data
            .iter()
            .max_by(|a, b| {
                a.predicted_kwh
                    .partial_cmp(&b.predicted_kwh)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| AppError::DataError("No forecast data available".to_string()))?;

        let values: Vec<f64> = self.data.iter().map(|p| p.predicted_kwh).collect();
        let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = peak.predicted_kwh;
        let total: f64 = values.iter().sum();
        let avg = total / values.len() as f64;

        Ok(ForecastStats {
            min,
            max,
            avg,
            total,
            peak_at: peak.timestamp,
            demand_range: format!("{min:.1} - {max:.1} kWh"),
        })
    }

    /// Time labels and predicted demand, ordered by time, for charting.
    pub fn series_data(&self) -> (Vec<String>, Vec<f64>) {
        let mut sorted = self.data.clone();
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let x_data = sorted
            .iter()
            .map(|p| p.timestamp.format("%Y-%m-%d %H:%M").to_string())
            .collect();
        let y_data = sorted.iter().map(|p| p.predicted_kwh).collect();

        (x_data, y_data)
    }

    /// Predicted demand summed per UTC day, oldest day first.
    pub fn daily_totals(&self) -> Vec<(NaiveDate, f64)> {
        let mut totals: Vec<(NaiveDate, f64)> = Vec::new();
        let mut sorted = self.data.clone();
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        for point in sorted {
            let day = point.timestamp.date_naive();
            match totals.last_mut() {
                Some((last_day, total)) if *last_day == day => *total += point.predicted_kwh,
                _ => totals.push((day, point.predicted_kwh)),
            }
        }
        totals
    }
}
