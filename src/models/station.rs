use super::error::AppError;
use serde::{Deserialize, Serialize};

/// Operating hour choices offered by the creation form. `custom` lets the
/// operator type free text instead.
pub const OPERATING_HOUR_PRESETS: [&str; 4] = ["24/7", "6:00-22:00", "8:00-20:00", CUSTOM_HOURS];

/// Preset that switches the form to free-text hours
pub const CUSTOM_HOURS: &str = "custom";

/// Operational state of a charging station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    #[default]
    Active,
    Maintenance,
    Offline,
}

impl StationStatus {
    /// Value used on the wire and in form controls
    pub fn code(&self) -> &'static str {
        match self {
            StationStatus::Active => "active",
            StationStatus::Maintenance => "maintenance",
            StationStatus::Offline => "offline",
        }
    }

    /// Returns human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StationStatus::Active => "Active",
            StationStatus::Maintenance => "Under maintenance",
            StationStatus::Offline => "Offline",
        }
    }

    /// Returns CSS class name for color coding
    pub fn css_class(&self) -> &'static str {
        match self {
            StationStatus::Active => "status-active",
            StationStatus::Maintenance => "status-maintenance",
            StationStatus::Offline => "status-offline",
        }
    }

    pub fn all() -> &'static [StationStatus] {
        &[
            StationStatus::Active,
            StationStatus::Maintenance,
            StationStatus::Offline,
        ]
    }
}

impl std::str::FromStr for StationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(StationStatus::Active),
            "maintenance" => Ok(StationStatus::Maintenance),
            "offline" => Ok(StationStatus::Offline),
            _ => Err(AppError::DataError(format!("Invalid station status: {s}"))),
        }
    }
}

/// Fixed catalog of on-site amenities a station can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Wifi,
    Restroom,
    Cafe,
    Parking,
    Shopping,
    Lounge,
    CarWash,
    ConvenienceStore,
}

impl Amenity {
    pub fn code(&self) -> &'static str {
        match self {
            Amenity::Wifi => "wifi",
            Amenity::Restroom => "restroom",
            Amenity::Cafe => "cafe",
            Amenity::Parking => "parking",
            Amenity::Shopping => "shopping",
            Amenity::Lounge => "lounge",
            Amenity::CarWash => "car_wash",
            Amenity::ConvenienceStore => "convenience_store",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Wifi => "Wi-Fi",
            Amenity::Restroom => "Restroom",
            Amenity::Cafe => "Café",
            Amenity::Parking => "Free parking",
            Amenity::Shopping => "Shopping",
            Amenity::Lounge => "Driver lounge",
            Amenity::CarWash => "Car wash",
            Amenity::ConvenienceStore => "Convenience store",
        }
    }

    pub fn all() -> &'static [Amenity] {
        &[
            Amenity::Wifi,
            Amenity::Restroom,
            Amenity::Cafe,
            Amenity::Parking,
            Amenity::Shopping,
            Amenity::Lounge,
            Amenity::CarWash,
            Amenity::ConvenienceStore,
        ]
    }
}

impl std::str::FromStr for Amenity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amenity::all()
            .iter()
            .find(|a| a.code() == s)
            .copied()
            .ok_or_else(|| AppError::DataError(format!("Unknown amenity: {s}")))
    }
}

/// Body accepted by the station creation endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCreationRequest {
    pub station_name: String,
    pub address: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub operating_hours: String,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub status: StationStatus,
    pub total_ports: u32,
    pub fast_charge_ports: u32,
    pub standard_ports: u32,
    pub price_per_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_charge_power_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_charge_power_rating: Option<f64>,
}

/// Station row returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSummary {
    pub id: String,
    pub station_name: String,
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub status: StationStatus,
    pub total_ports: u32,
    #[serde(default)]
    pub available_ports: Option<u32>,
}

/// Per-status tallies shown above the station list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationCounts {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
    pub offline: usize,
    pub ports: u32,
}

impl StationCounts {
    pub fn from_stations(stations: &[StationSummary]) -> Self {
        stations.iter().fold(Self::default(), |mut counts, station| {
            counts.total += 1;
            counts.ports += station.total_ports;
            match station.status {
                StationStatus::Active => counts.active += 1,
                StationStatus::Maintenance => counts.maintenance += 1,
                StationStatus::Offline => counts.offline += 1,
            }
            counts
        })
    }
}
