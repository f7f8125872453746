use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusStatus {
    Active,
    Maintenance,
    Inactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    pub wifi: bool,
    pub vip_seats: bool,
    pub power_outlets: bool,
    pub entertainment_system: bool,
    pub snacks: bool,
    pub blanket: bool,
    pub pillow: bool,
    pub restroom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: i64,
    pub license_plate: String,
    pub bus_model_name: String,
    pub capacity: u32,
    pub driver: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BusStatus>,
    #[serde(flatten)]
    pub amenities: Amenities,
}

impl Bus {
    /// Short description shown next to a trip.
    pub fn summary(&self) -> String {
        format!("{} ({} seats, {})", self.license_plate, self.capacity, self.driver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    OnTime,
    Delayed,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    /// RFC 3339 timestamp.
    pub departure_time: String,
    pub status: TripStatus,
    pub bus_id: i64,
    pub bus_info: String,
    pub intermediate_stops: Vec<String>,
    pub driver: String,
}

impl Trip {
    pub fn assign_bus(&mut self, bus: &Bus) {
        self.bus_id = bus.id;
        self.bus_info = bus.summary();
        self.driver = bus.driver.clone();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
        }
    }
}

/// Console account as managed from the Users screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub national_code: String,
    pub employee_id: String,
    pub email: String,
}
