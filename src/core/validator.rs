use chrono::DateTime;
use serde::Serialize;

use crate::models::{Bus, StaffUser, Trip};

pub const MAX_BUS_CAPACITY: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn require(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "This field is required."));
    }
}

/// Field checks for the records edited from the CRUD screens. An empty
/// result means the record may be saved.
pub struct RecordValidator;

impl RecordValidator {
    pub fn validate_bus(bus: &Bus) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "licensePlate", &bus.license_plate);
        require(&mut errors, "busModelName", &bus.bus_model_name);
        require(&mut errors, "driver", &bus.driver);
        if bus.capacity == 0 || bus.capacity > MAX_BUS_CAPACITY {
            errors.push(ValidationError::new(
                "capacity",
                &format!("Capacity must be between 1 and {}.", MAX_BUS_CAPACITY),
            ));
        }
        errors
    }

    pub fn validate_trip(trip: &Trip) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "origin", &trip.origin);
        require(&mut errors, "destination", &trip.destination);

        let origin = trip.origin.trim();
        let destination = trip.destination.trim();
        if !origin.is_empty() && origin == destination {
            errors.push(ValidationError::new(
                "destination",
                "Destination must differ from the origin.",
            ));
        }

        if DateTime::parse_from_rfc3339(&trip.departure_time).is_err() {
            errors.push(ValidationError::new(
                "departureTime",
                "Departure time must be an RFC 3339 timestamp.",
            ));
        }

        if trip.bus_id <= 0 {
            errors.push(ValidationError::new("busId", "A bus must be assigned."));
        }

        for (index, stop) in trip.intermediate_stops.iter().enumerate() {
            let stop = stop.trim();
            let field = format!("intermediateStops[{}]", index);
            if stop.is_empty() {
                errors.push(ValidationError::new(&field, "Stop name cannot be blank."));
            } else if stop == origin || stop == destination {
                errors.push(ValidationError::new(
                    &field,
                    "A stop cannot repeat the origin or destination.",
                ));
            }
        }
        errors
    }

    pub fn validate_user(user: &StaffUser) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "username", &user.username);
        if user.username.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new(
                "username",
                "Username cannot contain spaces.",
            ));
        }
        require(&mut errors, "firstName", &user.first_name);
        require(&mut errors, "lastName", &user.last_name);
        require(&mut errors, "employeeId", &user.employee_id);

        if user.national_code.len() != 10 || !user.national_code.bytes().all(|b| b.is_ascii_digit()) {
            errors.push(ValidationError::new(
                "nationalCode",
                "National code must be exactly 10 digits.",
            ));
        }

        let valid_email = match user.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid_email {
            errors.push(ValidationError::new("email", "Email address is not valid."));
        }
        errors
    }
}
