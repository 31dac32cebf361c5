//! Form payloads posted by the browser and their validation rules.
//!
//! Field rules live on the `validator` derives. Checks that need more than one
//! field, or today's date, are layered on top and land in the same
//! [`FormErrors`] map so the browser gets one error per field either way.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{BookingStatus, ListingKind, Role};

/// Field name to messages, ready to be highlighted next to the inputs.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", error.code));
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

/// Runs the derived rules and converts the outcome.
pub fn validate<T: Validate>(form: &T) -> Result<(), FormErrors> {
    form.validate().map_err(FormErrors::from)
}

fn merge(base: Result<(), FormErrors>, extra: FormErrors) -> Result<(), FormErrors> {
    let mut errors = base.err().unwrap_or_default();
    for (field, messages) in extra.0 {
        errors.0.entry(field).or_default().extend(messages);
    }
    errors.into_result()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, max = 20, message = "Phone must be 6 to 20 characters"))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingForm {
    pub bookable_type: ListingKind,
    #[validate(length(min = 1, message = "Choose what to book"))]
    pub bookable_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 50, message = "Guests must be between 1 and 50"))]
    pub guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Special requests are limited to 1000 characters"))]
    pub special_requests: Option<String>,
}

impl BookingForm {
    /// Field rules plus the date-range checks, relative to `today`.
    pub fn check(&self, today: NaiveDate) -> Result<(), FormErrors> {
        let mut dates = FormErrors::default();
        if self.check_in < today {
            dates.add("check_in", "Check-in cannot be in the past");
        }
        if self.check_out <= self.check_in {
            dates.add("check_out", "Check-out must be after check-in");
        }
        merge(validate(self), dates)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewForm {
    pub bookable_type: ListingKind,
    #[validate(length(min = 1, message = "Choose what you are reviewing"))]
    pub bookable_id: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 10, max = 2000, message = "Comment must be 10 to 2000 characters"))]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HotelForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1.0, message = "Price per night must be positive"))]
    pub price_per_night: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f32,
    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5"))]
    pub stars: Option<u8>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    #[validate(range(min = 1, message = "Max guests must be at least 1"))]
    pub max_guests: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct YachtForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(default)]
    pub yacht_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: u32,
    #[serde(default)]
    pub cabins: Option<u32>,
    #[serde(default)]
    #[validate(range(min = 1.0, message = "Length must be positive"))]
    pub length_m: Option<f64>,
    #[validate(range(min = 1.0, message = "Price per day must be positive"))]
    pub price_per_day: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdateForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusForm {
    pub status: BookingStatus,
}
