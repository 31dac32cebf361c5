//! Typed wrappers over the booking API's resources. Every read goes through
//! the raw models so callers only ever see normalized records.

use log::{info, warn};
use serde_json::{json, Value};

use super::client::ApiClient;
use super::envelope::{extract_item, extract_list};
use crate::error::ApiClientError;
use crate::forms::{
    BookingForm, HotelForm, LoginForm, ProfileForm, RegisterForm, ReviewForm, UserUpdateForm,
    YachtForm,
};
use crate::models::{
    AuthSession, Booking, BookingQuote, BookingStatus, Hotel, ListingKind, RawAuthResponse,
    RawBooking, RawHotel, RawReview, RawUser, RawYacht, Review, User, Yacht,
};

impl ApiClient {
    // Hotels

    pub async fn hotels(&self) -> Result<Vec<Hotel>, ApiClientError> {
        let value = self.get("/hotels").await?;
        let raw: Vec<RawHotel> = extract_list(value, "hotels")?;
        Ok(raw.into_iter().map(Hotel::from).collect())
    }

    pub async fn hotel(&self, id: &str) -> Result<Hotel, ApiClientError> {
        let value = self.get(&format!("/hotels/{id}")).await?;
        Ok(Hotel::from(extract_item::<RawHotel>(value, "hotel")?))
    }

    pub async fn create_hotel(&self, form: &HotelForm) -> Result<Hotel, ApiClientError> {
        let value = self.post("/hotels", &hotel_payload(form)).await?;
        Ok(Hotel::from(extract_item::<RawHotel>(value, "hotel")?))
    }

    pub async fn update_hotel(&self, id: &str, form: &HotelForm) -> Result<Hotel, ApiClientError> {
        let value = self.put(&format!("/hotels/{id}"), &hotel_payload(form)).await?;
        Ok(Hotel::from(extract_item::<RawHotel>(value, "hotel")?))
    }

    pub async fn delete_hotel(&self, id: &str) -> Result<(), ApiClientError> {
        self.delete(&format!("/hotels/{id}")).await
    }

    // Yachts

    pub async fn yachts(&self) -> Result<Vec<Yacht>, ApiClientError> {
        let value = self.get("/yachts").await?;
        let raw: Vec<RawYacht> = extract_list(value, "yachts")?;
        Ok(raw.into_iter().map(Yacht::from).collect())
    }

    pub async fn yacht(&self, id: &str) -> Result<Yacht, ApiClientError> {
        let value = self.get(&format!("/yachts/{id}")).await?;
        Ok(Yacht::from(extract_item::<RawYacht>(value, "yacht")?))
    }

    pub async fn create_yacht(&self, form: &YachtForm) -> Result<Yacht, ApiClientError> {
        let value = self.post("/yachts", &yacht_payload(form)).await?;
        Ok(Yacht::from(extract_item::<RawYacht>(value, "yacht")?))
    }

    pub async fn update_yacht(&self, id: &str, form: &YachtForm) -> Result<Yacht, ApiClientError> {
        let value = self.put(&format!("/yachts/{id}"), &yacht_payload(form)).await?;
        Ok(Yacht::from(extract_item::<RawYacht>(value, "yacht")?))
    }

    pub async fn delete_yacht(&self, id: &str) -> Result<(), ApiClientError> {
        self.delete(&format!("/yachts/{id}")).await
    }

    // Bookings

    /// Every booking, admin only on the API side.
    pub async fn bookings(&self) -> Result<Vec<Booking>, ApiClientError> {
        let value = self.get("/bookings").await?;
        let raw: Vec<RawBooking> = extract_list(value, "bookings")?;
        Ok(raw.into_iter().map(Booking::from).collect())
    }

    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiClientError> {
        let value = self.get("/user/bookings").await?;
        let raw: Vec<RawBooking> = extract_list(value, "bookings")?;
        Ok(raw.into_iter().map(Booking::from).collect())
    }

    pub async fn create_booking(
        &self,
        form: &BookingForm,
        quote: &BookingQuote,
    ) -> Result<Booking, ApiClientError> {
        let payload = json!({
            "bookable_type": form.bookable_type.morph_type(),
            "bookable_id": form.bookable_id,
            "check_in": form.check_in,
            "check_out": form.check_out,
            "guests": form.guests,
            "special_requests": form.special_requests,
            "total_price": quote.total,
        });
        let value = self.post("/bookings", &payload).await?;
        let booking = Booking::from(extract_item::<RawBooking>(value, "booking")?);
        info!(
            "Booking {} created for {} {}",
            booking.id, form.bookable_type, form.bookable_id
        );
        Ok(booking)
    }

    pub async fn cancel_booking(&self, id: &str) -> Result<(), ApiClientError> {
        self.post(&format!("/bookings/{id}/cancel"), &json!({}))
            .await
            .map(|_| ())
    }

    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ApiClientError> {
        let value = self
            .patch(&format!("/bookings/{id}/status"), &json!({ "status": status }))
            .await?;
        Ok(Booking::from(extract_item::<RawBooking>(value, "booking")?))
    }

    pub async fn delete_booking(&self, id: &str) -> Result<(), ApiClientError> {
        self.delete(&format!("/bookings/{id}")).await
    }

    // Users

    pub async fn users(&self) -> Result<Vec<User>, ApiClientError> {
        let value = self.get("/users").await?;
        let raw: Vec<RawUser> = extract_list(value, "users")?;
        Ok(raw.into_iter().map(User::from).collect())
    }

    pub async fn update_user(&self, id: &str, form: &UserUpdateForm) -> Result<User, ApiClientError> {
        let value = self.put(&format!("/users/{id}"), form).await?;
        Ok(User::from(extract_item::<RawUser>(value, "user")?))
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiClientError> {
        self.delete(&format!("/users/{id}")).await
    }

    // Reviews

    pub async fn reviews(&self) -> Result<Vec<Review>, ApiClientError> {
        let value = self.get("/reviews").await?;
        let raw: Vec<RawReview> = extract_list(value, "reviews")?;
        Ok(raw.into_iter().map(Review::from).collect())
    }

    pub async fn reviews_for(&self, kind: ListingKind, id: &str) -> Result<Vec<Review>, ApiClientError> {
        let value = self
            .get(&format!("/{}/{id}/reviews", kind.collection()))
            .await?;
        let raw: Vec<RawReview> = extract_list(value, "reviews")?;
        // Nested routes often omit the listing on each review.
        Ok(raw
            .into_iter()
            .map(Review::from)
            .map(|mut review| {
                if review.bookable.kind.is_none() {
                    review.bookable.kind = Some(kind);
                }
                if review.bookable.id.is_none() {
                    review.bookable.id = Some(id.to_string());
                }
                review
            })
            .collect())
    }

    pub async fn create_review(&self, form: &ReviewForm) -> Result<Review, ApiClientError> {
        let payload = json!({
            "bookable_type": form.bookable_type.morph_type(),
            "bookable_id": form.bookable_id,
            "rating": form.rating,
            "comment": form.comment,
        });
        let value = self.post("/reviews", &payload).await?;
        Ok(Review::from(extract_item::<RawReview>(value, "review")?))
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), ApiClientError> {
        self.delete(&format!("/reviews/{id}")).await
    }

    // Auth

    pub async fn login(&self, form: &LoginForm) -> Result<AuthSession, ApiClientError> {
        let value = self.post("/login", form).await?;
        self.start_session(value)
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<AuthSession, ApiClientError> {
        let value = self.post("/register", form).await?;
        self.start_session(value)
    }

    fn start_session(&self, value: Value) -> Result<AuthSession, ApiClientError> {
        let raw: RawAuthResponse = serde_json::from_value(value)?;
        let session = raw.into_session().ok_or_else(|| ApiClientError::Rejected {
            status: 502,
            message: "Booking service did not return a token".to_string(),
            errors: None,
        })?;
        self.token().set(session.token.clone());
        info!("User {} signed in", session.user.email);
        Ok(session)
    }

    /// Always forgets the local token, even if the API call fails.
    pub async fn logout(&self) -> Result<(), ApiClientError> {
        let result = self.post("/logout", &json!({})).await.map(|_| ());
        if let Err(e) = &result {
            warn!("Logout call failed, clearing token anyway: {}", e);
        }
        self.token().clear();
        result
    }

    pub async fn me(&self) -> Result<User, ApiClientError> {
        let value = self.get("/user").await?;
        Ok(User::from(extract_item::<RawUser>(value, "user")?))
    }

    pub async fn update_profile(&self, form: &ProfileForm) -> Result<User, ApiClientError> {
        let value = self.put("/user/profile", form).await?;
        Ok(User::from(extract_item::<RawUser>(value, "user")?))
    }
}

fn hotel_payload(form: &HotelForm) -> Value {
    json!({
        "name": form.name,
        "city": form.city,
        "country": form.country,
        "address": form.address,
        "description": form.description,
        "price_per_night": form.price_per_night,
        "rating": form.rating,
        "stars": form.stars,
        "amenities": form.amenities,
        "image": form.image,
        "is_available": form.available,
        "max_guests": form.max_guests,
    })
}

fn yacht_payload(form: &YachtForm) -> Value {
    json!({
        "name": form.name,
        "location": form.location,
        "type": form.yacht_type,
        "description": form.description,
        "capacity": form.capacity,
        "cabins": form.cabins,
        "length": form.length_m,
        "price_per_day": form.price_per_day,
        "rating": form.rating,
        "amenities": form.amenities,
        "image": form.image,
        "is_available": form.available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::TokenStore;

    #[test]
    fn hotel_payload_round_trips_through_the_raw_model() {
        let form: HotelForm = serde_json::from_value(json!({
            "name": "Hotel Lapad",
            "city": "Dubrovnik",
            "price_per_night": 180.0,
            "amenities": ["WiFi", "Spa"]
        }))
        .unwrap();
        let raw: RawHotel = serde_json::from_value(hotel_payload(&form)).unwrap();
        let hotel = Hotel::from(raw);
        assert_eq!(hotel.name, "Hotel Lapad");
        assert_eq!(hotel.price_per_night, 180.0);
        assert!(hotel.available);
        assert_eq!(hotel.amenities, vec!["WiFi", "Spa"]);
    }

    #[test]
    fn session_without_token_is_rejected_and_store_untouched() {
        let client = ApiClient::new(reqwest::Client::new(), "http://localhost", TokenStore::default());
        let err = client.start_session(json!({ "user": { "id": 1 } })).unwrap_err();
        assert!(matches!(err, ApiClientError::Rejected { status: 502, .. }));
        assert!(!client.token().is_set());

        let session = client
            .start_session(json!({ "token": "t1", "user": { "id": 1, "email": "a@b.hr" } }))
            .unwrap();
        assert_eq!(session.user.email, "a@b.hr");
        assert_eq!(client.token().get().as_deref(), Some("t1"));
    }

    #[actix_web::test]
    async fn logout_clears_the_token_even_when_the_call_fails() {
        let client = ApiClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            TokenStore::new(Some("t".into())),
        );
        assert!(client.logout().await.is_err());
        assert!(!client.token().is_set());
    }
}
