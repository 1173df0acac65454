use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AvailabilityPayload, BookingError, ReservationRequest, ReservationResponse,
    ServerTimeResponse,
};

/// Shown when a failed reservation response carries no message
pub const RESERVATION_FAILED_TEXT: &str = "Error al crear la reserva.";

/// API client for the booking backend.
///
/// Every call normalizes failures into [`BookingError`]; none retries.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client talking to the origin that served the page
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn availability_url(&self, business_id: &str, calendar_id: u32) -> String {
        let business: String = js_sys::encode_uri_component(business_id).into();
        format!("{}/disponibilidad/{}/{}", self.base_url, business, calendar_id)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Availability of one calendar of a business
    pub async fn get_availability(
        &self,
        business_id: &str,
        calendar_id: u32,
    ) -> Result<AvailabilityPayload, BookingError> {
        let url = self.availability_url(business_id, calendar_id);
        let response = Request::get(&url).send().await.map_err(network_error)?;
        decode(response, None).await
    }

    /// Create a reservation
    pub async fn reserve(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationResponse, BookingError> {
        let url = self.url("/reservar");
        let response = Request::post(&url)
            .json(request)
            .map_err(|e| BookingError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;
        decode(response, Some(RESERVATION_FAILED_TEXT)).await
    }

    /// Server clock, preformatted by the backend
    pub async fn get_server_time(&self) -> Result<ServerTimeResponse, BookingError> {
        let url = self.url("/hora-servidor");
        let response = Request::get(&url).send().await.map_err(network_error)?;
        decode(response, None).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn network_error(e: gloo::net::Error) -> BookingError {
    BookingError::Network(e.to_string())
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    fallback: Option<&str>,
) -> Result<T, BookingError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| BookingError::InvalidResponse(e.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(BookingError::from_response_or(status, &body, fallback))
    }
}
