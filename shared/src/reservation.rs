//! Reservation confirmation flow.

use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Body of `POST /reservar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(rename = "idNegocio")]
    pub business_id: String,
    #[serde(rename = "idCalendario")]
    pub calendar_id: u32,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,
    /// `HH:MM`
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "usuario")]
    pub user_name: String,
}

/// Success body of `POST /reservar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub mensaje: String,
}

/// Follow-up work requested by the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    /// Reload the current business/calendar availability
    ReloadAvailability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub date: String,
    pub time: String,
    pub user_name: String,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Confirmation prompt state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReservationFlow {
    #[default]
    Hidden,
    Confirming(Confirmation),
}

impl ReservationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Confirming(_))
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match self {
            Self::Confirming(c) => Some(c),
            Self::Hidden => None,
        }
    }

    /// Whether a submitted request is still waiting for its outcome
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Confirming(c) if c.submitting)
    }

    /// Open the prompt for `date`/`time` with an empty name. Ignored while
    /// a request is in flight, so its outcome still reaches [`complete`].
    ///
    /// [`complete`]: Self::complete
    pub fn prepare(&mut self, date: impl Into<String>, time: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        *self = Self::Confirming(Confirmation {
            date: date.into(),
            time: time.into(),
            user_name: String::new(),
            submitting: false,
            error: None,
        });
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        if let Self::Confirming(c) = self {
            c.user_name = name.into();
        }
    }

    /// Validate the prompt and build the request to send. An empty name
    /// is rejected here, so no request is ever built for it.
    pub fn submit(
        &mut self,
        business_id: &str,
        calendar_id: u32,
    ) -> Result<ReservationRequest, BookingError> {
        let Self::Confirming(c) = self else {
            return Err(BookingError::validation("No hay ninguna reserva pendiente."));
        };

        if c.submitting {
            return Err(BookingError::validation("La reserva ya se está enviando."));
        }

        let user_name = c.user_name.trim();
        if user_name.is_empty() {
            let err = BookingError::validation("Por favor, introduce tu nombre.");
            c.error = Some(err.user_message());
            return Err(err);
        }

        c.submitting = true;
        c.error = None;

        Ok(ReservationRequest {
            business_id: business_id.to_string(),
            calendar_id,
            date: c.date.clone(),
            time: c.time.clone(),
            user_name: user_name.to_string(),
        })
    }

    /// Record the outcome of a submitted request. Success hides the prompt
    /// and asks for one availability reload; failure keeps the prompt and
    /// what the visitor typed.
    pub fn complete(
        &mut self,
        result: &Result<ReservationResponse, BookingError>,
    ) -> Option<FlowEffect> {
        let Self::Confirming(c) = self else {
            return None;
        };
        if !c.submitting {
            return None;
        }

        match result {
            Ok(_) => {
                *self = Self::Hidden;
                Some(FlowEffect::ReloadAvailability)
            }
            Err(e) => {
                c.submitting = false;
                c.error = Some(e.user_message());
                None
            }
        }
    }

    /// Close the prompt without submitting. Ignored while a request is in
    /// flight.
    pub fn dismiss(&mut self) {
        if !self.is_submitting() {
            *self = Self::Hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> Result<ReservationResponse, BookingError> {
        Ok(ReservationResponse { mensaje: "Reserva creada exitosamente!".to_string() })
    }

    #[test]
    fn test_prepare_starts_with_empty_name() {
        let mut flow = ReservationFlow::new();
        flow.prepare("2024-06-10", "09:00");
        flow.set_user_name("Ana");
        flow.prepare("2024-06-11", "10:00");

        let c = flow.confirmation().unwrap();
        assert_eq!(c.date, "2024-06-11");
        assert_eq!(c.time, "10:00");
        assert!(c.user_name.is_empty());
        assert!(!c.submitting);
    }

    #[test]
    fn test_empty_name_is_rejected_locally() {
        let mut flow = ReservationFlow::new();
        flow.prepare("2024-06-10", "09:00");
        flow.set_user_name("   ");

        let err = flow.submit("peluqueria", 1).unwrap_err();
        assert!(err.is_validation());

        let c = flow.confirmation().unwrap();
        assert!(!c.submitting);
        assert_eq!(c.error.as_deref(), Some("Por favor, introduce tu nombre."));
    }

    #[test]
    fn test_submit_builds_request() {
        let mut flow = ReservationFlow::new();
        flow.prepare("2024-06-10", "09:00");
        flow.set_user_name(" Ana ");

        let request = flow.submit("peluqueria", 2).unwrap();
        assert_eq!(
            request,
            ReservationRequest {
                business_id: "peluqueria".to_string(),
                calendar_id: 2,
                date: "2024-06-10".to_string(),
                time: "09:00".to_string(),
                user_name: "Ana".to_string(),
            }
        );
        assert!(flow.confirmation().unwrap().submitting);

        // A second submit while in flight is refused
        assert!(flow.submit("peluqueria", 2).is_err());
    }

    #[test]
    fn test_success_requests_exactly_one_reload() {
        let mut flow = ReservationFlow::new();
        flow.prepare("2024-06-10", "09:00");
        flow.set_user_name("Ana");
        flow.submit("peluqueria", 1).unwrap();

        assert_eq!(flow.complete(&ok()), Some(FlowEffect::ReloadAvailability));
        assert!(!flow.is_open());
        // A repeated completion does not reload again
        assert_eq!(flow.complete(&ok()), None);
    }

    #[test]
    fn test_failure_keeps_prompt_and_name() {
        let mut flow = ReservationFlow::new();
        flow.prepare("2024-06-10", "09:00");
        flow.set_user_name("Ana");
        flow.submit("peluqueria", 1).unwrap();

        let failed = Err(BookingError::from_response(
            400,
            r#"{"detail": "El horario 09:00 del día 2024-06-10 ya está reservado para el calendario 1."}"#,
        ));
        assert_eq!(flow.complete(&failed), None);

        let c = flow.confirmation().unwrap();
        assert_eq!(c.user_name, "Ana");
        assert!(!c.submitting);
        assert!(c.error.as_deref().unwrap().contains("ya está reservado"));

        // The visitor can retry from the same prompt
        assert!(flow.submit("peluqueria", 1).is_ok());
    }

    #[test]
    fn test_submit_without_prompt_fails() {
        let mut flow = ReservationFlow::new();
        assert!(flow.submit("peluqueria", 1).unwrap_err().is_validation());
        flow.prepare("2024-06-10", "09:00");
        flow.dismiss();
        assert!(!flow.is_open());
        assert_eq!(flow.complete(&ok()), None);
    }

    #[test]
    fn test_in_flight_submission_survives_dismiss_and_prepare() {
        let mut flow = ReservationFlow::new();
        flow.prepare("2024-06-10", "09:00");
        flow.set_user_name("Ana");
        flow.submit("peluqueria", 1).unwrap();
        assert!(flow.is_submitting());

        flow.dismiss();
        flow.prepare("2024-06-11", "11:00");
        let c = flow.confirmation().unwrap();
        assert_eq!(c.date, "2024-06-10");
        assert!(c.submitting);

        assert_eq!(flow.complete(&ok()), Some(FlowEffect::ReloadAvailability));
        assert!(!flow.is_open());

        // Back to normal once the outcome is in
        flow.prepare("2024-06-11", "11:00");
        assert!(flow.is_open());
        flow.dismiss();
        assert!(!flow.is_open());
    }

    #[test]
    fn test_request_wire_format() {
        let request = ReservationRequest {
            business_id: "peluqueria".to_string(),
            calendar_id: 1,
            date: "2024-06-10".to_string(),
            time: "09:00".to_string(),
            user_name: "Ana".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "idNegocio": "peluqueria",
                "idCalendario": 1,
                "fecha": "2024-06-10",
                "hora": "09:00",
                "usuario": "Ana"
            })
        );
    }
}
