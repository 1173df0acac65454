use serde::Deserialize;

/// Every failure the booking widget can surface to a visitor.
///
/// None of these are fatal: callers show `user_message()` in a toast and
/// leave the page interactive.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    /// Input rejected locally, before any request was made
    #[error("{0}")]
    Validation(String),
    /// 404 from the availability endpoint
    #[error("{0}")]
    NotFound(String),
    /// Any other non-success status
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request never produced a response
    #[error("Error de red: {0}")]
    Network(String),
    /// A success status whose body could not be decoded
    #[error("Respuesta inválida del servidor: {0}")]
    InvalidResponse(String),
}

/// Error body shape returned by the backend on failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message in the body, `detail` first.
    pub fn message(&self) -> Option<String> {
        non_blank(self.detail.as_deref())
            .or_else(|| non_blank(self.mensaje.as_deref()))
            .map(str::to_string)
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|m| !m.is_empty())
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Normalize a non-success HTTP response into a single error value.
    ///
    /// The body is optional and may be anything; only a JSON object with
    /// `detail` or `mensaje` contributes a message.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::from_response_or(status, body, None)
    }

    /// Like [`from_response`](Self::from_response), with `fallback`
    /// replacing the generic status text when the body carries no message.
    pub fn from_response_or(status: u16, body: &str, fallback: Option<&str>) -> Self {
        let structured = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message());

        match status {
            404 => Self::NotFound(
                structured.unwrap_or_else(|| "Calendario no encontrado.".to_string()),
            ),
            _ => Self::Http {
                status,
                message: structured
                    .or_else(|| fallback.map(str::to_string))
                    .unwrap_or_else(|| format!("Error HTTP! estado: {}", status)),
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text shown to the visitor
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
