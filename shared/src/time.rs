use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Zone the backend keeps its reservations in
pub const DEFAULT_SERVER_TIMEZONE: Tz = chrono_tz::America::Montevideo;

/// Shown when the server clock cannot be fetched
pub const CLOCK_ERROR_TEXT: &str = "Error al cargar";

/// Body of `GET /hora-servidor`; `hora` is preformatted by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTimeResponse {
    pub hora: String,
}

/// Calendar date of `now`, the reference for past/today checks
pub fn today(now: NaiveDateTime) -> NaiveDate {
    now.date()
}

/// Wall-clock time of `instant` in `zone`
pub fn wall_clock_in<Z: TimeZone>(instant: DateTime<Z>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

/// `dd/mm/yyyy, HH:MM:SS`, 24 hour clock
pub fn format_clock(time: NaiveDateTime) -> String {
    time.format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub fn server_clock_label(zone_name: &str, server_time: Option<&str>) -> String {
    format!(
        "🖥️ Hora servidor ({}): {}",
        zone_name,
        server_time.unwrap_or(CLOCK_ERROR_TEXT)
    )
}

pub fn browser_clock_label(zone_name: Option<&str>, formatted: &str) -> String {
    format!(
        "📍 Hora navegador ({}): {}",
        zone_name.filter(|z| !z.is_empty()).unwrap_or("Zona Desconocida"),
        formatted
    )
}
