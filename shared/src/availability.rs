//! Availability model: the payload returned by `/disponibilidad` and the
//! per-day slot classification derived from it.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Wire format of slot times
pub const HORA_FORMAT: &str = "%H:%M";
/// Wire format of date keys
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A single `{hora: "HH:MM"}` entry, used both for the weekday templates
/// and for reserved slots. Extra fields on reservations (`usuario`,
/// `timestamp`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub hora: String,
}

impl TimeBlock {
    pub fn new(hora: impl Into<String>) -> Self {
        Self { hora: hora.into() }
    }
}

/// Availability of one calendar of a business
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityPayload {
    /// Last bookable date (`YYYY-MM-DD`); anything unparseable means no limit
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha_maxima_reserva: Option<String>,
    /// Already reserved slots keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub dias: BTreeMap<String, Vec<TimeBlock>>,
    /// Recurring slot template keyed by weekday, 0 = Monday .. 6 = Sunday
    #[serde(default)]
    pub bloques_por_dia_semana: BTreeMap<u8, Vec<TimeBlock>>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

impl AvailabilityPayload {
    /// Slot template for a Monday-based weekday index
    pub fn template_for(&self, weekday_index: u8) -> &[TimeBlock] {
        self.bloques_por_dia_semana
            .get(&weekday_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reserved slots for a `YYYY-MM-DD` key
    pub fn reserved_on(&self, date_key: &str) -> &[TimeBlock] {
        self.dias.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parsed maximum reservation date. A malformed value degrades to
    /// `None` instead of failing the render.
    pub fn max_reservation_date(&self) -> Option<NaiveDate> {
        let raw = self.fecha_maxima_reserva.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, DATE_KEY_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(value = raw, error = %e, "ignoring unparseable fecha_maxima_reserva");
                None
            }
        }
    }

    /// Slots for `date` classified against `now`
    pub fn slots_for(&self, date: NaiveDate, now: NaiveDateTime) -> Vec<DaySlot> {
        derive_day_slots(
            self.template_for(monday_index(date)),
            self.reserved_on(&date_key(date)),
            date,
            now,
        )
    }
}

/// One bookable time on one day, as shown in the day panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    pub hora: String,
    pub is_reserved: bool,
    pub is_past: bool,
}

impl DaySlot {
    pub fn is_bookable(&self) -> bool {
        !self.is_reserved && !self.is_past
    }
}

/// Classify every template slot of `date`.
///
/// Output has one entry per template entry, sorted by `hora` (the format
/// is fixed width so string order is time order). A slot is past only
/// when `date` is today and its time is strictly before `now`.
pub fn derive_day_slots(
    weekday_template: &[TimeBlock],
    reserved_for_date: &[TimeBlock],
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<DaySlot> {
    let is_today = date == now.date();

    let mut slots: Vec<DaySlot> = weekday_template
        .iter()
        .map(|block| {
            let is_reserved = reserved_for_date.iter().any(|r| r.hora == block.hora);
            let is_past = is_today
                && parse_hora(&block.hora)
                    .map(|t| t < now.time())
                    .unwrap_or(false);
            DaySlot {
                hora: block.hora.clone(),
                is_reserved,
                is_past,
            }
        })
        .collect();

    slots.sort_by(|a, b| a.hora.cmp(&b.hora));
    slots
}

/// A day is bookable when at least one slot is neither reserved nor past
pub fn is_bookable(slots: &[DaySlot]) -> bool {
    slots.iter().any(DaySlot::is_bookable)
}

pub fn parse_hora(hora: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(hora.trim(), HORA_FORMAT).ok()
}

/// `YYYY-MM-DD`, zero padded
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).ok()
}

/// Convert a Sunday-based weekday number (0 = Sunday .. 6 = Saturday, the
/// numbering of JS `Date.getDay()`) into the Monday-based index used by
/// the slot templates and the grid columns (0 = Monday .. 6 = Sunday).
pub fn sunday_based_to_monday_based(sunday_based: u32) -> u8 {
    ((sunday_based % 7 + 6) % 7) as u8
}

/// Monday-based weekday index of `date`
pub fn monday_index(date: NaiveDate) -> u8 {
    sunday_based_to_monday_based(date.weekday().num_days_from_sunday())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        d.and_hms_opt(h, m, 0).unwrap()
    }

    fn blocks(horas: &[&str]) -> Vec<TimeBlock> {
        horas.iter().map(|h| TimeBlock::new(*h)).collect()
    }

    #[test]
    fn test_weekday_conversion_boundaries() {
        // Sunday is the last column, Monday the first
        assert_eq!(sunday_based_to_monday_based(0), 6);
        assert_eq!(sunday_based_to_monday_based(1), 0);
        assert_eq!(sunday_based_to_monday_based(6), 5);

        // 2024-06-09 was a Sunday, 2024-06-10 a Monday
        assert_eq!(monday_index(date(2024, 6, 9)), 6);
        assert_eq!(monday_index(date(2024, 6, 10)), 0);
        assert_eq!(monday_index(date(2024, 6, 15)), 5);
    }

    #[test]
    fn test_reference_example() {
        let payload: AvailabilityPayload = serde_json::from_str(
            r#"{
                "fecha_maxima_reserva": null,
                "dias": {"2024-06-10": [{"hora": "10:00"}]},
                "bloques_por_dia_semana": {"0": [{"hora": "09:00"}, {"hora": "10:00"}]}
            }"#,
        )
        .unwrap();

        let today = date(2024, 6, 10);
        let slots = payload.slots_for(today, at(today, 9, 30));

        assert_eq!(
            slots,
            vec![
                DaySlot { hora: "09:00".to_string(), is_reserved: false, is_past: true },
                DaySlot { hora: "10:00".to_string(), is_reserved: true, is_past: false },
            ]
        );
        assert!(!is_bookable(&slots));
    }

    #[test]
    fn test_slots_sorted_and_reserved_membership() {
        let template = blocks(&["14:00", "09:30", "11:00", "09:00"]);
        let reserved = blocks(&["11:00", "09:00", "23:00"]);
        let day = date(2024, 7, 1);
        let now = at(date(2024, 6, 1), 12, 0);

        let slots = derive_day_slots(&template, &reserved, day, now);

        assert_eq!(slots.len(), template.len());
        let horas: Vec<&str> = slots.iter().map(|s| s.hora.as_str()).collect();
        assert_eq!(horas, vec!["09:00", "09:30", "11:00", "14:00"]);
        for slot in &slots {
            let expected = reserved.iter().any(|r| r.hora == slot.hora);
            assert_eq!(slot.is_reserved, expected, "slot {}", slot.hora);
            // Not today, so nothing is past
            assert!(!slot.is_past);
        }
        assert!(is_bookable(&slots));
    }

    #[test]
    fn test_past_only_applies_to_today() {
        let today = date(2024, 6, 10);
        let now = at(today, 15, 0);
        let template = blocks(&["09:00", "15:00", "16:00"]);

        let slots = derive_day_slots(&template, &[], today, now);
        // 15:00 is not strictly before 15:00
        assert_eq!(
            slots.iter().map(|s| s.is_past).collect::<Vec<_>>(),
            vec![true, false, false]
        );

        let tomorrow = date(2024, 6, 11);
        let slots = derive_day_slots(&template, &[], tomorrow, now);
        assert!(slots.iter().all(|s| !s.is_past));
    }

    #[test]
    fn test_unparseable_hora_is_never_past() {
        let today = date(2024, 6, 10);
        let slots = derive_day_slots(&blocks(&["mañana"]), &[], today, at(today, 23, 59));
        assert!(!slots[0].is_past);
    }

    #[test]
    fn test_empty_template_is_not_bookable() {
        let day = date(2024, 6, 12);
        let slots = derive_day_slots(&[], &blocks(&["10:00"]), day, at(day, 0, 0));
        assert!(slots.is_empty());
        assert!(!is_bookable(&slots));
    }

    #[test]
    fn test_max_reservation_date_parsing() {
        let mut payload = AvailabilityPayload::default();
        assert_eq!(payload.max_reservation_date(), None);

        payload.fecha_maxima_reserva = Some("2024-09-30".to_string());
        assert_eq!(payload.max_reservation_date(), Some(date(2024, 9, 30)));

        payload.fecha_maxima_reserva = Some("30/09/2024".to_string());
        assert_eq!(payload.max_reservation_date(), None);

        payload.fecha_maxima_reserva = Some(String::new());
        assert_eq!(payload.max_reservation_date(), None);
    }

    #[test]
    fn test_payload_tolerates_missing_and_odd_fields() {
        let payload: AvailabilityPayload =
            serde_json::from_str(r#"{"fecha_maxima_reserva": 20240930}"#).unwrap();
        assert_eq!(payload.fecha_maxima_reserva, None);
        assert!(payload.dias.is_empty());
        assert!(payload.template_for(3).is_empty());

        let payload: AvailabilityPayload = serde_json::from_str(
            r#"{"dias": {"2024-06-10": [{"fecha": "2024-06-10", "hora": "10:00", "usuario": "Ana", "timestamp": "x"}]}}"#,
        )
        .unwrap();
        assert_eq!(payload.reserved_on("2024-06-10"), &[TimeBlock::new("10:00")]);
        assert!(payload.reserved_on("2024-06-11").is_empty());
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(parse_date_key("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date_key("2024-1-5x"), None);
    }
}
