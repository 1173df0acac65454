//! Calendar grid builder.
//!
//! Produces the months shown by the widget, each day already classified
//! against the availability payload. The UI only renders what is here.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::availability::{
    date_key, is_bookable, sunday_based_to_monday_based, AvailabilityPayload, DaySlot,
};

pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Column headers, week starting Monday
pub const WEEKDAY_HEADERS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

/// Bookability of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    /// Before today
    Past,
    /// After the calendar's maximum reservation date
    BeyondMaxDate,
    /// At least one slot can be reserved
    Available,
    /// Every slot is reserved or past, or the weekday has no slots
    NoSlots,
}

impl DayStatus {
    /// Whether clicking the day opens the detail panel
    pub fn is_selectable(self) -> bool {
        matches!(self, DayStatus::Available | DayStatus::NoSlots)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DayStatus::Past => "dia-pasado",
            DayStatus::BeyondMaxDate => "dia-no-disponible",
            DayStatus::Available => "dia-disponible",
            DayStatus::NoSlots => "dia-sin-disponibilidad",
        }
    }

    pub fn tooltip(self) -> Option<&'static str> {
        match self {
            DayStatus::Past => None,
            DayStatus::BeyondMaxDate => Some("No se permiten reservas después de esta fecha"),
            DayStatus::Available => Some("Día disponible"),
            DayStatus::NoSlots => Some("No hay horarios disponibles"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`
    pub date_key: String,
    pub status: DayStatus,
    pub is_today: bool,
    /// Empty for past and beyond-max days
    pub slots: Vec<DaySlot>,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// e.g. "Junio 2024"
    pub caption: String,
    /// Blank cells before the 1st in a Monday-first week
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of seven Monday-first cells; `None` is a blank cell
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut cells: Vec<Option<&DayCell>> = Vec::with_capacity(42);
        cells.extend((0..self.leading_blanks).map(|_| None));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }
}

/// Build `horizon_months` months starting at the month of `now`.
pub fn build_grid(
    payload: &AvailabilityPayload,
    now: NaiveDateTime,
    horizon_months: u32,
) -> Vec<MonthGrid> {
    let today = now.date();
    let max_date = payload.max_reservation_date();
    let Some(first_of_current) = today.with_day(1) else {
        return Vec::new();
    };

    tracing::debug!(%today, ?max_date, horizon_months, "building calendar grid");

    (0..horizon_months)
        .filter_map(|i| first_of_current.checked_add_months(Months::new(i)))
        .map(|first| build_month(payload, first, today, now, max_date))
        .collect()
}

fn build_month(
    payload: &AvailabilityPayload,
    first: NaiveDate,
    today: NaiveDate,
    now: NaiveDateTime,
    max_date: Option<NaiveDate>,
) -> MonthGrid {
    let year = first.year();
    let month = first.month();

    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| classify_day(payload, date, today, now, max_date))
        .collect();

    MonthGrid {
        year,
        month,
        caption: format!("{} {}", month_name_es(month).unwrap_or_default(), year),
        leading_blanks: leading_blank_cells(first),
        days,
    }
}

/// Status and slots of a single day
pub fn classify_day(
    payload: &AvailabilityPayload,
    date: NaiveDate,
    today: NaiveDate,
    now: NaiveDateTime,
    max_date: Option<NaiveDate>,
) -> DayCell {
    let is_today = date == today;
    let key = date_key(date);

    if date < today {
        return DayCell { date, date_key: key, status: DayStatus::Past, is_today, slots: Vec::new() };
    }

    if max_date.is_some_and(|max| date > max) {
        return DayCell {
            date,
            date_key: key,
            status: DayStatus::BeyondMaxDate,
            is_today,
            slots: Vec::new(),
        };
    }

    let slots = payload.slots_for(date, now);
    let status = if is_bookable(&slots) {
        DayStatus::Available
    } else {
        DayStatus::NoSlots
    };

    DayCell { date, date_key: key, status, is_today, slots }
}

/// Blank cells before `first_of_month` in a Monday-first layout
pub fn leading_blank_cells(first_of_month: NaiveDate) -> u32 {
    u32::from(sunday_based_to_monday_based(
        first_of_month.weekday().num_days_from_sunday(),
    ))
}

/// Length of `month` in `year`; `None` when `month` is not 1..=12
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    next.pred_opt().map(|last| last.day())
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Capitalized Spanish month name; `None` when `month` is not 1..=12
pub fn month_name_es(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto",
        "Septiembre", "Octubre", "Noviembre", "Diciembre",
    ];
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    NAMES.get(index).copied()
}
