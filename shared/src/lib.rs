//! Platform-independent core of the booking calendar widget: wire types,
//! availability classification, the month grid and the state machines
//! driving the day panel, the reservation prompt and the page session.

pub mod availability;
pub mod calendar;
pub mod error;
pub mod panel;
pub mod reservation;
pub mod session;
pub mod time;

pub use availability::{
    date_key, derive_day_slots, is_bookable, monday_index, sunday_based_to_monday_based,
    AvailabilityPayload, DaySlot, TimeBlock,
};
pub use calendar::{build_grid, DayCell, DayStatus, MonthGrid, DEFAULT_HORIZON_MONTHS};
pub use error::{BookingError, ErrorBody};
pub use panel::{should_dismiss, DayDetail, DayPanel, PanelResources, SlotAction};
pub use reservation::{
    FlowEffect, ReservationFlow, ReservationRequest, ReservationResponse,
};
pub use session::{business_id_from_path, resolve_initial_calendar, BookingSession, LoadTarget};
pub use time::ServerTimeResponse;
