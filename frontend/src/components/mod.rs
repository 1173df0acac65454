pub mod booking_controls;
pub mod calendar;
pub mod day_panel;
pub mod header;
pub mod reservation_modal;
pub mod toast;
