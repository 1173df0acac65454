pub mod use_availability;
pub mod use_clocks;
pub mod use_day_panel;
pub mod use_periodic_refresh;
pub mod use_reservation;
pub mod use_toast;
