use chrono::{Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use js_sys::{Array, Intl, Object, Reflect};
use shared::time::{format_clock, wall_clock_in};

/// Current browser wall-clock time. "Today" and past slots are judged
/// against this, like the visitor sees it.
pub fn browser_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// IANA zone the browser reports, if any
pub fn browser_timezone() -> Option<String> {
    let options = Intl::DateTimeFormat::new(&Array::new(), &Object::new()).resolved_options();
    Reflect::get(&options, &"timeZone".into())
        .ok()
        .and_then(|zone| zone.as_string())
        .filter(|zone| !zone.is_empty())
}

/// Browser clock in its own zone, `dd/mm/yyyy, HH:MM:SS`
pub fn browser_clock_text() -> String {
    format_clock(browser_now())
}

/// Browser clock converted to `zone`
pub fn clock_in_zone(zone: Tz) -> String {
    format_clock(wall_clock_in(Utc::now(), zone))
}
