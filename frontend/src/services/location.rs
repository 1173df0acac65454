//! Page URL access: path, query parameters and in-place history updates.

use wasm_bindgen::JsValue;
use web_sys::{Url, UrlSearchParams};

/// Query parameter holding the selected calendar
pub const CALENDAR_PARAM: &str = "calendario";

pub fn pathname() -> String {
    gloo::utils::window()
        .location()
        .pathname()
        .unwrap_or_default()
}

pub fn query_param(name: &str) -> Option<String> {
    let search = gloo::utils::window().location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

/// `href` with `name` set to `value`, other parameters untouched
pub fn with_query_param(href: &str, name: &str, value: &str) -> Result<String, JsValue> {
    let url = Url::new(href)?;
    url.search_params().set(name, value);
    Ok(url.href())
}

/// Rewrite `name` in the address bar without reloading or adding a
/// history entry.
pub fn replace_query_param(name: &str, value: &str) -> Result<(), JsValue> {
    let window = gloo::utils::window();
    let href = window.location().href()?;
    let updated = with_query_param(&href, name, value)?;
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&updated))
}
