use chrono_tz::Tz;
use shared::time::{browser_clock_label, server_clock_label};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderClocks {
    pub server: String,
    pub browser: String,
}

/// Header clocks. The server clock asks `/hora-servidor` on every tick;
/// the browser clock is local. Each runs on its own interval.
#[hook]
pub fn use_clocks(api_client: &ApiClient, server_timezone: Tz, interval_ms: u32) -> HeaderClocks {
    let zone_name = server_timezone.name();
    let server = use_state(|| server_clock_label(zone_name, None));
    let browser = use_state(String::new);

    let refresh_server = {
        let api_client = api_client.clone();
        let server = server.clone();
        use_callback(zone_name, move |_: (), zone_name| {
            let api_client = api_client.clone();
            let server = server.clone();
            let zone_name = *zone_name;
            spawn_local(async move {
                match api_client.get_server_time().await {
                    Ok(time) => server.set(server_clock_label(zone_name, Some(&time.hora))),
                    Err(e) => {
                        Logger::debug_with_component("clocks", &format!("Server time unavailable: {}", e));
                        server.set(server_clock_label(zone_name, None));
                    }
                }
            });
        })
    };

    let refresh_browser = {
        let browser = browser.clone();
        use_callback((), move |_: (), _| {
            let zone = date_utils::browser_timezone();
            browser.set(browser_clock_label(
                zone.as_deref(),
                &date_utils::browser_clock_text(),
            ));
        })
    };

    let config = PeriodicRefreshConfig {
        interval_ms,
        run_immediately: true,
    };
    use_periodic_refresh(config.clone(), refresh_server);
    use_periodic_refresh(config, refresh_browser);

    HeaderClocks {
        server: (*server).clone(),
        browser: (*browser).clone(),
    }
}
