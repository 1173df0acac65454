use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono_tz::Tz;
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use shared::time::{browser_clock_label, server_clock_label};
use shared::{BookingError, DayDetail, DayPanel, DaySlot, PanelResources, ServerTimeResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Node};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

/// Id of the panel element, used to tell clicks inside it apart
pub const PANEL_ELEMENT_ID: &str = "detalle-dia";

/// Day cells of the rendered calendar; clicks on them never dismiss
const DAY_CELL_SELECTOR: &str = ".calendar-month td[data-fecha]";

pub type SharedPanel = Rc<RefCell<DayPanel<WebPanelResources>>>;

/// Clock lines shown inside the open panel
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelClock {
    pub server: String,
    pub browser: String,
}

/// Server line: whatever `/hora-servidor` answered, or the error text
pub fn panel_server_line(
    zone: Tz,
    response: &Result<ServerTimeResponse, BookingError>,
) -> String {
    let hora = response.as_ref().ok().map(|t| t.hora.as_str());
    server_clock_label(zone.name(), hora)
}

/// Browser line: the browser's own clock, read in the server zone
pub fn panel_browser_line(zone: Tz) -> String {
    browser_clock_label(Some(zone.name()), &date_utils::clock_in_zone(zone))
}

/// Document listener and interval backing an open panel
pub struct WebPanelResources {
    panel: Weak<RefCell<DayPanel<WebPanelResources>>>,
    on_closed: Callback<()>,
    on_tick: Callback<()>,
}

impl PanelResources for WebPanelResources {
    type DismissListener = EventListener;
    type RefreshTimer = Interval;

    fn listen_for_dismiss(&mut self) -> EventListener {
        let panel = self.panel.clone();
        let on_closed = self.on_closed.clone();

        EventListener::new(&gloo::utils::document(), "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            // Nodes removed by a re-render during this click are no longer
            // anywhere in the document
            if !target.is_connected() {
                return;
            }

            let inside_panel = gloo::utils::document()
                .get_element_by_id(PANEL_ELEMENT_ID)
                .map(|el| el.contains(Some(target.unchecked_ref::<Node>())))
                .unwrap_or(false);
            let on_day_cell = target.closest(DAY_CELL_SELECTOR).ok().flatten().is_some();

            if !shared::should_dismiss(true, inside_panel, on_day_cell) {
                return;
            }

            // Closing drops this listener, so it must happen after the
            // handler returns
            let panel = panel.clone();
            let on_closed = on_closed.clone();
            spawn_local(async move {
                let Some(panel) = panel.upgrade() else {
                    return;
                };
                let closed = panel
                    .borrow_mut()
                    .handle_document_click(inside_panel, on_day_cell);
                if closed {
                    Logger::debug_with_component("day-panel", "Dismissed by outside click");
                    on_closed.emit(());
                }
            });
        })
    }

    fn start_refresh(&mut self, interval_ms: u32) -> Interval {
        let on_tick = self.on_tick.clone();
        Interval::new(interval_ms, move || on_tick.emit(()))
    }
}

/// Panel controller wired to the document. `on_closed` fires after an
/// outside click closed it; `on_tick` on every refresh while open.
pub fn web_panel(
    on_closed: Callback<()>,
    on_tick: Callback<()>,
    refresh_interval_ms: u32,
) -> SharedPanel {
    Rc::new_cyclic(|weak| {
        RefCell::new(DayPanel::with_refresh_interval(
            WebPanelResources {
                panel: weak.clone(),
                on_closed,
                on_tick,
            },
            refresh_interval_ms,
        ))
    })
}

#[derive(Clone, PartialEq)]
pub struct DayPanelActions {
    pub open: Callback<(String, Vec<DaySlot>)>,
    pub close: Callback<()>,
}

pub struct UseDayPanelResult {
    pub detail: Option<DayDetail>,
    pub clock: PanelClock,
    pub actions: DayPanelActions,
}

/// Owns the day panel controller. The controller lives as long as the
/// component; its listener and timer only while a day is open.
#[hook]
pub fn use_day_panel(
    api_client: &ApiClient,
    server_timezone: Tz,
    refresh_interval_ms: u32,
) -> UseDayPanelResult {
    let server_line = use_state(String::new);
    let browser_line = use_state(String::new);
    let force_update = use_force_update();

    let on_tick = {
        let api_client = api_client.clone();
        let server_line = server_line.clone();
        let browser_line = browser_line.clone();
        Callback::from(move |_: ()| {
            browser_line.set(panel_browser_line(server_timezone));

            let api_client = api_client.clone();
            let server_line = server_line.clone();
            spawn_local(async move {
                let response = api_client.get_server_time().await;
                if let Err(e) = &response {
                    Logger::debug_with_component("day-panel", &format!("Server time unavailable: {}", e));
                }
                server_line.set(panel_server_line(server_timezone, &response));
            });
        })
    };

    let panel: Rc<SharedPanel> = {
        let on_tick = on_tick.clone();
        let force_update = force_update.clone();
        use_memo((), move |_| {
            let on_closed = Callback::from(move |_: ()| force_update.force_update());
            web_panel(on_closed, on_tick, refresh_interval_ms)
        })
    };

    let open = {
        let panel = panel.clone();
        let force_update = force_update.clone();
        use_callback((), move |(date_key, slots): (String, Vec<DaySlot>), _| {
            Logger::debug_with_component("day-panel", &format!("Opening {}", date_key));
            panel.borrow_mut().open(date_key, slots);
            on_tick.emit(());
            force_update.force_update();
        })
    };

    let close = {
        let panel = panel.clone();
        let force_update = force_update.clone();
        use_callback((), move |_: (), _| {
            if panel.borrow_mut().close() {
                force_update.force_update();
            }
        })
    };

    let detail = panel.borrow().detail().cloned();

    UseDayPanelResult {
        detail,
        clock: PanelClock {
            server: (*server_line).clone(),
            browser: (*browser_line).clone(),
        },
        actions: DayPanelActions { open, close },
    }
}
