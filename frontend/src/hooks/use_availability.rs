use std::cell::RefCell;
use std::rc::Rc;

use shared::{build_grid, BookingError, BookingSession, LoadTarget, MonthGrid};
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use super::use_toast::Toast;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::location::{self, CALENDAR_PARAM};
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct AvailabilityState {
    pub business_id: String,
    pub calendar_id: Option<u32>,
    pub loading: bool,
    /// Business/calendar the grid on screen was loaded for
    pub loaded: Option<LoadTarget>,
    pub months: Rc<Vec<MonthGrid>>,
    /// Inline message shown in place of the grid after a failed load
    pub load_error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct AvailabilityActions {
    pub load: Callback<()>,
    /// Load what is on screen again, ignoring unsaved edits
    pub reload: Callback<()>,
    pub set_business: Callback<String>,
    pub set_calendar: Callback<Option<u32>>,
}

pub struct UseAvailabilityResult {
    pub state: AvailabilityState,
    pub actions: AvailabilityActions,
}

/// Session state plus the calendar grid built from the last successful
/// load.
///
/// `initial` seeds the session on first render only. `before_load` runs
/// once a load has passed validation, before the request goes out.
#[hook]
pub fn use_availability<F>(
    api_client: &ApiClient,
    initial: F,
    horizon_months: u32,
    show_toast: Callback<Toast>,
    before_load: Callback<()>,
) -> UseAvailabilityResult
where
    F: FnOnce() -> BookingSession + 'static,
{
    let session = use_mut_ref(initial);
    let months = use_state(|| Rc::new(Vec::<MonthGrid>::new()));
    let load_error = use_state(|| Option::<String>::None);
    let force_update = use_force_update();

    let deps = (horizon_months, show_toast.clone(), before_load.clone());
    let loader = LoadRunner {
        api_client: api_client.clone(),
        session: session.clone(),
        months: months.clone(),
        load_error: load_error.clone(),
        force_update: force_update.clone(),
        horizon_months,
        show_toast,
        before_load,
    };

    let load = {
        let loader = loader.clone();
        use_callback(deps.clone(), move |_: (), _| loader.run(BookingSession::begin_load))
    };

    let reload = use_callback(deps, move |_: (), _| loader.run(BookingSession::begin_reload));

    let set_business = {
        let session = session.clone();
        let force_update = force_update.clone();
        use_callback((), move |business_id: String, _| {
            session.borrow_mut().select_business(business_id);
            force_update.force_update();
        })
    };

    let set_calendar = {
        let session = session.clone();
        let force_update = force_update.clone();
        use_callback((), move |calendar_id: Option<u32>, _| {
            session.borrow_mut().select_calendar(calendar_id);
            force_update.force_update();
        })
    };

    let state = {
        let session = session.borrow();
        AvailabilityState {
            business_id: session.business_id().to_string(),
            calendar_id: session.calendar_id(),
            loading: session.is_loading(),
            loaded: session.loaded_target().cloned(),
            months: (*months).clone(),
            load_error: (*load_error).clone(),
        }
    };

    UseAvailabilityResult {
        state,
        actions: AvailabilityActions {
            load,
            reload,
            set_business,
            set_calendar,
        },
    }
}

/// Everything a load needs once it has been started
#[derive(Clone)]
struct LoadRunner {
    api_client: ApiClient,
    session: Rc<RefCell<BookingSession>>,
    months: UseStateHandle<Rc<Vec<MonthGrid>>>,
    load_error: UseStateHandle<Option<String>>,
    force_update: UseForceUpdateHandle,
    horizon_months: u32,
    show_toast: Callback<Toast>,
    before_load: Callback<()>,
}

impl LoadRunner {
    fn run(&self, begin: fn(&mut BookingSession) -> Result<LoadTarget, BookingError>) {
        let target = match begin(&mut self.session.borrow_mut()) {
            Ok(target) => target,
            Err(e) => {
                Logger::warn_with_component("availability", &e.to_string());
                self.show_toast.emit(Toast::error(e.user_message()));
                return;
            }
        };

        self.before_load.emit(());
        self.force_update.force_update();
        Logger::info_with_component(
            "availability",
            &format!(
                "Loading availability for {} / calendar {}",
                target.business_id, target.calendar_id
            ),
        );

        let this = self.clone();
        spawn_local(async move {
            let result = this
                .api_client
                .get_availability(&target.business_id, target.calendar_id)
                .await;

            let finished = this.session.borrow_mut().finish_load(result);
            match finished {
                Ok(()) => {
                    let grid = this
                        .session
                        .borrow()
                        .availability()
                        .map(|payload| {
                            build_grid(payload, date_utils::browser_now(), this.horizon_months)
                        })
                        .unwrap_or_default();
                    this.months.set(Rc::new(grid));
                    this.load_error.set(None);
                    this.show_toast.emit(Toast::success("Calendario cargado exitosamente!"));

                    let calendar = target.calendar_id.to_string();
                    if let Err(e) = location::replace_query_param(CALENDAR_PARAM, &calendar) {
                        Logger::warn_with_component(
                            "availability",
                            &format!("Could not update URL: {:?}", e),
                        );
                    }
                }
                Err(e) => {
                    let message = e.user_message();
                    Logger::error_with_component(
                        "availability",
                        &format!("Failed to load availability: {}", message),
                    );
                    this.months.set(Rc::new(Vec::new()));
                    this.load_error
                        .set(Some(format!("No se pudo cargar el calendario. {}", message)));
                    this.show_toast
                        .emit(Toast::error(format!("Error al cargar calendario: {}", message)));
                }
            }
            this.force_update.force_update();
        });
    }
}
