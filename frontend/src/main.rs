use shared::{resolve_initial_calendar, BookingSession};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::booking_controls::BookingControls;
use components::calendar::Calendar;
use components::day_panel::DayPanelView;
use components::header::Header;
use components::reservation_modal::ReservationModal;
use components::toast::ToastView;
use hooks::use_availability::use_availability;
use hooks::use_clocks::use_clocks;
use hooks::use_day_panel::use_day_panel;
use hooks::use_reservation::use_reservation;
use hooks::use_toast::{use_toast, Toast};
use services::api::ApiClient;
use services::config::{WidgetConfig, MOUNT_ELEMENT_ID};
use services::location::{self, CALENDAR_PARAM};
use services::logging::{self, Logger};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: WidgetConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let config = &props.config;
    let api_client = use_memo(config.api_base_url.clone(), |base| {
        ApiClient::with_base_url(base.clone())
    });

    let toast = use_toast(config.toast_duration_ms);
    let clocks = use_clocks(&api_client, config.server_timezone, config.clock_interval_ms);
    let panel = use_day_panel(&api_client, config.server_timezone, config.clock_interval_ms);

    let availability = {
        let business_id = config.business_id.clone().unwrap_or_default();
        let calendar_ids = config.calendar_ids();
        use_availability(
            &api_client,
            move || {
                let param = location::query_param(CALENDAR_PARAM);
                let calendar_id = resolve_initial_calendar(param.as_deref(), &calendar_ids);
                BookingSession::new(business_id, Some(calendar_id))
            },
            config.horizon_months,
            toast.show.clone(),
            panel.actions.close.clone(),
        )
    };

    let reservation = use_reservation(
        &api_client,
        availability.state.loaded.clone(),
        toast.show.clone(),
        availability.actions.reload.clone(),
    );

    // First load as soon as the page knows which business to show
    {
        let load = availability.actions.load.clone();
        let show_toast = toast.show.clone();
        let has_business = !availability.state.business_id.is_empty();
        use_effect_with((), move |_| {
            if has_business {
                load.emit(());
            } else {
                show_toast.emit(Toast::info(
                    "Ingrese un ID de negocio en la URL para comenzar. Ejemplo: /reservas/mi_negocio",
                ));
            }
            || ()
        });
    }

    let on_select_slot = {
        let prepare = reservation.actions.prepare.clone();
        let close_panel = panel.actions.close.clone();
        Callback::from(move |slot: (String, String)| {
            close_panel.emit(());
            prepare.emit(slot);
        })
    };

    let selected_date = panel.detail.as_ref().map(|d| d.date_key.clone());

    html! {
        <div class="app">
            <Header clocks={clocks} />

            <main class="main">
                <div class="container">
                    <BookingControls
                        business_id={availability.state.business_id.clone()}
                        calendar_id={availability.state.calendar_id}
                        calendar_ids={config.calendar_ids()}
                        loading={availability.state.loading}
                        on_business_change={availability.actions.set_business.clone()}
                        on_calendar_change={availability.actions.set_calendar.clone()}
                        on_load={availability.actions.load.clone()}
                    />

                    <div class="booking-layout">
                        <Calendar
                            months={availability.state.months.clone()}
                            load_error={availability.state.load_error.clone()}
                            selected_date={selected_date}
                            on_select_day={panel.actions.open.clone()}
                        />
                        <DayPanelView
                            detail={panel.detail.clone()}
                            clock={panel.clock.clone()}
                            on_select_slot={on_select_slot}
                            on_close={panel.actions.close.clone()}
                        />
                    </div>
                </div>
            </main>

            <ReservationModal
                confirmation={reservation.confirmation.clone()}
                on_name_change={reservation.actions.set_user_name.clone()}
                on_confirm={reservation.actions.confirm.clone()}
                on_close={reservation.actions.dismiss.clone()}
            />

            <ToastView toast={toast.toast.clone()} />
        </div>
    }
}

fn main() {
    let (config, rejected) = WidgetConfig::from_document();
    logging::init(&config.log_level);
    for e in rejected {
        Logger::warn_with_component("config", &format!("Ignoring setting: {}", e));
    }
    Logger::info_with_component(
        "app",
        &format!(
            "Starting booking widget (business: {:?}, calendars: {})",
            config.business_id, config.calendar_count
        ),
    );

    match gloo::utils::document().get_element_by_id(MOUNT_ELEMENT_ID) {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
        }
        None => {
            yew::Renderer::<App>::with_props(AppProps { config }).render();
        }
    }
}
