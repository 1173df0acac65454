use shared::reservation::Confirmation;
use shared::{BookingError, FlowEffect, LoadTarget, ReservationFlow};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_toast::Toast;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct ReservationActions {
    /// Date key and `HH:MM` of the slot picked in the panel
    pub prepare: Callback<(String, String)>,
    pub set_user_name: Callback<String>,
    pub confirm: Callback<()>,
    pub dismiss: Callback<()>,
}

pub struct UseReservationResult {
    pub confirmation: Option<Confirmation>,
    pub actions: ReservationActions,
}

/// Confirmation prompt for a picked slot. Reservations go to `target`,
/// the business/calendar whose grid is on screen; `on_reserved` fires once
/// per successful reservation so availability can be reloaded.
#[hook]
pub fn use_reservation(
    api_client: &ApiClient,
    target: Option<LoadTarget>,
    show_toast: Callback<Toast>,
    on_reserved: Callback<()>,
) -> UseReservationResult {
    let flow = use_mut_ref(ReservationFlow::new);
    let force_update = use_force_update();

    let prepare = {
        let flow = flow.clone();
        let force_update = force_update.clone();
        use_callback((), move |(date, time): (String, String), _| {
            flow.borrow_mut().prepare(date, time);
            force_update.force_update();
        })
    };

    let set_user_name = {
        let flow = flow.clone();
        let force_update = force_update.clone();
        use_callback((), move |name: String, _| {
            flow.borrow_mut().set_user_name(name);
            force_update.force_update();
        })
    };

    let confirm = {
        let api_client = api_client.clone();
        let flow = flow.clone();
        let force_update = force_update.clone();
        use_callback(
            (target, show_toast, on_reserved),
            move |_: (), (target, show_toast, on_reserved)| {
                let submitted = match target {
                    Some(target) => flow
                        .borrow_mut()
                        .submit(&target.business_id, target.calendar_id),
                    None => Err(BookingError::validation(
                        "Verifique el ID del negocio y seleccione un calendario.",
                    )),
                };
                let request = match submitted {
                    Ok(request) => request,
                    Err(e) => {
                        show_toast.emit(Toast::error(e.user_message()));
                        force_update.force_update();
                        return;
                    }
                };
                force_update.force_update();

                Logger::info_with_component(
                    "reservation",
                    &format!("Reserving {} {} for calendar {}", request.date, request.time, request.calendar_id),
                );

                let api_client = api_client.clone();
                let flow = flow.clone();
                let force_update = force_update.clone();
                let show_toast = show_toast.clone();
                let on_reserved = on_reserved.clone();

                spawn_local(async move {
                    let result = api_client.reserve(&request).await;
                    let effect = flow.borrow_mut().complete(&result);

                    match &result {
                        Ok(response) => show_toast.emit(Toast::success(response.mensaje.clone())),
                        Err(e) => {
                            Logger::error_with_component(
                                "reservation",
                                &format!("Reservation failed: {}", e),
                            );
                            show_toast.emit(Toast::error(format!("Error al reservar: {}", e.user_message())));
                        }
                    }
                    force_update.force_update();

                    if effect == Some(FlowEffect::ReloadAvailability) {
                        on_reserved.emit(());
                    }
                });
            },
        )
    };

    let dismiss = {
        let flow = flow.clone();
        let force_update = force_update.clone();
        use_callback((), move |_: (), _| {
            flow.borrow_mut().dismiss();
            force_update.force_update();
        })
    };

    let confirmation = flow.borrow().confirmation().cloned();

    UseReservationResult {
        confirmation,
        actions: ReservationActions {
            prepare,
            set_user_name,
            confirm,
            dismiss,
        },
    }
}
