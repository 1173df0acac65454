use shared::reservation::Confirmation;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReservationModalProps {
    pub confirmation: Option<Confirmation>,
    pub on_name_change: Callback<String>,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ReservationModal)]
pub fn reservation_modal(props: &ReservationModalProps) -> Html {
    let on_name_input = {
        let on_name_change = props.on_name_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_name_change.emit(input.value());
        })
    };

    let on_submit = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_confirm.emit(());
        })
    };

    let submitting = props.confirmation.as_ref().is_some_and(|c| c.submitting);

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !submitting {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let Some(confirmation) = &props.confirmation else {
        return html! {};
    };

    html! {
        <div class="reservation-modal-backdrop" onclick={on_backdrop_click}>
            <div class="reservation-modal" onclick={on_modal_click}>
                <h3 class="reservation-title">{"Confirmar reserva"}</h3>
                <p class="reservation-summary">
                    {format!("Fecha: {} · Hora: {}", confirmation.date, confirmation.time)}
                </p>

                {if let Some(error) = &confirmation.error {
                    html! { <div class="reservation-error">{error}</div> }
                } else {
                    html! {}
                }}

                <form class="reservation-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="nombre-usuario">{"Tu nombre"}</label>
                        <input
                            id="nombre-usuario"
                            type="text"
                            class="booking-input"
                            placeholder="Nombre y apellido"
                            value={confirmation.user_name.clone()}
                            oninput={on_name_input}
                            disabled={confirmation.submitting}
                            autofocus=true
                        />
                    </div>

                    <div class="reservation-buttons">
                        <button type="submit" class="btn btn-primary" disabled={confirmation.submitting}>
                            {if confirmation.submitting { "Reservando..." } else { "Confirmar" }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_cancel}
                            disabled={confirmation.submitting}
                        >
                            {"Cancelar"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
