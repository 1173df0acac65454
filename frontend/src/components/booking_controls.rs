use web_sys::{HtmlInputElement, HtmlSelectElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingControlsProps {
    pub business_id: String,
    pub calendar_id: Option<u32>,
    pub calendar_ids: Vec<u32>,
    pub loading: bool,
    pub on_business_change: Callback<String>,
    pub on_calendar_change: Callback<Option<u32>>,
    pub on_load: Callback<()>,
}

/// Business ID input, calendar selector and load button. Enter in the
/// input and picking a calendar both load right away.
#[function_component(BookingControls)]
pub fn booking_controls(props: &BookingControlsProps) -> Html {
    // Raw text as typed; the session only keeps the trimmed ID
    let business_text = use_state(|| props.business_id.clone());

    let on_business_input = {
        let business_text = business_text.clone();
        let on_business_change = props.on_business_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            business_text.set(value.clone());
            on_business_change.emit(value);
        })
    };

    let on_business_keydown = {
        let on_load = props.on_load.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_load.emit(());
            }
        })
    };

    let on_calendar_change = {
        let on_calendar_change = props.on_calendar_change.clone();
        let on_load = props.on_load.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_calendar_change.emit(select.value().parse::<u32>().ok());
            on_load.emit(());
        })
    };

    let on_load_click = {
        let on_load = props.on_load.clone();
        Callback::from(move |_: MouseEvent| on_load.emit(()))
    };

    html! {
        <div class="booking-controls">
            <div class="form-group">
                <label for="id-negocio">{"ID del negocio"}</label>
                <input
                    id="id-negocio"
                    type="text"
                    class="booking-input"
                    placeholder="mi_negocio"
                    value={(*business_text).clone()}
                    oninput={on_business_input}
                    onkeydown={on_business_keydown}
                />
            </div>

            <div class="form-group">
                <label for="id-calendario">{"Calendario"}</label>
                <select id="id-calendario" class="booking-select" onchange={on_calendar_change}>
                    {for props.calendar_ids.iter().map(|id| html! {
                        <option
                            value={id.to_string()}
                            selected={props.calendar_id == Some(*id)}
                        >
                            {format!("Calendario {}", id)}
                        </option>
                    })}
                </select>
            </div>

            <button
                type="button"
                class="btn btn-primary"
                onclick={on_load_click}
                disabled={props.loading}
            >
                {if props.loading { "Cargando..." } else { "Cargar calendario" }}
            </button>
        </div>
    }
}
