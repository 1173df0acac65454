use shared::{DayDetail, SlotAction};
use yew::prelude::*;

use crate::hooks::use_day_panel::{PanelClock, PANEL_ELEMENT_ID};

#[derive(Properties, PartialEq)]
pub struct DayPanelProps {
    pub detail: Option<DayDetail>,
    pub clock: PanelClock,
    /// Date key and `HH:MM` of a bookable slot
    pub on_select_slot: Callback<(String, String)>,
    pub on_close: Callback<()>,
}

/// Slot list for one day. The element is always present so outside
/// clicks can be told apart; it only shows while a day is open.
#[function_component(DayPanelView)]
pub fn day_panel_view(props: &DayPanelProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let Some(detail) = &props.detail else {
        return html! { <aside id={PANEL_ELEMENT_ID} class="day-panel"></aside> };
    };

    html! {
        <aside id={PANEL_ELEMENT_ID} class="day-panel open">
            <div class="day-panel-header">
                <h3>{detail.title()}</h3>
                <button type="button" class="close-button" onclick={on_close}>{"×"}</button>
            </div>

            <div class="day-panel-clocks">
                <p class="clock">{&props.clock.server}</p>
                <p class="clock">{&props.clock.browser}</p>
            </div>

            {if detail.slots.is_empty() {
                html! { <p class="no-slots">{"No hay horarios definidos para esta fecha."}</p> }
            } else {
                html! {
                    <div class="slot-list">
                        {for detail.actions().map(|(slot, action)| {
                            let onclick = (action == SlotAction::Bookable).then(|| {
                                let on_select_slot = props.on_select_slot.clone();
                                let date_key = detail.date_key.clone();
                                let hora = slot.hora.clone();
                                Callback::from(move |_: MouseEvent| {
                                    on_select_slot.emit((date_key.clone(), hora.clone()))
                                })
                            });

                            html! {
                                <button
                                    type="button"
                                    class={action.css_class()}
                                    disabled={action.is_disabled()}
                                    title={action.label()}
                                    {onclick}
                                >
                                    <span class="slot-time">{&slot.hora}</span>
                                    <span class="slot-label">{action.label()}</span>
                                </button>
                            }
                        })}
                    </div>
                }
            }}
        </aside>
    }
}
