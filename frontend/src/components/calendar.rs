use std::rc::Rc;

use shared::calendar::WEEKDAY_HEADERS;
use shared::{DayCell, DaySlot, MonthGrid};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub months: Rc<Vec<MonthGrid>>,
    pub load_error: Option<String>,
    pub selected_date: Option<String>,
    pub on_select_day: Callback<(String, Vec<DaySlot>)>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    if let Some(error) = &props.load_error {
        return html! {
            <div class="calendar calendar-error">
                <p class="error">{error}</p>
            </div>
        };
    }

    html! {
        <div class="calendar">
            {for props.months.iter().map(|month| render_month(month, props))}
        </div>
    }
}

fn render_month(month: &MonthGrid, props: &CalendarProps) -> Html {
    html! {
        <table class="calendar-month">
            <caption>{&month.caption}</caption>
            <thead>
                <tr>
                    {for WEEKDAY_HEADERS.iter().map(|name| html! { <th>{*name}</th> })}
                </tr>
            </thead>
            <tbody>
                {for month.weeks().into_iter().map(|week| html! {
                    <tr>
                        {for week.into_iter().map(|cell| match cell {
                            Some(day) => render_day(day, props),
                            None => html! { <td class="empty"></td> },
                        })}
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn render_day(day: &DayCell, props: &CalendarProps) -> Html {
    let classes = classes!(
        day.status.css_class(),
        day.is_today.then_some("hoy"),
        (props.selected_date.as_deref() == Some(day.date_key.as_str())).then_some("seleccionado"),
    );

    let onclick = day.status.is_selectable().then(|| {
        let on_select_day = props.on_select_day.clone();
        let date_key = day.date_key.clone();
        let slots = day.slots.clone();
        Callback::from(move |_: MouseEvent| on_select_day.emit((date_key.clone(), slots.clone())))
    });

    html! {
        <td
            class={classes}
            data-fecha={day.date_key.clone()}
            title={day.status.tooltip()}
            {onclick}
        >
            {day.day()}
        </td>
    }
}
