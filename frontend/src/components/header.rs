use yew::prelude::*;

use crate::hooks::use_clocks::HeaderClocks;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub clocks: HeaderClocks,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Reserva tu hora"}</h1>
                <div class="header-right">
                    <div class="clock-display">
                        <span class="clock server-clock">{&props.clocks.server}</span>
                        <span class="clock browser-clock">{&props.clocks.browser}</span>
                    </div>
                </div>
            </div>
        </header>
    }
}
