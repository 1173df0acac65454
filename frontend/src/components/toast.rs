use yew::prelude::*;

use crate::hooks::use_toast::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastViewProps {
    pub toast: Option<Toast>,
}

#[function_component(ToastView)]
pub fn toast_view(props: &ToastViewProps) -> Html {
    match &props.toast {
        Some(toast) => html! {
            <div class={classes!("toast", "show", toast.kind.css_class())} role="status">
                {&toast.message}
            </div>
        },
        None => html! { <div class="toast" role="status"></div> },
    }
}
