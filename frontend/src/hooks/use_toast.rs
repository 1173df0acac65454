use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// Transient notification
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Info }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Error }
    }
}

pub struct UseToastResult {
    pub toast: Option<Toast>,
    pub show: Callback<Toast>,
}

/// Single toast slot; a new toast replaces the current one and restarts
/// its hide timer.
#[hook]
pub fn use_toast(duration_ms: u32) -> UseToastResult {
    let toast = use_state(|| Option::<Toast>::None);
    let hide_timer = use_mut_ref(|| Option::<Timeout>::None);

    let show = {
        let toast = toast.clone();
        use_callback(duration_ms, move |next: Toast, duration_ms| {
            toast.set(Some(next));

            let toast = toast.clone();
            // Dropping the previous timeout cancels it
            *hide_timer.borrow_mut() = Some(Timeout::new(*duration_ms, move || toast.set(None)));
        })
    };

    UseToastResult {
        toast: (*toast).clone(),
        show,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_kinds() {
        assert_eq!(Toast::info("hola").kind.css_class(), "info");
        assert_eq!(Toast::success("ok").kind, ToastKind::Success);

        let toast = Toast::error("Error al reservar: Error de red: timeout");
        assert_eq!(toast.kind.css_class(), "error");
        assert_eq!(toast.message, "Error al reservar: Error de red: timeout");
    }
}
