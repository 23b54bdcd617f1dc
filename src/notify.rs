use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::utils::sleep;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
    #[default]
    Info,
}

impl Severity {
    fn variant(self) -> &'static str {
        match self {
            Self::Error => "danger",
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Error => "exclamation-triangle",
            Self::Success => "check-circle",
            Self::Info => "info-circle",
        }
    }

    pub fn alert_class(self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show position-fixed",
            self.variant()
        )
    }

    pub fn icon_class(self) -> String {
        format!("fas fa-{} me-2", self.icon())
    }
}

/// Holds a mounted notification until the first of dismiss or expiry takes it.
#[derive(Debug)]
pub struct ToastSlot<T> {
    mounted: RefCell<Option<T>>,
}

impl<T> Default for ToastSlot<T> {
    fn default() -> Self {
        Self {
            mounted: RefCell::new(None),
        }
    }
}

impl<T> ToastSlot<T> {
    pub fn fill(&self, toast: T) {
        *self.mounted.borrow_mut() = Some(toast);
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.borrow().is_some()
    }

    /// Takes the toast out for teardown. Only the first caller gets it.
    pub fn take(&self) -> Option<T> {
        self.mounted.borrow_mut().take()
    }
}

/// Waits out `lifetime`, then tears the toast down unless it was dismissed first.
pub async fn expire<T>(slot: Rc<ToastSlot<T>>, lifetime: Duration, teardown: impl FnOnce(T)) {
    sleep(lifetime).await;
    if let Some(toast) = slot.take() {
        teardown(toast);
    }
}

#[cfg(target_arch = "wasm32")]
pub use toast::show_notification;

#[cfg(target_arch = "wasm32")]
mod toast {
    use std::{rc::Rc, time::Duration};
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, Element, MouseEvent};
    use yew::{prelude::*, AppHandle};

    use super::{expire, Severity, ToastSlot};

    const TOAST_STYLE: &str = "top: 20px; right: 20px; z-index: 10000; max-width: 400px;";

    #[derive(Properties, PartialEq)]
    struct ToastProps {
        message: AttrValue,
        severity: Severity,
        on_dismiss: Callback<()>,
    }

    #[function_component(Toast)]
    fn toast(props: &ToastProps) -> Html {
        let onclick = {
            let on_dismiss = props.on_dismiss.clone();
            Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
        };

        html! {
            <>
                <i class={props.severity.icon_class()}></i>
                {props.message.clone()}
                <button
                    type="button"
                    class="btn-close"
                    data-bs-dismiss="alert"
                    aria-label="Close"
                    onclick={onclick}
                ></button>
            </>
        }
    }

    struct Mounted {
        host: Element,
        app: AppHandle<Toast>,
    }

    fn teardown(toast: Mounted) {
        toast.app.destroy();
        toast.host.remove();
    }

    /// Appends a toast to `<body>` that removes itself after `lifetime_ms`.
    ///
    /// Toasts stack freely; nothing limits how many are on screen.
    pub fn show_notification(document: &Document, message: &str, severity: Severity, lifetime_ms: u32) {
        let Some(body) = document.body() else {
            return;
        };
        let Ok(host) = document.create_element("div") else {
            return;
        };

        host.set_class_name(&severity.alert_class());
        let _ = host.set_attribute("style", TOAST_STYLE);
        let _ = host.set_attribute("role", "alert");
        if body.append_child(&host).is_err() {
            return;
        }

        let slot = Rc::new(ToastSlot::default());
        let on_dismiss = {
            let slot = Rc::clone(&slot);
            Callback::from(move |_: ()| {
                if let Some(toast) = slot.take() {
                    teardown(toast);
                }
            })
        };

        let app = yew::Renderer::<Toast>::with_root_and_props(
            host.clone(),
            ToastProps {
                message: AttrValue::from(message.to_string()),
                severity,
                on_dismiss,
            },
        )
        .render();
        slot.fill(Mounted { host, app });

        spawn_local(expire(
            slot,
            Duration::from_millis(u64::from(lifetime_ms)),
            teardown,
        ));
    }
}
