use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// True when `rect` lies entirely inside a `width` x `height` viewport.
pub fn is_in_viewport(rect: Rect, (width, height): (f64, f64)) -> bool {
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= height && rect.right <= width
}

/// Lets one call through per `limit_ms` window, timed by the caller's clock.
#[derive(Clone, Debug)]
pub struct ThrottleGate {
    limit_ms: f64,
    open_at: Option<f64>,
}

impl ThrottleGate {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            open_at: None,
        }
    }

    pub fn try_pass(&mut self, now_ms: f64) -> bool {
        if self.open_at.is_some_and(|open_at| now_ms < open_at) {
            return false;
        }
        self.open_at = Some(now_ms + self.limit_ms);
        true
    }
}

/// Resolves after `duration` on the page's timer queue.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

// Exported for page scripts that want them; the page controller itself does not.
#[cfg(target_arch = "wasm32")]
#[allow(unused_imports)]
pub use browser::{debounce, element_in_viewport, throttle};

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_timers::callback::Timeout;
    use std::{cell::RefCell, rc::Rc};
    use web_sys::{window, Element};

    use super::{is_in_viewport, Rect, ThrottleGate};

    /// Delays `f` until `wait_ms` pass without another call; the last arguments win.
    #[allow(dead_code)]
    pub fn debounce<T: 'static>(wait_ms: u32, f: impl FnMut(T) + 'static) -> impl FnMut(T) {
        let f = Rc::new(RefCell::new(f));
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        move |args: T| {
            let f = Rc::clone(&f);
            let timeout = Timeout::new(wait_ms, move || (&mut *f.borrow_mut())(args));
            // dropping the previous timeout cancels it
            pending.borrow_mut().replace(timeout);
        }
    }

    #[allow(dead_code)]
    pub fn throttle<T>(limit_ms: u32, mut f: impl FnMut(T)) -> impl FnMut(T) {
        let mut gate = ThrottleGate::new(f64::from(limit_ms));
        move |args: T| {
            if gate.try_pass(js_sys::Date::now()) {
                f(args);
            }
        }
    }

    fn viewport_size() -> (f64, f64) {
        let Some(win) = window() else {
            return (0.0, 0.0);
        };
        let client = win
            .document()
            .and_then(|document| document.document_element())
            .map(|root| (f64::from(root.client_width()), f64::from(root.client_height())))
            .unwrap_or((0.0, 0.0));

        let width = win
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .filter(|value| *value > 0.0)
            .unwrap_or(client.0);
        let height = win
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .filter(|value| *value > 0.0)
            .unwrap_or(client.1);

        (width, height)
    }

    #[allow(dead_code)]
    pub fn element_in_viewport(element: &Element) -> bool {
        let rect = element.get_bounding_client_rect();
        is_in_viewport(
            Rect {
                top: rect.top(),
                left: rect.left(),
                bottom: rect.bottom(),
                right: rect.right(),
            },
            viewport_size(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_containment_requires_every_edge_inside() {
        let viewport = (1280.0, 720.0);
        let inside = Rect {
            top: 0.0,
            left: 10.0,
            bottom: 720.0,
            right: 1280.0,
        };
        assert!(is_in_viewport(inside, viewport));
        assert!(!is_in_viewport(Rect { top: -1.0, ..inside }, viewport));
        assert!(!is_in_viewport(Rect { right: 1280.5, ..inside }, viewport));
        assert!(!is_in_viewport(Rect { bottom: 900.0, ..inside }, viewport));
    }

    #[test]
    fn throttle_drops_calls_inside_the_window() {
        let mut gate = ThrottleGate::new(100.0);
        assert!(gate.try_pass(0.0));
        assert!(!gate.try_pass(50.0));
        assert!(!gate.try_pass(99.9));
        assert!(gate.try_pass(100.0));
        assert!(!gate.try_pass(150.0));
        assert!(gate.try_pass(260.0));
    }
}
