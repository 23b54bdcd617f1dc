use gloo_timers::callback::Timeout;
use js_sys::Array;
use log::{error, info, warn, Level};
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    time::Duration,
};
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, ErrorEvent, Event, EventTarget, HtmlButtonElement, HtmlElement,
    HtmlFormElement, HtmlImageElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::config::{PageConfig, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::contact::{ContactFormController, ContactSubmission, FormView, SimulatedSubmitter};
use crate::motion::{fragment_selector, scroll_target, HeroFloat, RevealTracker};
use crate::navbar::NavbarTracker;
use crate::notify::{show_notification, Severity};

const LOADING_ID: &str = "loading";
const LOADING_HIDDEN_CLASS: &str = "hide";
const NAVBAR_SELECTOR: &str = ".navbar";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const REVEAL_SELECTOR: &str = ".fade-in-up";
const REVEAL_CLASS: &str = "animate";
const HERO_SELECTOR: &str = ".hero h1, .hero .lead";
const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
const LAZY_IMAGE_CLASS: &str = "lazy";
const CONTACT_FORM_ID: &str = "contactForm";
const NAME_FIELD_ID: &str = "nama";
const CONTACT_FIELD_ID: &str = "email";
const SUBJECT_FIELD_ID: &str = "subjek";
const MESSAGE_FIELD_ID: &str = "pesan";
const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
const BUSY_LABEL: &str = "<i class=\"fas fa-spinner fa-spin me-2\"></i>Mengirim...";

fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Runs `f` once the window has fired `load`, or right away if it already has.
fn when_loaded(window: &Window, document: &Document, f: impl FnOnce() + 'static) {
    if document.ready_state() == "complete" {
        f();
        return;
    }

    let closure = Closure::once(move |_: Event| f());
    let _ = window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn intersecting(entries: &Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .filter(IntersectionObserverEntry::is_intersecting)
}

fn sibling_index(element: &Element) -> usize {
    std::iter::successors(
        element.previous_element_sibling(),
        Element::previous_element_sibling,
    )
    .count()
}

fn install_error_logging(window: &Window) {
    listen(window, "error", |event: Event| {
        match event.dyn_ref::<ErrorEvent>() {
            Some(event) => error!(
                "uncaught script error: {} ({}:{}:{})",
                event.message(),
                event.filename(),
                event.lineno(),
                event.colno()
            ),
            None => error!("uncaught error event: {}", event.type_()),
        }
    });
}

fn log_load_time(window: &Window, document: &Document) {
    let performance = window.performance();
    when_loaded(window, document, move || {
        if let Some(performance) = performance {
            info!("Page loaded in {}ms", performance.now().round());
        }
    });
}

/// Per-frame vertical float on the hero heading and lead.
///
/// Owns the pending `requestAnimationFrame` handle; at most one frame is
/// queued at a time.
struct HeroAnimation {
    window: Window,
    targets: Vec<HtmlElement>,
    float: HeroFloat,
    frame: Cell<Option<i32>>,
    tick: Closure<dyn FnMut(f64)>,
}

impl HeroAnimation {
    fn new(window: Window, targets: Vec<HtmlElement>, float: HeroFloat) -> Rc<Self> {
        Rc::new_cyclic(|animation: &Weak<Self>| {
            let animation = animation.clone();
            let tick = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
                if let Some(animation) = animation.upgrade() {
                    animation.frame.set(None);
                    animation.render();
                    animation.schedule();
                }
            });

            Self {
                window,
                targets,
                float,
                frame: Cell::new(None),
                tick,
            }
        })
    }

    fn start(&self) {
        self.stop();
        self.render();
        self.schedule();
    }

    fn stop(&self) {
        if let Some(handle) = self.frame.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    fn render(&self) {
        let time = js_sys::Date::now() * 0.001;
        for (index, element) in self.targets.iter().enumerate() {
            let _ = element
                .style()
                .set_property("transform", &self.float.transform(time, index));
        }
    }

    fn schedule(&self) {
        match self
            .window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
        {
            Ok(handle) => self.frame.set(Some(handle)),
            Err(_) => warn!("requestAnimationFrame unavailable; hero float stopped"),
        }
    }
}

struct DomFormView {
    document: Document,
    form: HtmlFormElement,
    submit_button: Option<HtmlButtonElement>,
    idle_label: RefCell<Option<String>>,
    toast_lifetime_ms: u32,
}

impl DomFormView {
    fn field_value(&self, id: &str) -> String {
        let Some(element) = self.document.get_element_by_id(id) else {
            return String::new();
        };

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }
}

impl FormView for DomFormView {
    fn read(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.field_value(NAME_FIELD_ID),
            contact: self.field_value(CONTACT_FIELD_ID),
            subject: self.field_value(SUBJECT_FIELD_ID),
            message: self.field_value(MESSAGE_FIELD_ID),
        }
    }

    fn set_busy(&self, busy: bool) {
        let Some(button) = self.submit_button.as_ref() else {
            return;
        };

        if busy {
            *self.idle_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(BUSY_LABEL);
        } else if let Some(label) = self.idle_label.take() {
            button.set_inner_html(&label);
        }
        button.set_disabled(busy);
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn notify(&self, message: &str, severity: Severity) {
        show_notification(&self.document, message, severity, self.toast_lifetime_ms);
    }
}

struct Page {
    window: Window,
    document: Document,
    config: PageConfig,
}

impl Page {
    fn init(self) {
        info!("Voltrac landing page loaded");

        self.init_loading_overlay();
        self.init_smooth_scrolling();
        self.init_scroll_reveal();
        self.init_navbar_effect();
        self.init_contact_form();
        self.init_hero_float();
        self.init_lazy_images();
    }

    fn init_loading_overlay(&self) {
        let document = self.document.clone();
        let delay_ms = self.config.loader_delay_ms;
        let fade_ms = self.config.loader_fade_ms;

        when_loaded(&self.window, &self.document, move || {
            let Some(loading) = document.get_element_by_id(LOADING_ID) else {
                return;
            };

            Timeout::new(delay_ms, move || {
                let _ = loading.class_list().add_1(LOADING_HIDDEN_CLASS);
                Timeout::new(fade_ms, move || loading.remove()).forget();
            })
            .forget();
        });
    }

    fn init_smooth_scrolling(&self) {
        let anchors: Vec<Element> = query_all(&self.document, ANCHOR_SELECTOR);
        if anchors.is_empty() {
            return;
        }

        let window = self.window.clone();
        let document = self.document.clone();
        let header_offset = self.config.header_offset;

        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();

            let Some(href) = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|anchor| anchor.get_attribute("href"))
            else {
                return;
            };
            let Some(selector) = fragment_selector(&href) else {
                return;
            };
            let Some(target) = document.query_selector(selector).ok().flatten() else {
                warn!("in-page link {href} has no matching element");
                return;
            };

            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                window.page_y_offset().unwrap_or(0.0),
                header_offset,
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        });

        for anchor in &anchors {
            let _ = anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
        on_click.forget();
    }

    fn init_scroll_reveal(&self) {
        let targets: Vec<Element> = query_all(&self.document, REVEAL_SELECTOR);
        if targets.is_empty() {
            return;
        }

        let mut tracker = RevealTracker::new(targets.len(), self.config.reveal_stagger_seconds);
        let observed = targets.clone();
        let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in intersecting(&entries) {
                    let target = entry.target();
                    // one-shot: leaving the viewport never undoes the reveal
                    observer.unobserve(&target);
                    let Some(position) = observed.iter().position(|element| *element == target) else {
                        continue;
                    };
                    let Some(delay) = tracker.reveal(position, sibling_index(&target)) else {
                        continue;
                    };
                    let _ = target.class_list().add_1(REVEAL_CLASS);
                    if let Some(element) = target.dyn_ref::<HtmlElement>() {
                        let _ = element.style().set_property("animation-delay", &delay);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);

        let Ok(observer) =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
        else {
            warn!("IntersectionObserver unavailable; scroll reveal disabled");
            return;
        };

        for target in &targets {
            observer.observe(target);
        }
        on_intersect.forget();
    }

    fn init_navbar_effect(&self) {
        let mut tracker = NavbarTracker::new(
            self.window.scroll_y().unwrap_or(0.0),
            self.config.navbar_tint_threshold,
            self.config.navbar_hide_threshold,
        );
        let window = self.window.clone();
        let document = self.document.clone();

        listen(&self.window, "scroll", move |_: Event| {
            let Some(navbar) = document
                .query_selector(NAVBAR_SELECTOR)
                .ok()
                .flatten()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };

            let look = tracker.observe(window.scroll_y().unwrap_or(0.0));
            let style = navbar.style();
            let _ = style.set_property("background", look.tint.background());
            let _ = style.set_property("backdrop-filter", look.tint.backdrop_filter());
            let _ = style.set_property("transform", look.position.transform());
        });
    }

    fn init_contact_form(&self) {
        let Some(form) = self
            .document
            .get_element_by_id(CONTACT_FORM_ID)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };

        let submit_button = form
            .query_selector(SUBMIT_BUTTON_SELECTOR)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok());

        let view = DomFormView {
            document: self.document.clone(),
            form: form.clone(),
            submit_button,
            idle_label: RefCell::new(None),
            toast_lifetime_ms: self.config.toast_lifetime_ms,
        };
        let submitter =
            SimulatedSubmitter::new(Duration::from_millis(u64::from(self.config.submit_delay_ms)));
        let controller = ContactFormController::new(view, submitter);

        listen(&form, "submit", move |event: Event| {
            event.prevent_default();
            if let Some(delivery) = controller.handle_submit() {
                spawn_local(delivery);
            }
        });
    }

    fn init_hero_float(&self) {
        let targets: Vec<HtmlElement> = query_all(&self.document, HERO_SELECTOR);
        if targets.is_empty() {
            return;
        }

        let animation = HeroAnimation::new(
            self.window.clone(),
            targets,
            HeroFloat {
                amplitude: self.config.hero_amplitude,
                phase_step: self.config.hero_phase_step,
            },
        );
        animation.start();

        let document = self.document.clone();
        listen(&self.document, "visibilitychange", move |_: Event| {
            if document.hidden() {
                animation.stop();
            } else {
                animation.start();
            }
        });
    }

    fn init_lazy_images(&self) {
        let images: Vec<HtmlImageElement> = query_all(&self.document, LAZY_IMAGE_SELECTOR);
        if images.is_empty() {
            return;
        }

        let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in intersecting(&entries) {
                    let target = entry.target();
                    observer.unobserve(&target);
                    if let (Some(image), Some(source)) = (
                        target.dyn_ref::<HtmlImageElement>(),
                        target.get_attribute("data-src"),
                    ) {
                        image.set_src(&source);
                    }
                    let _ = target.class_list().remove_1(LAZY_IMAGE_CLASS);
                }
            },
        );

        let Ok(observer) = IntersectionObserver::new(on_intersect.as_ref().unchecked_ref()) else {
            warn!("IntersectionObserver unavailable; images load eagerly");
            for image in &images {
                if let Some(source) = image.get_attribute("data-src") {
                    image.set_src(&source);
                }
            }
            return;
        };

        for image in &images {
            observer.observe(image);
        }
        on_intersect.forget();
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = PageConfig::from_element(document.document_element().as_ref());
    let level = if config.debug_logging {
        Level::Debug
    } else {
        Level::Info
    };
    let _ = console_log::init_with_level(level);

    install_error_logging(&window);
    log_load_time(&window, &document);

    let page = Page {
        window,
        document: document.clone(),
        config,
    };

    if document.ready_state() == "loading" {
        let closure = Closure::once(move |_: Event| page.init());
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        page.init();
    }
}
