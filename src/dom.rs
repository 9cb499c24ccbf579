use futures_util::future::LocalBoxFuture;
use gloo_net::http::Request;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, HtmlElement, Storage};

use crate::{
    body_state::{BodyProperty, StyleSink},
    contact::{EmailRequest, EmailTransport, TransportFailure, EMAILJS_SEND_URL},
    navigation::SmootherUnavailable,
    pin::PinState,
    reveal::StyleFrame,
    session::SessionStore,
    viewport::{Bounds, Geometry, ViewportSample},
};

fn document() -> Option<Document> {
    window()?.document()
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|win| win.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn scroll_to(y: f64) {
    if let Some(win) = window() {
        win.scroll_to_with_x_and_y(0.0, y);
    }
}

pub fn viewport_sample() -> ViewportSample {
    let (width, height) = viewport_size();
    ViewportSample {
        scroll_y: scroll_y(),
        width,
        height,
    }
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn probe_smoother() -> Result<(), SmootherUnavailable> {
    if prefers_reduced_motion() {
        return Err(SmootherUnavailable::ReducedMotion);
    }

    let Some(win) = window() else {
        return Err(SmootherUnavailable::NoAnimationFrame);
    };
    let win: JsValue = win.into();
    match Reflect::has(&win, &JsValue::from_str("requestAnimationFrame")) {
        Ok(true) => Ok(()),
        _ => Err(SmootherUnavailable::NoAnimationFrame),
    }
}

pub fn is_touch_device() -> bool {
    let Some(win) = window() else {
        return false;
    };
    if win.navigator().max_touch_points() > 0 {
        return true;
    }
    let win: JsValue = win.into();
    Reflect::has(&win, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

fn elements(selector: &str) -> Vec<HtmlElement> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn is_present(selector: &str) -> bool {
    document()
        .and_then(|d| d.query_selector(selector).ok().flatten())
        .is_some()
}

pub fn apply_frame(frame: &StyleFrame) {
    for element in elements(&frame.target) {
        let style = element.style();
        let _ = style.set_property("opacity", &format!("{:.3}", frame.opacity));
        let _ = style.set_property("transform", &format!("translateY({:.2}px)", frame.offset_y));
    }
}

pub fn set_style(selector: &str, property: &str, value: &str) {
    for element in elements(selector) {
        let _ = element.style().set_property(property, value);
    }
}

pub fn apply_pin(selector: &str, state: PinState, slot_top: Option<f64>) {
    for element in elements(selector) {
        let style = element.style();
        let _ = element.set_attribute(
            "data-pin",
            match state {
                PinState::Unpinned => "unpinned",
                PinState::Pinned => "pinned",
                PinState::Released => "released",
            },
        );
        match (state, slot_top) {
            (PinState::Pinned, Some(top)) => {
                let _ = style.set_property("position", "sticky");
                let _ = style.set_property("top", &format!("{top:.0}px"));
            }
            _ => {
                let _ = style.remove_property("position");
                let _ = style.remove_property("top");
            }
        }
    }
}

pub fn clear_pin(selector: &str) {
    for element in elements(selector) {
        let _ = element.remove_attribute("data-pin");
        let style = element.style();
        let _ = style.remove_property("position");
        let _ = style.remove_property("top");
    }
}

pub struct DomGeometry;

impl Geometry for DomGeometry {
    fn bounds(&self, target: &str) -> Option<Bounds> {
        let element = document()?.query_selector(target).ok().flatten()?;
        let rect = element.get_bounding_client_rect();
        Some(Bounds {
            top: rect.top(),
            bottom: rect.bottom(),
        })
    }
}

pub struct DomBodySink;

impl StyleSink for DomBodySink {
    fn apply(&self, property: BodyProperty, value: Option<&str>) {
        let Some(body) = document().and_then(|d| d.body()) else {
            return;
        };
        let style = body.style();
        let _ = match value {
            Some(value) => style.set_property(property.css_name(), value),
            None => style.remove_property(property.css_name()).map(|_| ()),
        };
    }
}

pub struct DomSessionStore;

impl DomSessionStore {
    fn storage() -> Option<Storage> {
        window()?.session_storage().ok().flatten()
    }
}

impl SessionStore for DomSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

pub struct EmailJsTransport;

impl EmailTransport for EmailJsTransport {
    fn send(&self, request: EmailRequest) -> LocalBoxFuture<'_, Result<(), TransportFailure>> {
        Box::pin(async move {
            let response = Request::post(EMAILJS_SEND_URL)
                .json(&request)
                .map_err(|error| TransportFailure::new(error.to_string()))?
                .send()
                .await
                .map_err(|error| TransportFailure::new(error.to_string()))?;

            if response.ok() {
                return Ok(());
            }

            let text = response.text().await.ok().filter(|text| !text.trim().is_empty());
            Err(TransportFailure {
                text: text.or_else(|| Some(format!("EmailJS responded with {}", response.status()))),
            })
        })
    }
}
