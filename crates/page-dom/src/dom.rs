//! Browser-backed `View`
//!
//! Listeners, observers and timers are leaked with `forget()`: they live as
//! long as the page does.

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    Window,
};

use crate::{
    DefaultAction, Handler, IntersectionHandler, IntersectionOptions, Trigger, UiEvent, View,
    Watch,
};

/// The live document of the current window
#[derive(Clone)]
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    /// Bind to the global window; `None` outside a browser context
    pub fn attach() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Run `f` once the document structure is parsed
    pub fn when_ready<F>(&self, f: F)
    where
        F: FnOnce(DomView) + 'static,
    {
        if !still_loading(&self.document.ready_state()) {
            f(self.clone());
            return;
        }

        let view = self.clone();
        let mut pending = Some(f);
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Some(f) = pending.take() {
                f(view.clone());
            }
        });
        let _ = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    }

    fn supports_intersection(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }
}

/// `document.readyState` before DOMContentLoaded
const LOADING: &str = "loading";

fn still_loading(ready_state: &str) -> bool {
    ready_state == LOADING
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl View for DomView {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector))
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn query_all_in(&self, scope: &Element, selector: &str) -> Vec<Element> {
        elements(scope.query_selector_all(selector))
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(Into::into)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().toggle(class).unwrap_or(false)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn set_checked(&self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn create(&self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(el) => Some(el),
            Err(err) => {
                log::debug!("[DOM] create_element({}) failed: {:?}", tag, err);
                None
            }
        }
    }

    fn append(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn insert_before(&self, parent: &Element, child: &Element, reference: &Element) {
        let reference: &web_sys::Node = reference;
        let _ = parent.insert_before(child, Some(reference));
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn listen(&self, node: &Element, trigger: Trigger, default: DefaultAction, handler: Handler) {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            if default == DefaultAction::Suppress {
                ev.prevent_default();
            }
            let event = UiEvent {
                key: ev.dyn_ref::<KeyboardEvent>().map(|k| k.key()),
                target_tag: ev
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .map(|el| el.tag_name().to_lowercase()),
            };
            handler(&event);
        });
        let _ = node.add_event_listener_with_callback(
            trigger.event_name(),
            callback.as_ref().unchecked_ref(),
        );
        callback.forget();
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn navigate(&self, path: &str) {
        if let Err(err) = self.window.location().set_href(path) {
            log::warn!("[DOM] navigation to {} failed: {:?}", path, err);
        }
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let _ = Timeout::new(delay_ms, task).forget();
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) {
        let _ = Interval::new(period_ms, task).forget();
    }

    fn observe_intersections(
        &self,
        nodes: &[Element],
        options: &IntersectionOptions,
        handler: IntersectionHandler<Element>,
    ) -> bool {
        if !self.supports_intersection() {
            return false;
        }

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    if handler(&target, entry.is_intersecting()) == Watch::Release {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());

        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(err) => {
                    log::debug!("[DOM] IntersectionObserver construction failed: {:?}", err);
                    return false;
                }
            };
        for node in nodes {
            observer.observe(node);
        }
        callback.forget();
        true
    }
}
