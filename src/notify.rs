//! Toast Notifications
//!
//! A single transient message in the top-right corner. Showing a toast
//! removes the current one first, so at most one is ever in the page. Each
//! toast holds for `visible_ms`, plays its exit animation for `exit_ms` and
//! then removes itself, unless a newer toast has already replaced it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use page_dom::View;

pub const HOLD_MS: u32 = 3000;
pub const EXIT_MS: u32 = 300;

/// Marker id of the injected keyframes block
pub const STYLE_ID: &str = "notification-styles";

const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; padding: 15px 20px; \
    border-radius: 5px; color: white; z-index: 10000; \
    box-shadow: 0 5px 15px rgba(0,0,0,0.2); animation: slideInRight 0.3s ease;";

const EXIT_ANIMATION: &str = "slideOutRight 0.3s ease";

const KEYFRAMES: &str = "
@keyframes slideInRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOutRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
";

/// Visual style of a toast
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    /// Unknown names fall back to `Info`
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "#4CAF50",
            Severity::Error => "#F44336",
            Severity::Warning => "#FF9800",
            Severity::Info => "#2196F3",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastTiming {
    pub visible_ms: u32,
    pub exit_ms: u32,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self { visible_ms: HOLD_MS, exit_ms: EXIT_MS }
    }
}

/// The toast currently in the page
struct Shown<N> {
    generation: u64,
    node: N,
}

/// Toast presenter; clones share the same slot
#[derive(Clone)]
pub struct Notifier<V: View> {
    view: V,
    timing: ToastTiming,
    current: Rc<RefCell<Option<Shown<V::Node>>>>,
    generation: Rc<Cell<u64>>,
}

impl<V: View> Notifier<V> {
    pub fn new(view: V, timing: ToastTiming) -> Self {
        Self {
            view,
            timing,
            current: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Show `message`, replacing any visible toast. Returns immediately.
    pub fn notify(&self, message: &str, severity: Severity) {
        self.ensure_styles();
        self.dismiss_current();

        let Some(body) = self.view.body() else {
            log::debug!("[TOAST] no <body>, dropping: {}", message);
            return;
        };
        let Some(toast) = self.view.create("div") else {
            return;
        };
        self.view.set_attribute(
            &toast,
            "class",
            &format!("notification notification-{}", severity.name()),
        );
        self.view.set_text(&toast, message);
        self.view.set_attribute(&toast, "style", TOAST_STYLE);
        self.view.set_style(&toast, "background-color", severity.color());
        self.view.append(&body, &toast);

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.current.borrow_mut() = Some(Shown { generation, node: toast });

        let this = self.clone();
        self.view.after(
            self.timing.visible_ms,
            Box::new(move || this.begin_exit(generation)),
        );
    }

    /// The toast of `generation`, if it is still the current one and in the page
    fn live(&self, generation: u64) -> Option<V::Node> {
        self.current
            .borrow()
            .as_ref()
            .filter(|shown| shown.generation == generation)
            .map(|shown| shown.node.clone())
            .filter(|node| self.view.is_connected(node))
    }

    fn begin_exit(&self, generation: u64) {
        let Some(toast) = self.live(generation) else {
            return;
        };
        self.view.set_style(&toast, "animation", EXIT_ANIMATION);

        let this = self.clone();
        self.view.after(self.timing.exit_ms, Box::new(move || this.finish(generation)));
    }

    fn finish(&self, generation: u64) {
        let Some(toast) = self.live(generation) else {
            return;
        };
        self.view.remove(&toast);
        *self.current.borrow_mut() = None;
    }

    fn dismiss_current(&self) {
        let previous = self.current.borrow_mut().take();
        if let Some(shown) = previous {
            self.view.remove(&shown.node);
        }
    }

    fn ensure_styles(&self) {
        if self.view.by_id(STYLE_ID).is_some() {
            return;
        }
        let Some(host) = self.view.head().or_else(|| self.view.body()) else {
            return;
        };
        let Some(style) = self.view.create("style") else {
            return;
        };
        self.view.set_attribute(&style, "id", STYLE_ID);
        self.view.set_text(&style, KEYFRAMES);
        self.view.append(&host, &style);
    }
}
