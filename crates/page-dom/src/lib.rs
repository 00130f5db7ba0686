//! Page DOM Accessor
//!
//! Capability trait over a rendered page: element queries, class/text state,
//! event registration, timers, scrolling, navigation and intersection watching.
//! `DomView` binds it to the browser document; tests supply their own view.

use std::rc::Rc;

mod dom;

pub use dom::DomView;

/// Event kinds a handler can be registered for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    Submit,
    Blur,
    KeyPress,
}

impl Trigger {
    /// DOM event name
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Submit => "submit",
            Trigger::Blur => "blur",
            Trigger::KeyPress => "keypress",
        }
    }
}

/// Whether the browser's default action runs after the handler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultAction {
    Keep,
    Suppress,
}

/// What a handler sees of the event that fired it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiEvent {
    /// `KeyboardEvent.key` for key presses
    pub key: Option<String>,
    /// Lowercase tag of the element the event originated on
    pub target_tag: Option<String>,
}

impl UiEvent {
    pub fn is_enter(&self) -> bool {
        self.key.as_deref() == Some("Enter")
    }
}

pub type Handler = Rc<dyn Fn(&UiEvent)>;

/// Box a closure as a `Handler`
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&UiEvent) + 'static,
{
    Rc::new(f)
}

/// Returned by intersection handlers: keep watching the element or stop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Release,
}

/// Viewport intersection settings
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    /// Negative values shrink the viewport from the bottom
    pub bottom_margin_px: i32,
}

impl IntersectionOptions {
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.bottom_margin_px)
    }
}

pub type IntersectionHandler<N> = Rc<dyn Fn(&N, bool) -> Watch>;

/// Access to a rendered page.
///
/// Every method is infallible from the caller's point of view: lookups return
/// `Option`/empty collections and mutations on unsuitable nodes are ignored.
pub trait View: Clone + 'static {
    type Node: Clone + 'static;

    // ========================
    // Queries
    // ========================

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn query_all_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// Nearest inclusive ancestor matching `selector`
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
    fn head(&self) -> Option<Self::Node>;

    // ========================
    // Node state
    // ========================

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Flips `class`, returning whether it is now present
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Current value of an input, select or textarea; empty for anything else
    fn value(&self, node: &Self::Node) -> String;
    fn is_checked(&self, node: &Self::Node) -> bool;
    fn set_checked(&self, node: &Self::Node, checked: bool);
    fn reset_form(&self, form: &Self::Node);

    // ========================
    // Structure
    // ========================

    fn create(&self, tag: &str) -> Option<Self::Node>;
    fn append(&self, parent: &Self::Node, child: &Self::Node);
    fn insert_before(&self, parent: &Self::Node, child: &Self::Node, reference: &Self::Node);
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn remove(&self, node: &Self::Node);
    fn is_connected(&self, node: &Self::Node) -> bool;

    // ========================
    // Behaviour
    // ========================

    fn listen(&self, node: &Self::Node, trigger: Trigger, default: DefaultAction, handler: Handler);
    fn scroll_into_view(&self, node: &Self::Node);
    fn navigate(&self, path: &str);
    /// Run `task` once after `delay_ms`
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
    /// Run `task` every `period_ms` for the lifetime of the page
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>);
    /// Watch `nodes` entering/leaving the viewport. Returns `false` when the
    /// environment has no intersection support and nothing was registered.
    fn observe_intersections(
        &self,
        nodes: &[Self::Node],
        options: &IntersectionOptions,
        handler: IntersectionHandler<Self::Node>,
    ) -> bool;
}
