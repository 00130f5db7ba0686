//! In-memory page for unit tests
//!
//! `FakeView` implements `View` over a small element tree with a virtual
//! clock. Selectors support tags, `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]`, comma lists and descendant combinators. Events fire only
//! the listeners registered on the dispatched node (no bubbling).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use page_dom::{
    DefaultAction, Handler, IntersectionHandler, IntersectionOptions, Trigger, UiEvent, View,
    Watch,
};

use crate::config::SiteConfig;
use crate::context::Page;

/// Empty fake page plus a `Page` context with default configuration
pub fn fake_page() -> (FakeView, Page<FakeView>) {
    let view = FakeView::new();
    let page = Page::new(view.clone(), SiteConfig::default());
    (view, page)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);
const HEAD: NodeId = NodeId(1);
const BODY: NodeId = NodeId(2);

#[derive(Default)]
struct FakeNode {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Every(u32, Box<dyn FnMut()>),
}

struct Timer {
    due: u64,
    seq: u64,
    task: TimerTask,
}

struct Listener {
    node: NodeId,
    trigger: Trigger,
    default: DefaultAction,
    handler: Handler,
}

struct Observer {
    watched: Vec<NodeId>,
    handler: IntersectionHandler<NodeId>,
}

#[derive(Default)]
struct FakeDom {
    nodes: Vec<FakeNode>,
    listeners: Vec<Listener>,
    timers: Vec<Timer>,
    observers: Vec<Observer>,
    observer_options: Vec<IntersectionOptions>,
    now: u64,
    seq: u64,
    navigations: Vec<String>,
    scrolled: Vec<NodeId>,
    resets: usize,
    no_intersection: bool,
}

impl FakeDom {
    fn node(&self, id: NodeId) -> &FakeNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut FakeNode {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, tag: &str) -> NodeId {
        self.nodes.push(FakeNode { tag: tag.to_lowercase(), ..Default::default() });
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ROOT {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }

    fn text(&self, id: NodeId) -> String {
        let mut out = self.node(id).text.clone();
        for child in &self.node(id).children {
            out.push_str(&self.text(*child));
        }
        out
    }

    fn matches_compound(&self, id: NodeId, compound: &Compound) -> bool {
        let node = self.node(id);
        if let Some(tag) = &compound.tag {
            if tag != "*" && *tag != node.tag {
                return false;
            }
        }
        if let Some(want) = &compound.id {
            if node.attrs.get("id") != Some(want) {
                return false;
            }
        }
        if !compound.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        compound.attrs.iter().all(|test| match test {
            AttrTest::Present(name) => node.attrs.contains_key(name),
            AttrTest::Equals(name, v) => node.attrs.get(name) == Some(v),
            AttrTest::Prefix(name, v) => node.attrs.get(name).is_some_and(|a| a.starts_with(v.as_str())),
        })
    }

    fn matches_chain(&self, id: NodeId, chain: &[Compound]) -> bool {
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        if !self.matches_compound(id, last) {
            return false;
        }
        let mut current = self.node(id).parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(ancestor) = current else {
                    return false;
                };
                current = self.node(ancestor).parent;
                if self.matches_compound(ancestor, compound) {
                    break;
                }
            }
        }
        true
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.iter().any(|chain| self.matches_chain(id, chain))
    }
}

// ========================
// Selector parsing
// ========================

#[derive(Debug, Clone, PartialEq)]
enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

type Selector = Vec<Vec<Compound>>;

/// Split at `sep` outside brackets and quotes
fn split_top_level(input: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in input.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                current.push(c);
            }
            (None, '[') => {
                depth += 1;
                current.push(c);
            }
            (None, ']') => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            (None, c) if depth == 0 && is_sep(c) => {
                if !current.trim().is_empty() {
                    parts.push(current.trim().to_string());
                }
                current.clear();
            }
            (None, c) => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(input: &str) -> Compound {
    let mut compound = Compound::default();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    let read_ident = |i: &mut usize| {
        let start = *i;
        while *i < chars.len() && is_ident(chars[*i]) {
            *i += 1;
        }
        chars[start..*i].iter().collect::<String>()
    };

    if i < chars.len() && chars[i] == '*' {
        compound.tag = Some("*".to_string());
        i += 1;
    } else if i < chars.len() && is_ident(chars[i]) {
        compound.tag = Some(read_ident(&mut i).to_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '.' => {
                i += 1;
                compound.classes.push(read_ident(&mut i));
            }
            '#' => {
                i += 1;
                compound.id = Some(read_ident(&mut i));
            }
            '[' => {
                let start = i + 1;
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }
                let inner: String = chars[start..i.min(chars.len())].iter().collect();
                i += 1;
                compound.attrs.push(parse_attr(&inner));
            }
            _ => i += 1,
        }
    }
    compound
}

fn parse_attr(inner: &str) -> AttrTest {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if let Some((name, value)) = inner.split_once("^=") {
        AttrTest::Prefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = inner.split_once('=') {
        AttrTest::Equals(name.trim().to_string(), unquote(value))
    } else {
        AttrTest::Present(inner.trim().to_string())
    }
}

fn parse_selector(selector: &str) -> Selector {
    split_top_level(selector, |c| c == ',')
        .iter()
        .map(|chain| {
            split_top_level(chain, char::is_whitespace)
                .iter()
                .map(|part| parse_compound(part))
                .collect()
        })
        .collect()
}

// ========================
// FakeView
// ========================

/// In-memory page: `<html>` with `<head>` and `<body>`
#[derive(Clone)]
pub struct FakeView {
    dom: Rc<RefCell<FakeDom>>,
}

impl FakeView {
    pub fn new() -> Self {
        let mut dom = FakeDom::default();
        let root = dom.push("html");
        let head = dom.push("head");
        let body = dom.push("body");
        for child in [head, body] {
            dom.node_mut(child).parent = Some(root);
            dom.node_mut(root).children.push(child);
        }
        Self { dom: Rc::new(RefCell::new(dom)) }
    }

    /// Environment without intersection support
    pub fn without_intersection(self) -> Self {
        self.dom.borrow_mut().no_intersection = true;
        self
    }

    /// Append an element described as `tag#id.class[attr="v"]` under `parent`
    pub fn add(&self, parent: &NodeId, spec: &str) -> NodeId {
        let compound = parse_compound(spec);
        let mut dom = self.dom.borrow_mut();
        let id = dom.push(compound.tag.as_deref().unwrap_or("div"));
        {
            let node = dom.node_mut(id);
            node.classes = compound.classes;
            if let Some(el_id) = compound.id {
                node.attrs.insert("id".to_string(), el_id);
            }
            for attr in compound.attrs {
                let (name, value) = match attr {
                    AttrTest::Present(name) => (name, String::new()),
                    AttrTest::Equals(name, value) | AttrTest::Prefix(name, value) => (name, value),
                };
                node.attrs.insert(name, value);
            }
            node.parent = Some(*parent);
        }
        dom.node_mut(*parent).children.push(id);
        id
    }

    /// `add` followed by setting text content
    pub fn add_text(&self, parent: &NodeId, spec: &str, text: &str) -> NodeId {
        let id = self.add(parent, spec);
        self.dom.borrow_mut().node_mut(id).text = text.to_string();
        id
    }

    pub fn set_value(&self, node: &NodeId, value: &str) {
        self.dom.borrow_mut().node_mut(*node).value = value.to_string();
    }

    pub fn style_of(&self, node: &NodeId, property: &str) -> Option<String> {
        self.dom.borrow().node(*node).styles.get(property).cloned()
    }

    /// Text of every toast currently in the page
    pub fn toasts(&self) -> Vec<String> {
        self.query_all(".notification")
            .iter()
            .map(|toast| self.text(toast))
            .collect()
    }

    pub fn count(&self, selector: &str) -> usize {
        self.query_all(selector).len()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.dom.borrow().navigations.clone()
    }

    pub fn scrolled(&self) -> Vec<NodeId> {
        self.dom.borrow().scrolled.clone()
    }

    pub fn resets(&self) -> usize {
        self.dom.borrow().resets
    }

    pub fn observer_options(&self) -> Vec<IntersectionOptions> {
        self.dom.borrow().observer_options.clone()
    }

    pub fn is_observed(&self, node: &NodeId) -> bool {
        self.dom.borrow().observers.iter().any(|o| o.watched.contains(node))
    }

    pub fn listener_count(&self, node: &NodeId, trigger: Trigger) -> usize {
        self.dom
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.node == *node && l.trigger == trigger)
            .count()
    }

    /// Fire `trigger` on `node`; returns whether the default was suppressed
    pub fn dispatch(&self, node: &NodeId, trigger: Trigger, mut event: UiEvent) -> bool {
        let (handlers, suppressed) = {
            let dom = self.dom.borrow();
            if event.target_tag.is_none() {
                event.target_tag = Some(dom.node(*node).tag.clone());
            }
            let matching: Vec<&Listener> = dom
                .listeners
                .iter()
                .filter(|l| l.node == *node && l.trigger == trigger)
                .collect();
            let suppressed = matching.iter().any(|l| l.default == DefaultAction::Suppress);
            let handlers: Vec<Handler> = matching.iter().map(|l| l.handler.clone()).collect();
            (handlers, suppressed)
        };
        for handler in handlers {
            handler(&event);
        }
        suppressed
    }

    pub fn click(&self, node: &NodeId) -> bool {
        self.dispatch(node, Trigger::Click, UiEvent::default())
    }

    pub fn submit(&self, form: &NodeId) -> bool {
        self.dispatch(form, Trigger::Submit, UiEvent::default())
    }

    pub fn blur(&self, node: &NodeId) {
        self.dispatch(node, Trigger::Blur, UiEvent::default());
    }

    pub fn press_key(&self, node: &NodeId, key: &str) {
        let event = UiEvent { key: Some(key.to_string()), target_tag: None };
        self.dispatch(node, Trigger::KeyPress, event);
    }

    /// Report `node` entering or leaving the viewport to every observer watching it
    pub fn intersect(&self, node: &NodeId, intersecting: bool) {
        let handlers: Vec<(usize, IntersectionHandler<NodeId>)> = self
            .dom
            .borrow()
            .observers
            .iter()
            .enumerate()
            .filter(|(_, o)| o.watched.contains(node))
            .map(|(i, o)| (i, o.handler.clone()))
            .collect();
        for (index, handler) in handlers {
            if handler(node, intersecting) == Watch::Release {
                self.dom.borrow_mut().observers[index].watched.retain(|n| n != node);
            }
        }
    }

    /// Move the virtual clock forward, running due timers in order
    pub fn advance(&self, ms: u64) {
        let target = self.dom.borrow().now + ms;
        loop {
            let next = {
                let mut dom = self.dom.borrow_mut();
                let position = dom
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                position.map(|i| {
                    let timer = dom.timers.remove(i);
                    dom.now = timer.due;
                    timer
                })
            };
            let Some(timer) = next else {
                break;
            };
            match timer.task {
                TimerTask::Once(task) => task(),
                TimerTask::Every(period, mut task) => {
                    task();
                    self.schedule(timer.due + u64::from(period), TimerTask::Every(period, task));
                }
            }
        }
        self.dom.borrow_mut().now = target;
    }

    fn schedule(&self, due: u64, task: TimerTask) {
        let mut dom = self.dom.borrow_mut();
        dom.seq += 1;
        let seq = dom.seq;
        dom.timers.push(Timer { due, seq, task });
    }
}

impl View for FakeView {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let parsed = parse_selector(selector);
        let dom = self.dom.borrow();
        std::iter::once(ROOT)
            .chain(dom.descendants(ROOT))
            .filter(|id| dom.matches(*id, &parsed))
            .collect()
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_in(scope, selector).into_iter().next()
    }

    fn query_all_in(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let parsed = parse_selector(selector);
        let dom = self.dom.borrow();
        dom.descendants(*scope)
            .into_iter()
            .filter(|id| dom.matches(*id, &parsed))
            .collect()
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector(selector);
        let dom = self.dom.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if dom.matches(id, &parsed) {
                return Some(id);
            }
            current = dom.node(id).parent;
        }
        None
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        let dom = self.dom.borrow();
        dom.descendants(ROOT)
            .into_iter()
            .find(|n| dom.node(*n).attrs.get("id").map(String::as_str) == Some(id))
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn head(&self) -> Option<NodeId> {
        Some(HEAD)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.dom.borrow().node(*node).classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut dom = self.dom.borrow_mut();
        let classes = &mut dom.node_mut(*node).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.dom.borrow_mut().node_mut(*node).classes.retain(|c| c != class);
    }

    fn toggle_class(&self, node: &NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let dom = self.dom.borrow();
        let node = dom.node(*node);
        if name == "class" {
            return Some(node.classes.join(" "));
        }
        node.attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut dom = self.dom.borrow_mut();
        let node = dom.node_mut(*node);
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.dom.borrow().text(*node)
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut dom = self.dom.borrow_mut();
        let children = std::mem::take(&mut dom.node_mut(*node).children);
        for child in children {
            dom.node_mut(child).parent = None;
        }
        dom.node_mut(*node).text = text.to_string();
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.dom
            .borrow_mut()
            .node_mut(*node)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn value(&self, node: &NodeId) -> String {
        self.dom.borrow().node(*node).value.clone()
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.dom.borrow().node(*node).checked
    }

    fn set_checked(&self, node: &NodeId, checked: bool) {
        self.dom.borrow_mut().node_mut(*node).checked = checked;
    }

    fn reset_form(&self, form: &NodeId) {
        let mut dom = self.dom.borrow_mut();
        for id in dom.descendants(*form) {
            let node = dom.node_mut(id);
            node.value.clear();
            node.checked = false;
        }
        dom.resets += 1;
    }

    fn create(&self, tag: &str) -> Option<NodeId> {
        Some(self.dom.borrow_mut().push(tag))
    }

    fn append(&self, parent: &NodeId, child: &NodeId) {
        let mut dom = self.dom.borrow_mut();
        dom.detach(*child);
        dom.node_mut(*child).parent = Some(*parent);
        dom.node_mut(*parent).children.push(*child);
    }

    fn insert_before(&self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        let mut dom = self.dom.borrow_mut();
        dom.detach(*child);
        dom.node_mut(*child).parent = Some(*parent);
        let siblings = &mut dom.node_mut(*parent).children;
        match siblings.iter().position(|c| c == reference) {
            Some(index) => siblings.insert(index, *child),
            None => siblings.push(*child),
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.dom.borrow().node(*node).parent
    }

    fn remove(&self, node: &NodeId) {
        self.dom.borrow_mut().detach(*node);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.dom.borrow().is_connected(*node)
    }

    fn listen(&self, node: &NodeId, trigger: Trigger, default: DefaultAction, handler: Handler) {
        self.dom
            .borrow_mut()
            .listeners
            .push(Listener { node: *node, trigger, default, handler });
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.dom.borrow_mut().scrolled.push(*node);
    }

    fn navigate(&self, path: &str) {
        self.dom.borrow_mut().navigations.push(path.to_string());
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let due = self.dom.borrow().now + u64::from(delay_ms);
        self.schedule(due, TimerTask::Once(task));
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) {
        let due = self.dom.borrow().now + u64::from(period_ms);
        self.schedule(due, TimerTask::Every(period_ms, task));
    }

    fn observe_intersections(
        &self,
        nodes: &[NodeId],
        options: &IntersectionOptions,
        handler: IntersectionHandler<NodeId>,
    ) -> bool {
        let mut dom = self.dom.borrow_mut();
        if dom.no_intersection {
            return false;
        }
        dom.observer_options.push(options.clone());
        dom.observers.push(Observer { watched: nodes.to_vec(), handler });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_match_descendants_and_lists() {
        let view = FakeView::new();
        let body = view.body().unwrap();
        let nav = view.add(&body, "ul.nav-menu");
        let link = view.add(&nav, "a[href=\"#orders\"]");
        let stray = view.add(&body, "a[href=\"/home\"]");

        assert_eq!(view.query_all(".nav-menu a"), vec![link]);
        assert_eq!(view.query_all("a[href^=\"#\"]"), vec![link]);
        assert_eq!(view.query_all("ul, a[href=\"/home\"]"), vec![nav, stray]);
    }

    #[test]
    fn test_timers_run_in_due_order() {
        let view = FakeView::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        view.after(300, Box::new(move || l.borrow_mut().push("once")));
        let l = log.clone();
        view.every(200, Box::new(move || l.borrow_mut().push("tick")));

        view.advance(450);
        assert_eq!(*log.borrow(), vec!["tick", "once", "tick"]);
    }

    #[test]
    fn test_set_text_detaches_children() {
        let view = FakeView::new();
        let body = view.body().unwrap();
        let badge = view.add(&body, "span.cart-count");
        let inner = view.add_text(&badge, "i", "x");

        view.set_text(&badge, "3");
        assert_eq!(view.text(&badge), "3");
        assert!(!view.is_connected(&inner));
    }
}
