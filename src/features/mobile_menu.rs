//! Mobile Menu Toggle
//!
//! Adds a hamburger button to the header that flips `mobile-menu-open` on
//! `<body>`.

use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;

const BUTTON_CLASS: &str = "mobile-menu-btn";
const OPEN_CLASS: &str = "mobile-menu-open";
const WIRED_ATTR: &str = "data-menu-wired";

pub fn init<V: View>(page: &Page<V>) {
    let view = &page.view;
    let Some(header) = view.query("header") else {
        return;
    };

    let button = match view.query_in(&header, &format!(".{}", BUTTON_CLASS)) {
        Some(existing) if view.attribute(&existing, WIRED_ATTR).is_some() => return,
        Some(existing) => existing,
        None => match create_button(view, &header) {
            Some(created) => created,
            None => return,
        },
    };
    view.set_attribute(&button, WIRED_ATTR, "true");

    let view = view.clone();
    page.view.listen(
        &button,
        Trigger::Click,
        DefaultAction::Keep,
        handler(move |_| {
            if let Some(body) = view.body() {
                view.toggle_class(&body, OPEN_CLASS);
            }
        }),
    );
}

/// `<button class="mobile-menu-btn"><i class="fas fa-bars"></i></button>`,
/// placed before `.header-actions` or at the end of the header
fn create_button<V: View>(view: &V, header: &V::Node) -> Option<V::Node> {
    let button = view.create("button")?;
    view.set_attribute(&button, "class", BUTTON_CLASS);
    view.set_attribute(&button, "aria-label", "Toggle menu");
    if let Some(icon) = view.create("i") {
        view.set_attribute(&icon, "class", "fas fa-bars");
        view.append(&button, &icon);
    }

    let actions = view.query_in(header, ".header-actions");
    match actions.as_ref().and_then(|a| view.parent(a).map(|p| (p, a))) {
        Some((parent, actions)) => view.insert_before(&parent, &button, actions),
        None => view.append(header, &button),
    }
    Some(button)
}
