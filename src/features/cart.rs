//! Add-to-Cart Buttons
//!
//! Confirms the addition with a toast and bumps the header cart badge.

use leptos::prelude::{GetUntracked, RwSignal, Update};
use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;
use crate::notify::Severity;

const ADD_BUTTONS: &str = ".btn-add-to-cart, .add-to-cart";
const CART_ICON: &str = ".cart-icon";
const BADGE_CLASS: &str = "cart-count";

/// Badge text as a count; anything unparsable counts as zero
pub fn parse_count(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

pub fn init<V: View>(page: &Page<V>) {
    let buttons = page.view.query_all(ADD_BUTTONS);
    if buttons.is_empty() {
        return;
    }

    let initial = page
        .view
        .query(".cart-icon .cart-count")
        .map(|badge| parse_count(&page.view.text(&badge)))
        .unwrap_or(0);
    let count = RwSignal::new(initial);

    for button in buttons {
        let ctx = page.clone();
        let source = button.clone();
        page.view.listen(
            &button,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| {
                if let Some(message) = added_message(&ctx.view, &source) {
                    ctx.notify(&message, Severity::Success);
                }
                count.update(|n| *n = n.saturating_add(1));
                render_badge(&ctx.view, count.get_untracked());
            }),
        );
    }
}

/// Confirmation text from the enclosing menu item or restaurant card
fn added_message<V: View>(view: &V, button: &V::Node) -> Option<String> {
    let heading = |card: &V::Node, tag: &str| {
        view.query_in(card, tag)
            .map(|h| view.text(&h).trim().to_string())
            .unwrap_or_default()
    };

    if let Some(item) = view.closest(button, ".menu-item") {
        return Some(format!("Added {} to cart", heading(&item, "h4")));
    }
    let restaurant = view.closest(button, ".restaurant-card")?;
    Some(format!("Added item from {}", heading(&restaurant, "h3")))
}

fn render_badge<V: View>(view: &V, count: u32) {
    let Some(icon) = view.query(CART_ICON) else {
        return;
    };
    let badge = match view.query_in(&icon, &format!(".{}", BADGE_CLASS)) {
        Some(badge) => badge,
        None => {
            let Some(badge) = view.create("span") else {
                return;
            };
            view.add_class(&badge, BADGE_CLASS);
            view.append(&icon, &badge);
            badge
        }
    };
    view.set_text(&badge, &count.to_string());
}
