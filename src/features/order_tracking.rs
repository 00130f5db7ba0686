//! Checkout "Place order"
//!
//! Requires the terms checkbox (when present), then hands over to the
//! tracking page after a short confirmation.

use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;
use crate::notify::Severity;

pub const TRACKING_PAGE: &str = "pages/order-tracking.html";
pub const REDIRECT_DELAY_MS: u32 = 2000;

pub fn init<V: View>(page: &Page<V>) {
    let Some(button) = page.view.query(".btn-place-order") else {
        return;
    };
    let ctx = page.clone();
    page.view.listen(
        &button,
        Trigger::Click,
        DefaultAction::Keep,
        handler(move |_| place_order(&ctx)),
    );
}

fn place_order<V: View>(page: &Page<V>) {
    if let Some(terms) = page.view.by_id("terms") {
        if !page.view.is_checked(&terms) {
            page.notify("Please agree to the terms and conditions", Severity::Error);
            return;
        }
    }

    page.notify(
        "Order placed successfully! Redirecting to tracking page...",
        Severity::Success,
    );
    let view = page.view.clone();
    let destination = page.config.routes.order_tracking.clone();
    page.view.after(
        page.config.timing.order_redirect_ms,
        Box::new(move || view.navigate(&destination)),
    );
}
