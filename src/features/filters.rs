//! Restaurant Listing Filters
//!
//! Whole filter rows are clickable, and the apply button is located by its
//! `data-action` rather than its label. Rows that are (or sit inside) a
//! `<label>` are left to the browser.

use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;
use crate::notify::Severity;

pub const APPLY_FILTERS: &str = "[data-action=\"apply-filters\"]";

pub fn init<V: View>(page: &Page<V>) {
    for option in page.view.query_all(".filter-option") {
        // label activation already toggles the input
        if page.view.closest(&option, "label").is_some() {
            continue;
        }
        let view = page.view.clone();
        let row = option.clone();
        page.view.listen(
            &option,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |ev| {
                // the checkbox toggles itself when clicked directly
                if ev.target_tag.as_deref() == Some("input") {
                    return;
                }
                if let Some(input) = view.query_in(&row, "input") {
                    view.set_checked(&input, !view.is_checked(&input));
                }
            }),
        );
    }

    for button in page.view.query_all(&page.config.actions.apply_filters) {
        let ctx = page.clone();
        page.view.listen(
            &button,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| ctx.notify("Filters applied!", Severity::Success)),
        );
    }
}
