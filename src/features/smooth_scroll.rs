//! In-page anchor links scroll smoothly instead of jumping.

use page_dom::{handler, DefaultAction, Trigger, View};

use super::fragment_id;
use crate::context::Page;

pub fn init<V: View>(page: &Page<V>) {
    for anchor in page.view.query_all("a[href^=\"#\"]") {
        let view = page.view.clone();
        let link = anchor.clone();
        page.view.listen(
            &anchor,
            Trigger::Click,
            DefaultAction::Suppress,
            handler(move |_| {
                let target = view
                    .attribute(&link, "href")
                    .as_deref()
                    .and_then(fragment_id)
                    .and_then(|id| view.by_id(id));
                if let Some(target) = target {
                    view.scroll_into_view(&target);
                }
            }),
        );
    }
}
