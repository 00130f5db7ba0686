//! Profile Page
//!
//! Save confirmation plus sidebar navigation between profile sections.

use std::rc::Rc;

use page_dom::{handler, DefaultAction, Trigger, View};

use super::{fragment_id, select_exclusive, ACTIVE};
use crate::context::Page;
use crate::notify::Severity;

pub const SAVE_PROFILE: &str = "[data-action=\"save-profile\"]";

pub fn init<V: View>(page: &Page<V>) {
    for button in page.view.query_all(&page.config.actions.save_profile) {
        let ctx = page.clone();
        page.view.listen(
            &button,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| ctx.notify("Profile updated successfully!", Severity::Success)),
        );
    }

    let links = Rc::new(page.view.query_all(".nav-menu a"));
    for link in links.iter() {
        let view = page.view.clone();
        let group = links.clone();
        let chosen = link.clone();
        page.view.listen(
            link,
            Trigger::Click,
            DefaultAction::Suppress,
            handler(move |_| {
                select_exclusive(&view, &group, &chosen);
                for section in view.query_all(".section") {
                    view.remove_class(&section, ACTIVE);
                }
                let target = view
                    .attribute(&chosen, "href")
                    .as_deref()
                    .and_then(fragment_id)
                    .and_then(|id| view.by_id(id));
                if let Some(section) = target {
                    view.add_class(&section, ACTIVE);
                }
            }),
        );
    }
}
