//! Restaurant Page Tabs
//!
//! Each `.tab-btn` names its panel via `data-tab`; buttons without one are
//! not part of the group.

use std::rc::Rc;

use page_dom::{handler, DefaultAction, Trigger, View};

use super::{select_exclusive, ACTIVE};
use crate::context::Page;

const TAB_PANELS: &str = ".menu-section, .about-section, .reviews-section, .photos-section";

pub fn init<V: View>(page: &Page<V>) {
    let tabs = Rc::new(page.view.query_all(".tab-btn[data-tab]"));
    for tab in tabs.iter() {
        let view = page.view.clone();
        let group = tabs.clone();
        let chosen = tab.clone();
        page.view.listen(
            tab,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| {
                select_exclusive(&view, &group, &chosen);
                for panel in view.query_all(TAB_PANELS) {
                    view.remove_class(&panel, ACTIVE);
                }
                let target = view
                    .attribute(&chosen, "data-tab")
                    .and_then(|id| view.by_id(&id));
                if let Some(panel) = target {
                    view.add_class(&panel, ACTIVE);
                }
            }),
        );
    }
}
