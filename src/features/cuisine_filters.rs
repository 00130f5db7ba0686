//! Cuisine Filter Buttons
//!
//! Single-select button group.

use std::rc::Rc;

use page_dom::{handler, DefaultAction, Trigger, View};

use super::select_exclusive;
use crate::context::Page;

pub fn init<V: View>(page: &Page<V>) {
    let buttons = Rc::new(page.view.query_all(".cuisine-btn"));
    for button in buttons.iter() {
        let view = page.view.clone();
        let group = buttons.clone();
        let chosen = button.clone();
        page.view.listen(
            button,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| select_exclusive(&view, &group, &chosen)),
        );
    }
}
