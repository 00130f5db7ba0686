//! Location Search
//!
//! Hero search box: a non-empty location goes to the restaurant listing.

use std::rc::Rc;

use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;
use crate::notify::Severity;

pub const RESTAURANTS_PAGE: &str = "pages/restaurants.html";

pub fn init<V: View>(page: &Page<V>) {
    let view = &page.view;
    let (Some(input), Some(button)) = (view.by_id("location-input"), view.query(".btn-find")) else {
        return;
    };

    let search: Rc<dyn Fn()> = {
        let page = page.clone();
        let input = input.clone();
        Rc::new(move || {
            if page.view.value(&input).trim().is_empty() {
                page.notify("Please enter a location", Severity::Error);
            } else {
                page.view.navigate(&page.config.routes.restaurants);
            }
        })
    };

    let on_click = search.clone();
    view.listen(&button, Trigger::Click, DefaultAction::Keep, handler(move |_| on_click()));
    view.listen(
        &input,
        Trigger::KeyPress,
        DefaultAction::Keep,
        handler(move |ev| {
            if ev.is_enter() {
                search();
            }
        }),
    );
}
