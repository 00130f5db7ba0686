//! Favorite (heart) buttons

use leptos::prelude::{GetUntracked, RwSignal, Update};
use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;

const FAVORITED: &str = "favorited";

pub fn init<V: View>(page: &Page<V>) {
    for button in page.view.query_all(".favorite-btn, .btn-heart") {
        let favorited = RwSignal::new(page.view.has_class(&button, FAVORITED));
        let view = page.view.clone();
        let target = button.clone();
        page.view.listen(
            &button,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| {
                favorited.update(|f| *f = !*f);
                render(&view, &target, favorited.get_untracked());
            }),
        );
    }
}

/// Button marker plus outline (`far`) / solid (`fas`) icon swap
fn render<V: View>(view: &V, button: &V::Node, favorited: bool) {
    let icon = view.query_in(button, "i");
    if favorited {
        view.add_class(button, FAVORITED);
        if let Some(icon) = icon {
            view.remove_class(&icon, "far");
            view.add_class(&icon, "fas");
            view.add_class(&icon, FAVORITED);
        }
    } else {
        view.remove_class(button, FAVORITED);
        if let Some(icon) = icon {
            view.remove_class(&icon, "fas");
            view.remove_class(&icon, FAVORITED);
            view.add_class(&icon, "far");
        }
    }
}
