//! Page Features
//!
//! One module per behaviour. Each exposes `init(&Page<V>)`, which looks up
//! its elements and registers handlers. Absent elements mean no work.
//!
//! Widget state (cart count, quantities, carousel index, favorite flags) is
//! held in `RwSignal`s created with no reactive owner. They live as long as
//! the page, are read with `get_untracked` and have no subscribers; the view
//! is written by the handler that changes them.

pub mod cart;
pub mod cuisine_filters;
pub mod favorites;
pub mod filters;
pub mod form_validation;
pub mod location_search;
pub mod mobile_menu;
pub mod order_tracking;
pub mod profile;
pub mod quantity;
pub mod scroll_reveal;
pub mod smooth_scroll;
pub mod tabs;
pub mod testimonials;

use page_dom::View;

/// Selection marker within an exclusive group
pub(crate) const ACTIVE: &str = "active";

/// Clear `active` across `group`, then set it on `chosen`
pub(crate) fn select_exclusive<V: View>(view: &V, group: &[V::Node], chosen: &V::Node) {
    for node in group {
        view.remove_class(node, ACTIVE);
    }
    view.add_class(chosen, ACTIVE);
}

/// Element id named by an href's fragment (`"page.html#reviews"` -> `"reviews"`)
pub(crate) fn fragment_id(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}
