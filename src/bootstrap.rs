//! Page Bootstrap
//!
//! Wires every feature module against one view, in a fixed order.

use page_dom::View;

use crate::config::SiteConfig;
use crate::context::Page;
use crate::features::{
    cart, cuisine_filters, favorites, filters, form_validation, location_search, mobile_menu,
    order_tracking, profile, quantity, scroll_reveal, smooth_scroll, tabs, testimonials,
};
use crate::logging;

type Init<V> = fn(&Page<V>);

/// Module wiring order
fn modules<V: View>() -> [(&'static str, Init<V>); 14] {
    [
        ("location-search", location_search::init),
        ("cuisine-filters", cuisine_filters::init),
        ("mobile-menu", mobile_menu::init),
        ("cart", cart::init),
        ("smooth-scroll", smooth_scroll::init),
        ("animations", scroll_reveal::init),
        ("testimonials", testimonials::init),
        ("form-validation", form_validation::init),
        ("tabs", tabs::init),
        ("quantity", quantity::init),
        ("favorites", favorites::init),
        ("filters", filters::init),
        ("order-tracking", order_tracking::init),
        ("profile", profile::init),
    ]
}

/// Read the page's config block and wire everything
pub fn start<V: View>(view: V) -> Page<V> {
    let config = SiteConfig::load(&view);
    run(view, config)
}

pub fn run<V: View>(view: V, config: SiteConfig) -> Page<V> {
    logging::set_verbose(config.verbose);
    let page = Page::new(view, config);
    for (name, init) in modules::<V>() {
        log::debug!("[BOOT] wiring {}", name);
        init(&page);
    }
    log::info!("[BOOT] page ready");
    page
}
