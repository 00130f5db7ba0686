//! Scroll-Triggered Animations
//!
//! Cards fade in the first time they scroll into view, then stop being
//! watched.

use std::rc::Rc;

use page_dom::{IntersectionOptions, View, Watch};

use crate::context::Page;

const ANIMATED: &str = ".feature-card, .step, .cuisine-card, .restaurant-card, .testimonial-card";

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_BOTTOM_MARGIN_PX: i32 = -50;

pub fn init<V: View>(page: &Page<V>) {
    let targets = page.view.query_all(ANIMATED);
    if targets.is_empty() {
        return;
    }

    let options = IntersectionOptions {
        threshold: REVEAL_THRESHOLD,
        bottom_margin_px: REVEAL_BOTTOM_MARGIN_PX,
    };
    let view = page.view.clone();
    let watching = page.view.observe_intersections(
        &targets,
        &options,
        Rc::new(move |node: &V::Node, intersecting: bool| {
            if !intersecting {
                return Watch::Keep;
            }
            view.add_class(node, "animated");
            view.add_class(node, "fade-in");
            Watch::Release
        }),
    );
    if !watching {
        log::debug!("[ANIM] no intersection support, {} cards left static", targets.len());
    }
}
