//! Testimonial Carousel
//!
//! Shows one testimonial at a time and rotates through them forever.

use leptos::prelude::{GetUntracked, RwSignal, Update};
use page_dom::View;

use crate::context::Page;

pub const ROTATE_MS: u32 = 5000;

/// Index after `current` in a ring of `count` cards
pub fn next_index(current: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (current + 1) % count
}

pub fn init<V: View>(page: &Page<V>) {
    let cards = page.view.query_all(".testimonial-card");
    if cards.is_empty() {
        return;
    }

    let index = RwSignal::new(0usize);
    show(&page.view, &cards, 0);

    let view = page.view.clone();
    page.view.every(
        page.config.timing.carousel_period_ms,
        Box::new(move || {
            index.update(|i| *i = next_index(*i, cards.len()));
            show(&view, &cards, index.get_untracked());
        }),
    );
}

fn show<V: View>(view: &V, cards: &[V::Node], visible: usize) {
    for (i, card) in cards.iter().enumerate() {
        let display = if i == visible { "block" } else { "none" };
        view.set_style(card, "display", display);
    }
}
