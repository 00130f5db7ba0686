//! Quantity Steppers
//!
//! Each `.quantity-selector` owns a typed counter. The `.quantity-amount`
//! text is only ever written from it, never read back after startup.

use std::fmt;

use leptos::prelude::{GetUntracked, RwSignal, Update};
use page_dom::{handler, DefaultAction, Trigger, View};

use crate::context::Page;

/// Item count, never below one
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: Quantity = Quantity(1);

    pub fn new(value: u32) -> Self {
        Self(value.max(Self::MIN.0))
    }

    /// Seed from displayed text; unparsable text starts at the minimum
    pub fn parse(text: &str) -> Self {
        text.trim().parse().map(Self::new).unwrap_or(Self::MIN)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn init<V: View>(page: &Page<V>) {
    for selector in page.view.query_all(".quantity-selector") {
        wire(&page.view, &selector);
    }
}

fn wire<V: View>(view: &V, selector: &V::Node) {
    let (Some(minus), Some(plus), Some(amount)) = (
        view.query_in(selector, ".quantity-minus"),
        view.query_in(selector, ".quantity-plus"),
        view.query_in(selector, ".quantity-amount"),
    ) else {
        return;
    };

    let quantity = RwSignal::new(Quantity::parse(&view.text(&amount)));
    view.set_text(&amount, &quantity.get_untracked().to_string());

    let steps: [(V::Node, fn(Quantity) -> Quantity); 2] =
        [(minus, Quantity::decrement), (plus, Quantity::increment)];
    for (button, step) in steps {
        let view_ = view.clone();
        let amount = amount.clone();
        view.listen(
            &button,
            Trigger::Click,
            DefaultAction::Keep,
            handler(move |_| {
                quantity.update(|q| *q = step(*q));
                view_.set_text(&amount, &quantity.get_untracked().to_string());
            }),
        );
    }
}
