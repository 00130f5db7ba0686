//! Foodpanda Storefront Frontend Entry Point

mod bootstrap;
mod config;
mod context;
mod features;
mod logging;
mod notify;
#[cfg(test)]
mod testing;

use page_dom::DomView;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    let Some(view) = DomView::attach() else {
        log::error!("[BOOT] no window/document, nothing to wire");
        return;
    };
    view.when_ready(|view| {
        bootstrap::start(view);
    });
}
