//! Page Context
//!
//! Shared handles passed to every feature module.

use std::rc::Rc;

use page_dom::View;

use crate::config::SiteConfig;
use crate::notify::{Notifier, Severity};

/// View, toast presenter and configuration for one page
#[derive(Clone)]
pub struct Page<V: View> {
    pub view: V,
    pub notifier: Notifier<V>,
    pub config: Rc<SiteConfig>,
}

impl<V: View> Page<V> {
    pub fn new(view: V, config: SiteConfig) -> Self {
        let notifier = Notifier::new(view.clone(), config.timing.toast());
        Self { view, notifier, config: Rc::new(config) }
    }

    /// Show a toast
    pub fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }
}
