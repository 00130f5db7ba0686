//! Site Configuration
//!
//! Optional overrides embedded in the page:
//! `<script type="application/json" id="site-config">{ "routes": { ... } }</script>`
//! Any field left out keeps its default.

use serde::Deserialize;

use page_dom::View;

use crate::features::{filters, location_search, order_tracking, profile, testimonials};
use crate::notify::{self, ToastTiming};

/// Id of the inline JSON block
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub toast_visible_ms: u32,
    pub toast_exit_ms: u32,
    pub carousel_period_ms: u32,
    pub order_redirect_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            toast_visible_ms: notify::HOLD_MS,
            toast_exit_ms: notify::EXIT_MS,
            carousel_period_ms: testimonials::ROTATE_MS,
            order_redirect_ms: order_tracking::REDIRECT_DELAY_MS,
        }
    }
}

/// Shortest accepted delay or period
pub const MIN_DELAY_MS: u32 = 1;

impl Timing {
    /// Raise zero delays to `MIN_DELAY_MS`; a zero period would spin
    fn clamped(self) -> Self {
        Self {
            toast_visible_ms: self.toast_visible_ms.max(MIN_DELAY_MS),
            toast_exit_ms: self.toast_exit_ms.max(MIN_DELAY_MS),
            carousel_period_ms: self.carousel_period_ms.max(MIN_DELAY_MS),
            order_redirect_ms: self.order_redirect_ms.max(MIN_DELAY_MS),
        }
    }

    pub fn toast(&self) -> ToastTiming {
        ToastTiming { visible_ms: self.toast_visible_ms, exit_ms: self.toast_exit_ms }
    }
}

/// Navigation targets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub restaurants: String,
    pub order_tracking: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            restaurants: location_search::RESTAURANTS_PAGE.to_string(),
            order_tracking: order_tracking::TRACKING_PAGE.to_string(),
        }
    }
}

/// Selectors for buttons identified by purpose rather than label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Actions {
    pub apply_filters: String,
    pub save_profile: String,
}

impl Default for Actions {
    fn default() -> Self {
        Self {
            apply_filters: filters::APPLY_FILTERS.to_string(),
            save_profile: profile::SAVE_PROFILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub timing: Timing,
    pub routes: Routes,
    pub actions: Actions,
    /// Log at debug level instead of info
    pub verbose: bool,
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.timing = config.timing.clamped();
        Ok(config)
    }

    /// Read the page's config block, falling back to defaults
    pub fn load<V: View>(view: &V) -> Self {
        let Some(block) = view.by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let raw = view.text(&block);
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => {
                log::info!("[CONFIG] loaded overrides from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(err) => {
                log::warn!("[CONFIG] ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, err);
                Self::default()
            }
        }
    }
}
