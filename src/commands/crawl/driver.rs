use std::fmt::Display;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Faults that end a crawl loop. Missing tables or article bodies on a
/// detail page are not faults; see [`super::FieldExtractor`].
#[derive(Debug, Error)]
pub enum NavigationFault {
    #[error("no element matches `{selector}` at index {index}")]
    ElementMissing { selector: String, index: usize },

    #[error("timed out after {waited:?} waiting for `{selector}`")]
    Timeout { selector: String, waited: Duration },

    #[error("browser failed to {action}: {message}")]
    Driver {
        action: &'static str,
        message: String,
    },
}

impl NavigationFault {
    pub fn missing(selector: &str, index: usize) -> Self {
        Self::ElementMissing {
            selector: selector.to_string(),
            index,
        }
    }

    pub fn driver(action: &'static str, err: impl Display) -> Self {
        Self::Driver {
            action,
            message: format!("{err:#}"),
        }
    }
}

/// The navigation capabilities the crawl loop needs from a browser.
///
/// Element lookups take a selector and an index every time; implementations
/// must resolve them against the live page rather than hand out handles that
/// a previous navigation may have invalidated.
pub trait PageDriver {
    fn open(&mut self, url: &str) -> Result<(), NavigationFault>;

    fn count_elements(&mut self, selector: &str) -> Result<usize, NavigationFault>;

    /// Follow the `index`-th match of `selector`, running its `onclick`
    /// script when it has one and clicking it otherwise.
    fn activate_element(&mut self, selector: &str, index: usize) -> Result<(), NavigationFault>;

    fn element_attribute(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, NavigationFault>;

    fn click(&mut self, selector: &str) -> Result<(), NavigationFault>;

    fn page_source(&mut self) -> Result<String, NavigationFault>;

    fn current_url(&mut self) -> Result<String, NavigationFault>;

    fn go_back(&mut self) -> Result<(), NavigationFault>;

    fn wait_for_element(&mut self, selector: &str, timeout: Duration)
    -> Result<(), NavigationFault>;

    fn release(&mut self) -> Result<(), NavigationFault>;
}

/// Owns a driver for the length of one crawl and releases it exactly once,
/// on `close` or, failing that, on drop.
pub struct Session<D: PageDriver> {
    driver: D,
    released: bool,
}

impl<D: PageDriver> Session<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            released: false,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn close(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match self.driver.release() {
            Ok(()) => debug!("navigation session released"),
            Err(err) => warn!(error = %err, "failed to release navigation session"),
        }
    }
}

impl<D: PageDriver> Drop for Session<D> {
    fn drop(&mut self) {
        self.close();
    }
}
