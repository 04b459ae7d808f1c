use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::info;

use super::driver::{NavigationFault, PageDriver};

const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(300);

/// [`PageDriver`] backed by a local Chrome/Chromium over the DevTools
/// protocol.
pub struct ChromeDriver {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl ChromeDriver {
    pub fn launch(headless: bool, chrome_path: Option<PathBuf>) -> Result<Self> {
        let browser = Browser::new(LaunchOptions {
            headless,
            path: chrome_path,
            idle_browser_timeout: IDLE_BROWSER_TIMEOUT,
            ..Default::default()
        })
        .context("failed to launch chrome")?;
        let tab = browser.new_tab().context("failed to open browser tab")?;

        info!(headless, "browser launched");
        Ok(Self {
            browser: Some(browser),
            tab,
        })
    }

    fn run_script(&self, action: &'static str, script: &str) -> Result<(), NavigationFault> {
        self.tab
            .evaluate(script, false)
            .map(|_| ())
            .map_err(|err| NavigationFault::driver(action, err))
    }
}

fn element_count(value: Option<serde_json::Value>) -> Result<usize, NavigationFault> {
    match value.as_ref().and_then(serde_json::Value::as_u64) {
        Some(count) => Ok(count as usize),
        None => Err(NavigationFault::driver(
            "count elements",
            format!("expected a numeric count, got {value:?}"),
        )),
    }
}

impl PageDriver for ChromeDriver {
    fn open(&mut self, url: &str) -> Result<(), NavigationFault> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map(|_| ())
            .map_err(|err| NavigationFault::driver("open start page", err))
    }

    fn count_elements(&mut self, selector: &str) -> Result<usize, NavigationFault> {
        let quoted = serde_json::to_string(selector)
            .map_err(|err| NavigationFault::driver("quote selector", err))?;
        let result = self
            .tab
            .evaluate(&format!("document.querySelectorAll({quoted}).length"), false)
            .map_err(|err| NavigationFault::driver("count elements", err))?;

        element_count(result.value)
    }

    fn activate_element(&mut self, selector: &str, index: usize) -> Result<(), NavigationFault> {
        let elements = self
            .tab
            .find_elements(selector)
            .map_err(|_| NavigationFault::missing(selector, index))?;
        let element = elements
            .get(index)
            .ok_or_else(|| NavigationFault::missing(selector, index))?;

        let onclick = element
            .get_attribute_value("onclick")
            .map_err(|err| NavigationFault::driver("read onclick", err))?;

        match onclick {
            // Inline handlers may `return`, so run them as a function body.
            Some(script) if !script.trim().is_empty() => {
                self.run_script("run item script", &format!("(function() {{ {script}\n}})()"))
            }
            _ => element
                .click()
                .map(|_| ())
                .map_err(|err| NavigationFault::driver("click item", err)),
        }
    }

    fn element_attribute(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, NavigationFault> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|_| NavigationFault::missing(selector, 0))?;
        element
            .get_attribute_value(attribute)
            .map_err(|err| NavigationFault::driver("read attribute", err))
    }

    fn click(&mut self, selector: &str) -> Result<(), NavigationFault> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|_| NavigationFault::missing(selector, 0))?;
        element
            .click()
            .map(|_| ())
            .map_err(|err| NavigationFault::driver("click", err))
    }

    fn page_source(&mut self) -> Result<String, NavigationFault> {
        self.tab
            .get_content()
            .map_err(|err| NavigationFault::driver("read page source", err))
    }

    fn current_url(&mut self) -> Result<String, NavigationFault> {
        Ok(self.tab.get_url())
    }

    fn go_back(&mut self) -> Result<(), NavigationFault> {
        self.run_script("navigate back", "window.history.back()")
    }

    fn wait_for_element(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), NavigationFault> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|_| NavigationFault::Timeout {
                selector: selector.to_string(),
                waited: timeout,
            })
    }

    fn release(&mut self) -> Result<(), NavigationFault> {
        let Some(browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = self
            .tab
            .close(true)
            .map(|_| ())
            .map_err(|err| NavigationFault::driver("close tab", err));
        drop(browser);
        closed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::element_count;
    use super::NavigationFault;

    #[test]
    fn element_count_reads_numeric_results() {
        assert_eq!(element_count(Some(json!(3))).expect("count"), 3);
        assert_eq!(element_count(Some(json!(0))).expect("count"), 0);
    }

    #[test]
    fn element_count_rejects_missing_or_non_numeric_results() {
        for value in [None, Some(json!("3")), Some(json!(null))] {
            assert!(matches!(
                element_count(value),
                Err(NavigationFault::Driver {
                    action: "count elements",
                    ..
                })
            ));
        }
    }
}
