use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::model::Record;
use crate::profile::TITLE;
use crate::site::ListingSelectors;

use super::driver::{NavigationFault, PageDriver, Session};
use super::extract::FieldExtractor;

#[derive(Debug, Clone, Copy)]
pub struct NavigationTiming {
    /// After entering a detail page and after returning to the list.
    pub settle: Duration,
    /// After clicking the next-page control.
    pub page_settle: Duration,
    /// Bound on waiting for the list container on a new page.
    pub list_wait: Duration,
}

#[derive(Debug)]
enum NavState {
    AtListPage {
        page: usize,
        next_item: usize,
        item_count: usize,
    },
    AtDetailPage {
        page: usize,
        item: usize,
        item_count: usize,
    },
    EndOfPages,
    PageLimit,
    Aborted(NavigationFault),
}

#[derive(Debug)]
pub enum Termination {
    EndOfPages,
    PageLimit,
    Aborted(NavigationFault),
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfPages => "end_of_pages",
            Self::PageLimit => "page_limit",
            Self::Aborted(_) => "aborted",
        }
    }

    pub fn fault(&self) -> Option<&NavigationFault> {
        match self {
            Self::Aborted(fault) => Some(fault),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct CrawlOutcome {
    pub records: Vec<Record>,
    pub pages_visited: usize,
    pub termination: Termination,
}

/// Walks list page → detail page → back, page after page, collecting one
/// record per detail page.
///
/// Any fault stops the walk where it is; records gathered up to that point
/// are kept. The session is released before `crawl` returns, whichever way
/// the walk ended.
pub struct ListingNavigator<'a, D: PageDriver> {
    session: Session<D>,
    listing: &'a ListingSelectors,
    extractor: &'a FieldExtractor,
    timing: NavigationTiming,
    max_pages: Option<usize>,
    records: Vec<Record>,
    pages_visited: usize,
}

impl<'a, D: PageDriver> ListingNavigator<'a, D> {
    pub fn new(
        session: Session<D>,
        listing: &'a ListingSelectors,
        extractor: &'a FieldExtractor,
        timing: NavigationTiming,
    ) -> Self {
        Self {
            session,
            listing,
            extractor,
            timing,
            max_pages: None,
            records: Vec::new(),
            pages_visited: 0,
        }
    }

    pub fn with_page_limit(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn crawl(mut self, start_url: &str) -> CrawlOutcome {
        let mut state = match self.enter(start_url) {
            Ok(state) => state,
            Err(fault) => NavState::Aborted(fault),
        };

        let termination = loop {
            state = match state {
                NavState::EndOfPages => break Termination::EndOfPages,
                NavState::PageLimit => break Termination::PageLimit,
                NavState::Aborted(fault) => {
                    error!(
                        error = %fault,
                        records = self.records.len(),
                        "crawl aborted; keeping records collected so far"
                    );
                    break Termination::Aborted(fault);
                }
                active => match self.step(active) {
                    Ok(next) => next,
                    Err(fault) => NavState::Aborted(fault),
                },
            };
        };

        self.session.close();

        info!(
            pages = self.pages_visited,
            records = self.records.len(),
            termination = termination.as_str(),
            "crawl loop finished"
        );

        CrawlOutcome {
            records: std::mem::take(&mut self.records),
            pages_visited: self.pages_visited,
            termination,
        }
    }

    fn enter(&mut self, start_url: &str) -> Result<NavState, NavigationFault> {
        if self.max_pages == Some(0) {
            return Ok(NavState::PageLimit);
        }
        self.session.driver().open(start_url)?;
        self.pause(self.timing.settle);
        self.arrive_at_page(1)
    }

    fn step(&mut self, state: NavState) -> Result<NavState, NavigationFault> {
        match state {
            NavState::AtListPage {
                page,
                next_item,
                item_count,
            } if next_item < item_count => {
                self.session
                    .driver()
                    .activate_element(&self.listing.item_link, next_item)?;
                self.pause(self.timing.settle);
                Ok(NavState::AtDetailPage {
                    page,
                    item: next_item,
                    item_count,
                })
            }
            NavState::AtListPage { page, .. } => self.advance_page(page),
            NavState::AtDetailPage {
                page,
                item,
                item_count,
            } => {
                self.collect_detail(page, item)?;
                self.session.driver().go_back()?;
                self.pause(self.timing.settle);
                Ok(NavState::AtListPage {
                    page,
                    next_item: item + 1,
                    item_count,
                })
            }
            terminal => Ok(terminal),
        }
    }

    fn collect_detail(&mut self, page: usize, item: usize) -> Result<(), NavigationFault> {
        let driver = self.session.driver();
        let html = driver.page_source()?;
        let url = if self.extractor.profile().capture_link {
            Some(driver.current_url()?)
        } else {
            None
        };

        let record = self.extractor.extract(&html, url.as_deref());
        info!(
            page,
            item,
            title = record.get(TITLE).map(String::as_str).unwrap_or_default(),
            "collected detail page"
        );
        self.records.push(record);
        Ok(())
    }

    fn advance_page(&mut self, page: usize) -> Result<NavState, NavigationFault> {
        let label = self.session.driver().element_attribute(
            &self.listing.next_control,
            &self.listing.next_label_attribute,
        )?;

        if label.as_deref() == Some(self.listing.last_page_label.as_str()) {
            info!(page, "reached last page");
            return Ok(NavState::EndOfPages);
        }

        if self.max_pages.is_some_and(|limit| page >= limit) {
            warn!(page, "page limit reached; stopping before the next page");
            return Ok(NavState::PageLimit);
        }

        self.session.driver().click(&self.listing.next_control)?;
        self.pause(self.timing.page_settle);
        self.session
            .driver()
            .wait_for_element(&self.listing.list_container, self.timing.list_wait)?;

        self.arrive_at_page(page + 1)
    }

    fn arrive_at_page(&mut self, page: usize) -> Result<NavState, NavigationFault> {
        let item_count = self
            .session
            .driver()
            .count_elements(&self.listing.item_link)?;
        self.pages_visited += 1;
        info!(page, items = item_count, "entered list page");

        Ok(NavState::AtListPage {
            page,
            next_item: 0,
            item_count,
        })
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}
