use tracing::{debug, info, warn};

use crate::fetcher::{FetchError, PageFetcher};
use crate::model::{ProductRow, RunContext};
use crate::parser;

/// Why a category's page loop ended.
#[derive(Debug)]
pub enum StopReason {
    FetchFailed(FetchError),
    EmptyPage { page: u32 },
    LoopDetected { page: u32, identifier: String },
    PageLimit { page: u32 },
}

impl StopReason {
    pub fn describe(&self) -> String {
        match self {
            StopReason::FetchFailed(e) => format!("fetch failed: {}", e),
            StopReason::EmptyPage { page } => format!("empty page {}", page),
            StopReason::LoopDetected { page, identifier } => {
                format!("loop at page {} (id {})", page, identifier)
            }
            StopReason::PageLimit { page } => format!("page limit {}", page),
        }
    }
}

/// Outcome of scanning one category.
#[derive(Debug)]
pub struct CategoryScan {
    pub category: String,
    pub pages_fetched: u32,
    pub rows_appended: usize,
    pub stop: StopReason,
}

/// All rows of a run, in scan order, plus one scan per category.
#[derive(Debug)]
pub struct RunReport {
    pub rows: Vec<ProductRow>,
    pub scans: Vec<CategoryScan>,
}

struct CategoryRunState<'a> {
    category: &'a str,
    current_page: u32,
    order_counter: u32,
    sentinel: Option<String>,
    loop_detected: bool,
}

impl<'a> CategoryRunState<'a> {
    fn new(category: &'a str) -> Self {
        CategoryRunState {
            category,
            current_page: 1,
            order_counter: 1,
            sentinel: None,
            loop_detected: false,
        }
    }
}

/// Scan every category in order. One category's failure never stops the next.
pub fn scan_all<F: PageFetcher + ?Sized>(
    fetcher: &F,
    ctx: &RunContext,
    categories: &[String],
    max_pages: Option<u32>,
) -> RunReport {
    let mut rows = Vec::new();
    let mut scans = Vec::with_capacity(categories.len());

    for category in categories {
        let scan = scan_category(fetcher, ctx, category, max_pages, &mut rows);
        scans.push(scan);
    }

    RunReport { rows, scans }
}

/// Page through one category from page 1, appending a row per product card.
pub fn scan_category<F: PageFetcher + ?Sized>(
    fetcher: &F,
    ctx: &RunContext,
    category: &str,
    max_pages: Option<u32>,
    rows: &mut Vec<ProductRow>,
) -> CategoryScan {
    let mut state = CategoryRunState::new(category);
    let rows_before = rows.len();
    let mut pages_fetched = 0;

    let stop = loop {
        let page = state.current_page;
        let markup = match fetcher.fetch_page(state.category, page) {
            Ok(markup) => markup,
            Err(e) => {
                warn!("[{}] page {}: {}", state.category, page, e);
                break StopReason::FetchFailed(e);
            }
        };
        pages_fetched += 1;

        let cards = parser::parse_page(&markup, ctx);
        info!("[{}] page {}: {} products", state.category, page, cards.len());

        if cards.is_empty() {
            info!("[{}] no more products, done", state.category);
            break StopReason::EmptyPage { page };
        }

        for card in cards {
            match card.product_id {
                Some(id) if state.order_counter == 1 => state.sentinel = Some(id),
                Some(id) if page > 1 && state.sentinel.as_deref() == Some(id.as_str()) => {
                    state.loop_detected = true;
                    break;
                }
                Some(_) => {}
                None => debug!("[{}] page {}: card without product id", state.category, page),
            }

            rows.push(ProductRow::new(ctx, state.category, page, state.order_counter, card.fields));
            state.order_counter += 1;
        }

        if state.loop_detected {
            let identifier = state.sentinel.clone().unwrap_or_default();
            info!(
                "[{}] page {} repeats product {}, stopping pagination",
                state.category, page, identifier
            );
            break StopReason::LoopDetected { page, identifier };
        }

        if max_pages.is_some_and(|max| page >= max) {
            info!("[{}] reached page limit {}", state.category, page);
            break StopReason::PageLimit { page };
        }

        state.current_page += 1;
    };

    CategoryScan {
        category: category.to_string(),
        pages_fetched,
        rows_appended: rows.len() - rows_before,
        stop,
    }
}
