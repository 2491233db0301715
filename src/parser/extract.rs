use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::listing::Fragment;
use crate::model::ListingFields;

static NAME_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".product-item-name").unwrap());
static NAME_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".product-item-name a").unwrap());
static FINAL_PRICE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".price-container [data-price-type='finalPrice']").unwrap());
static OLD_PRICE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".old-price .price-wrapper").unwrap());
static DISCOUNT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".special-price-discount").unwrap());
static LABEL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".amlabel-text").unwrap());

static SLUG_INVALID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]+").unwrap());
static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

const PRICE_ATTR: &str = "data-price-amount";

/// Read the listing fields of one product card. Never fails; absent elements give "".
pub fn extract(fragment: &Fragment<'_>, base_url: &str) -> ListingFields {
    let product_name = fragment.first(&NAME_SEL).map(stripped_text).unwrap_or_default();

    let link = fragment
        .first(&NAME_LINK_SEL)
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_link(base_url, &product_name));

    let sale_price = attr_or_empty(fragment.first(&FINAL_PRICE_SEL), PRICE_ATTR);
    let net_price = attr_or_empty(fragment.first(&OLD_PRICE_SEL), PRICE_ATTR);

    let discount_text = fragment
        .first(&DISCOUNT_SEL)
        .map(|el| strip_off_suffix(&stripped_text(el)))
        .unwrap_or_default();

    let promotion_label = fragment.first(&LABEL_SEL).map(stripped_text).unwrap_or_default();

    ListingFields {
        product_name,
        sale_price,
        net_price,
        discount_text,
        promotion_label,
        link,
    }
}

/// Concatenate the element's text nodes, each trimmed, skipping blank ones.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

fn attr_or_empty(el: Option<ElementRef<'_>>, attr: &str) -> String {
    el.and_then(|e| e.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

fn strip_off_suffix(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_suffix("OFF")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// `Smart TV 55" 4K` -> `Smart-TV-55-4K`.
pub fn slugify(name: &str) -> String {
    let dashed = SLUG_INVALID_RE.replace_all(name, "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

fn fallback_link(base_url: &str, name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        return String::new();
    }
    format!("{}/{}.html", base_url.trim_end_matches('/'), slug)
}
