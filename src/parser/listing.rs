use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static CARD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.info-container").unwrap());
static PRICE_BOX_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".price-box").unwrap());

/// A parsed category listing page.
pub struct ListingPage {
    html: Html,
}

impl ListingPage {
    pub fn parse(markup: &str) -> Self {
        ListingPage {
            html: Html::parse_document(markup),
        }
    }

    /// Product cards in document order.
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        self.html.select(&CARD_SEL).map(Fragment).collect()
    }
}

/// One product card.
#[derive(Clone, Copy)]
pub struct Fragment<'a>(pub(crate) ElementRef<'a>);

impl<'a> Fragment<'a> {
    /// `data-product-id` of the card's price box, if present and non-empty.
    pub fn product_id(&self) -> Option<String> {
        self.0
            .select(&PRICE_BOX_SEL)
            .next()
            .and_then(|el| el.value().attr("data-product-id"))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.0.select(selector).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn finds_all_cards() {
        let page = ListingPage::parse(&fixture("tecnologia_p1"));
        assert_eq!(page.fragments().len(), 3);
    }

    #[test]
    fn empty_listing_has_no_cards() {
        let page = ListingPage::parse(&fixture("empty_listing"));
        assert!(page.fragments().is_empty());
    }

    #[test]
    fn garbage_markup_has_no_cards() {
        let page = ListingPage::parse("<<<not html at all");
        assert!(page.fragments().is_empty());
    }

    #[test]
    fn product_ids() {
        let page = ListingPage::parse(&fixture("tecnologia_p1"));
        let ids: Vec<_> = page.fragments().iter().map(|f| f.product_id()).collect();
        assert_eq!(ids, vec![Some("1001".to_string()), Some("1002".to_string()), None]);
    }

    #[test]
    fn empty_product_id_is_none() {
        let page = ListingPage::parse(
            r#"<div class="info-container"><div class="price-box" data-product-id=""></div></div>"#,
        );
        assert_eq!(page.fragments()[0].product_id(), None);
    }

    #[test]
    fn product_id_is_taken_verbatim() {
        let page = ListingPage::parse(
            r#"<div class="info-container"><div class="price-box" data-product-id=" 1001"></div></div>"#,
        );
        assert_eq!(page.fragments()[0].product_id().as_deref(), Some(" 1001"));
    }
}
