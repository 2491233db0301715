pub mod extract;
pub mod listing;

use crate::model::{ListingFields, RunContext};
use listing::ListingPage;

/// A card's identifier (if any) and its listing fields.
pub struct ParsedCard {
    pub product_id: Option<String>,
    pub fields: ListingFields,
}

/// Parse one listing page into its cards, in page order.
pub fn parse_page(markup: &str, ctx: &RunContext) -> Vec<ParsedCard> {
    let page = ListingPage::parse(markup);
    page.fragments()
        .iter()
        .map(|fragment| ParsedCard {
            product_id: fragment.product_id(),
            fields: extract::extract(fragment, &ctx.base_url),
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_context;

    fn parse(fixture: &str) -> Vec<ParsedCard> {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        parse_page(&html, &test_context())
    }

    #[test]
    fn tecnologia_first_page() {
        let cards = parse("tecnologia_p1");
        assert_eq!(cards.len(), 3);

        let tv = &cards[0];
        assert_eq!(tv.product_id.as_deref(), Some("1001"));
        assert_eq!(tv.fields.product_name, "Smart TV Samsung 55\" 4K UHD");
        assert_eq!(tv.fields.link, "https://www.cetrogar.com.ar/smart-tv-samsung-55-4k-uhd.html");
        assert_eq!(tv.fields.sale_price, "749999");
        assert_eq!(tv.fields.net_price, "899999");
        assert_eq!(tv.fields.discount_text, "16%");
        assert_eq!(tv.fields.promotion_label, "Hot Sale");
    }

    #[test]
    fn tecnologia_card_without_old_price() {
        let cards = parse("tecnologia_p1");
        let phone = &cards[1];
        assert_eq!(phone.product_id.as_deref(), Some("1002"));
        assert_eq!(phone.fields.sale_price, "329999");
        assert_eq!(phone.fields.net_price, "");
        assert_eq!(phone.fields.discount_text, "");
        assert_eq!(phone.fields.promotion_label, "");
    }

    #[test]
    fn tecnologia_card_without_anchor_or_id() {
        let cards = parse("tecnologia_p1");
        let speaker = &cards[2];
        assert!(speaker.product_id.is_none());
        assert_eq!(speaker.fields.product_name, "Parlante Portátil JBL Flip 6");
        assert_eq!(speaker.fields.link, "https://www.cetrogar.com.ar/Parlante-Port-til-JBL-Flip-6.html");
        assert_eq!(speaker.fields.promotion_label, "12 cuotas sin interés");
    }

    #[test]
    fn empty_listing() {
        assert!(parse("empty_listing").is_empty());
    }
}
