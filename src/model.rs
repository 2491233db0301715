use serde::Serialize;

/// Spreadsheet column order.
pub const COLUMNS: [&str; 12] = [
    "Date",
    "ProductName",
    "SalePrice",
    "NetPrice",
    "DiscountText",
    "PromotionLabel",
    "Link",
    "Platform",
    "Category",
    "PageNumber",
    "OrderIndex",
    "Country",
];

/// Per-run values stamped on every row.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub date: String,
    pub platform: String,
    pub country: String,
    pub base_url: String,
}

/// Fields read from a single product card. Missing elements are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub product_name: String,
    pub sale_price: String,
    pub net_price: String,
    pub discount_text: String,
    pub promotion_label: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProductRow {
    pub date: String,
    pub product_name: String,
    pub sale_price: String,
    pub net_price: String,
    pub discount_text: String,
    pub promotion_label: String,
    pub link: String,
    pub platform: String,
    pub category: String,
    pub page_number: u32,
    pub order_index: u32,
    pub country: String,
}

impl ProductRow {
    pub fn new(
        ctx: &RunContext,
        category: &str,
        page_number: u32,
        order_index: u32,
        fields: ListingFields,
    ) -> Self {
        ProductRow {
            date: ctx.date.clone(),
            product_name: fields.product_name,
            sale_price: fields.sale_price,
            net_price: fields.net_price,
            discount_text: fields.discount_text,
            promotion_label: fields.promotion_label,
            link: fields.link,
            platform: ctx.platform.clone(),
            category: category.to_string(),
            page_number,
            order_index,
            country: ctx.country.clone(),
        }
    }

    /// Cells in `COLUMNS` order.
    pub fn cells(&self) -> [Cell<'_>; 12] {
        [
            Cell::Text(&self.date),
            Cell::Text(&self.product_name),
            Cell::Text(&self.sale_price),
            Cell::Text(&self.net_price),
            Cell::Text(&self.discount_text),
            Cell::Text(&self.promotion_label),
            Cell::Text(&self.link),
            Cell::Text(&self.platform),
            Cell::Text(&self.category),
            Cell::Number(self.page_number),
            Cell::Number(self.order_index),
            Cell::Text(&self.country),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(u32),
}

#[cfg(test)]
pub(crate) fn test_context() -> RunContext {
    RunContext {
        date: "2025-03-01".into(),
        platform: "Cetrogar".into(),
        country: "Argentina".into(),
        base_url: "https://www.cetrogar.com.ar".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_carries_run_provenance() {
        let fields = ListingFields {
            product_name: "Heladera No Frost".into(),
            ..Default::default()
        };
        let row = ProductRow::new(&test_context(), "Electrodomésticos", 2, 7, fields);
        assert_eq!(row.date, "2025-03-01");
        assert_eq!(row.platform, "Cetrogar");
        assert_eq!(row.country, "Argentina");
        assert_eq!(row.category, "Electrodomésticos");
        assert_eq!(row.page_number, 2);
        assert_eq!(row.order_index, 7);
        assert_eq!(row.product_name, "Heladera No Frost");
        assert!(row.link.is_empty());
    }

    #[test]
    fn cells_follow_column_order() {
        let fields = ListingFields {
            product_name: "Smart TV".into(),
            link: "https://www.cetrogar.com.ar/smart-tv.html".into(),
            ..Default::default()
        };
        let row = ProductRow::new(&test_context(), "Tecnología", 3, 9, fields);
        let cells = row.cells();
        let at = |name: &str| cells[COLUMNS.iter().position(|c| *c == name).unwrap()];

        assert_eq!(at("Date"), Cell::Text("2025-03-01"));
        assert_eq!(at("ProductName"), Cell::Text("Smart TV"));
        assert_eq!(at("Link"), Cell::Text("https://www.cetrogar.com.ar/smart-tv.html"));
        assert_eq!(at("Category"), Cell::Text("Tecnología"));
        assert_eq!(at("PageNumber"), Cell::Number(3));
        assert_eq!(at("OrderIndex"), Cell::Number(9));
        assert_eq!(at("Country"), Cell::Text("Argentina"));
    }
}
