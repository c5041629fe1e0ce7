//! Quotes: assembly, numbering and listing

mod assembler;

pub use assembler::*;

use shared::models::{Quote, QuoteDraft};

/// Identity and timestamps of a saved quote
#[derive(Debug, Clone)]
pub struct QuoteStamp {
    pub id: String,
    pub quote_no: String,
    pub date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Build the stored quote snapshot from a draft and its assembly result
pub fn build_quote(draft: QuoteDraft, assembled: AssembledQuote, stamp: QuoteStamp) -> Quote {
    let brand_id = draft.brand_id.filter(|id| !id.trim().is_empty());
    let notes = draft.notes.filter(|n| !n.trim().is_empty());

    Quote {
        id: Some(stamp.id),
        quote_no: stamp.quote_no,
        date: stamp.date,
        customer: draft.customer,
        brand_id,
        items: assembled.items,
        online_discount_percent: draft.online_discount_percent,
        offline_discount_percent: draft.offline_discount_percent,
        transport_taxable: draft.transport_taxable,
        loading_taxable: draft.loading_taxable,
        loading_rate: draft.loading_rate,
        base_price_override: draft.base_price_override,
        totals: assembled.totals,
        notes,
        vendor: draft.vendor,
        created_at: stamp.created_at,
        updated_at: stamp.updated_at,
    }
}

/// Quote list filter
///
/// `date_from` is inclusive, `date_to` exclusive (Unix millis).
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub customer_name: Option<String>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
}

impl QuoteFilter {
    pub fn matches(&self, quote: &Quote) -> bool {
        if let Some(name) = self.customer_name.as_deref().map(str::trim)
            && !name.is_empty()
            && !quote
                .customer
                .customer_name
                .to_lowercase()
                .contains(&name.to_lowercase())
        {
            return false;
        }
        if self.date_from.is_some_and(|from| quote.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| quote.date >= to) {
            return false;
        }
        true
    }
}

/// Apply the filter and sort newest first
pub fn filter_quotes(quotes: Vec<Quote>, filter: &QuoteFilter) -> Vec<Quote> {
    let mut quotes: Vec<Quote> = quotes.into_iter().filter(|q| filter.matches(q)).collect();
    quotes.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.quote_no.cmp(&a.quote_no)));
    quotes
}
