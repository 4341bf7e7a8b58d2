pub mod filter;
pub mod page;
pub mod search;
pub mod sort;

pub use page::Page;

use shared::types::ChainRecord;

use crate::query::ListParams;

/// 24 is cleanly divisible by 2, 3 and 4, so full pages fill the card grid
/// at every column count
pub const PAGE_SIZE: usize = 24;

pub const DEFAULT_PAGE: usize = 1;

/// Select and order the chains for one request, then slice out the page.
/// A non-empty query replaces the fixed ordering with relevance ranking.
pub fn run<'a>(chains: &'a [ChainRecord], params: &ListParams) -> Page<'a> {
    let candidates = filter::filter(chains, params);
    let selected = match params.query.as_deref() {
        Some(query) => search::search(candidates, query),
        None => sort::sort(candidates),
    };
    page::paginate(selected, params.page)
}
