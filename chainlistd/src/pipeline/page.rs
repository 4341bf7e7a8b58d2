use shared::types::ChainRecord;

use super::PAGE_SIZE;

/// One page of the selected chains plus the page count for the controls
#[derive(Debug)]
pub struct Page<'a> {
    pub items: Vec<&'a ChainRecord>,
    pub total_pages: usize,
}

/// Slice the requested page out of the selected chains. An out-of-range
/// page yields an empty item list, which renders as the empty state.
pub fn paginate(chains: Vec<&ChainRecord>, page: usize) -> Page<'_> {
    let total_pages = chains.len().div_ceil(PAGE_SIZE);

    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let items = if start >= chains.len() {
        Vec::new()
    } else {
        let end = (start + PAGE_SIZE).min(chains.len());
        chains[start..end].to_vec()
    };

    Page { items, total_pages }
}
