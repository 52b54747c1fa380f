//! Merging hits from several search strategies into one result per url.

use crate::models::SearchResult;
use crate::store::HIGHLIGHT_START;
use std::collections::HashMap;

/// Collapse results sharing a url, keeping first-seen url order.
///
/// For a group, the title is the first one carrying a highlight (else the
/// first member's) and the content is the first non-empty one. The two
/// choices are made independently.
pub fn merge_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<SearchResult>> = HashMap::new();

    for result in results {
        match groups.get_mut(&result.url) {
            Some(group) => group.push(result),
            None => {
                order.push(result.url.clone());
                groups.insert(result.url.clone(), vec![result]);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|url| groups.remove(&url))
        .map(merge_group)
        .collect()
}

fn merge_group(mut group: Vec<SearchResult>) -> SearchResult {
    if group.len() == 1 {
        return group.remove(0);
    }

    let title = group
        .iter()
        .find(|r| r.title.contains(HIGHLIGHT_START))
        .unwrap_or(&group[0])
        .title
        .clone();

    let content = group
        .iter()
        .find(|r| !r.content.is_empty())
        .map(|r| r.content.clone())
        .unwrap_or_default();

    let url = group.swap_remove(0).url;
    SearchResult {
        title,
        url,
        content,
    }
}
