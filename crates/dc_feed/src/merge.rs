use std::collections::HashSet;
use dc_core::Article;

/// Appends `incoming` to `existing`, dropping any article whose `url` is
/// already present. The first occurrence wins, including among articles
/// without a URL: two URL-less articles count as duplicates.
pub fn merge_unique(existing: Vec<Article>, incoming: Vec<Article>) -> Vec<Article> {
    let mut seen: HashSet<Option<String>> = HashSet::with_capacity(existing.len() + incoming.len());
    existing
        .into_iter()
        .chain(incoming)
        .filter(|article| seen.insert(article.url.clone()))
        .collect()
}
