/// Fuzzy ranking tiers, best first. A closeness match scores between
/// `MATCHES` and `MATCHES + 1` depending on how tight the match is.
pub mod ranking {
    pub const CASE_SENSITIVE_EQUAL: f64 = 7.0;
    pub const EQUAL: f64 = 6.0;
    pub const STARTS_WITH: f64 = 5.0;
    pub const WORD_STARTS_WITH: f64 = 4.0;
    pub const CONTAINS: f64 = 3.0;
    pub const ACRONYM: f64 = 2.0;
    pub const MATCHES: f64 = 1.0;
    pub const NO_MATCH: f64 = 0.0;
}

/// Minimum rank for a value to pass the global filter
pub const THRESHOLD: f64 = ranking::MATCHES;

/// Rank how well `query` matches `item`
pub fn rank_item(item: &str, query: &str) -> f64 {
    let item_len = item.chars().count();
    let query_len = query.chars().count();

    if query_len > item_len {
        return ranking::NO_MATCH;
    }
    if item == query {
        return ranking::CASE_SENSITIVE_EQUAL;
    }

    let item = item.to_lowercase();
    let query = query.to_lowercase();

    if item == query {
        return ranking::EQUAL;
    }
    if item.starts_with(&query) {
        return ranking::STARTS_WITH;
    }
    if item.contains(&format!(" {}", query)) {
        return ranking::WORD_STARTS_WITH;
    }
    if item.contains(&query) {
        return ranking::CONTAINS;
    }
    if query_len == 1 {
        return ranking::NO_MATCH;
    }
    if acronym(&item).contains(&query) {
        return ranking::ACRONYM;
    }

    closeness(&item, &query)
}

/// First letter of every word, splitting on spaces and hyphens
fn acronym(s: &str) -> String {
    s.split(' ')
        .flat_map(|word| word.split('-'))
        .filter_map(|part| part.chars().next())
        .collect()
}

/// In-order character match; tighter spreads score higher
fn closeness(item: &str, query: &str) -> f64 {
    let haystack: Vec<char> = item.chars().collect();
    let needle: Vec<char> = query.chars().collect();

    let Some(&first) = needle.first() else {
        return ranking::NO_MATCH;
    };

    let find_from = |target: char, from: usize| -> Option<usize> {
        haystack
            .iter()
            .skip(from)
            .position(|&c| c == target)
            .map(|pos| from + pos + 1)
    };

    let Some(first_index) = find_from(first, 0) else {
        return ranking::NO_MATCH;
    };

    let mut cursor = first_index;
    for &ch in &needle[1..] {
        match find_from(ch, cursor) {
            Some(next) => cursor = next,
            None => return ranking::NO_MATCH,
        }
    }

    // every needle char matched in order, so only the spread varies
    let spread = (cursor - first_index).max(1) as f64;
    ranking::MATCHES + 1.0 / spread
}
