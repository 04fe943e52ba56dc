//! Keyword search over stop names
//!
//! A stop matches when its lowercased name contains every keyword as a
//! substring. Keywords are split on single spaces only, so repeated spaces
//! yield empty keywords, which match every name.

use crate::models::Stop;

/// Lowercased keywords of a search string
#[must_use]
pub fn keyword_tokens(keywords: &str) -> Vec<String> {
    keywords.to_lowercase().split(' ').map(str::to_string).collect()
}

/// Whether `name` contains every token, ignoring case
#[must_use]
pub fn matches_all(name: &str, tokens: &[String]) -> bool {
    let name = name.to_lowercase();
    tokens.iter().all(|token| name.contains(token.as_str()))
}

/// Keep, in order, the stops whose name matches every keyword
#[must_use]
pub fn filter_by_keywords(stops: Vec<Stop>, keywords: &str) -> Vec<Stop> {
    let tokens = keyword_tokens(keywords);
    stops
        .into_iter()
        .filter(|stop| matches_all(&stop.name, &tokens))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(names: &[&str]) -> Vec<Stop> {
        names
            .iter()
            .zip(1..)
            .map(|(name, id)| {
                let mut stop = Stop::named(*name);
                stop.id = Some(id);
                stop
            })
            .collect()
    }

    fn names(stops: &[Stop]) -> Vec<&str> {
        stops.iter().map(|stop| stop.name.as_str()).collect()
    }

    #[test]
    fn test_keyword_tokens() {
        assert_eq!(keyword_tokens("Plaza Pontevedra"), vec!["plaza", "pontevedra"]);
        assert_eq!(keyword_tokens(""), vec![""]);
        assert_eq!(keyword_tokens("a  b"), vec!["a", "", "b"]);
        assert_eq!(keyword_tokens("rúa RÚA"), vec!["rúa", "rúa"]);
    }

    #[test]
    fn test_matches_all_is_substring_match() {
        let tokens = keyword_tokens("ponte plaz");
        assert!(matches_all("Plaza Pontevedra", &tokens));
        assert!(!matches_all("Plaza de Lugo", &tokens));
    }

    #[test]
    fn test_empty_keywords_return_everything() {
        let all = stops(&["Obelisco", "Plaza de Lugo", "Castrillón"]);
        let found = filter_by_keywords(all.clone(), "");
        assert_eq!(found, all);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = stops(&["Avenida de Arteixo", "Abente y Lago", "Obelisco"]);
        let upper = filter_by_keywords(all.clone(), "A");
        let lower = filter_by_keywords(all, "a");
        assert_eq!(upper, lower);
        assert_eq!(names(&upper), vec!["Avenida de Arteixo", "Abente y Lago"]);
    }

    #[test]
    fn test_search_requires_all_keywords_and_keeps_order() {
        let all = stops(&[
            "Plaza de Pontevedra",
            "Pontevedra 12",
            "Plaza de Lugo",
            "Rúa Pontevedra Plaza",
        ]);
        let found = filter_by_keywords(all, "pontevedra plaza");
        assert_eq!(names(&found), vec!["Plaza de Pontevedra", "Rúa Pontevedra Plaza"]);
    }

    #[test]
    fn test_repeated_spaces_do_not_narrow_the_search() {
        let all = stops(&["Plaza de Lugo", "Plaza de España"]);
        let single = filter_by_keywords(all.clone(), "plaza lugo");
        let double = filter_by_keywords(all, "plaza  lugo");
        assert_eq!(single, double);
    }

    #[test]
    fn test_no_match() {
        let all = stops(&["Obelisco"]);
        assert!(filter_by_keywords(all, "xyz").is_empty());
    }
}
