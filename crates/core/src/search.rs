//! Client-side search over dashboard lists.
//!
//! Matching is a case-insensitive substring test against a fixed set of
//! fields per entity. An empty term matches everything.

use crate::models::{ParticipantCompany, Staff};

/// Whether any of `fields` contains `term`, ignoring case.
pub fn matches_term(term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Staff whose name or personal code contains `term`.
pub fn filter_staff<'a>(staff: &'a [Staff], term: &str) -> Vec<&'a Staff> {
    staff
        .iter()
        .filter(|s| matches_term(term, &[s.name.as_str(), s.personal_code.as_str()]))
        .collect()
}

/// Companies whose name or booth code contains `term`.
pub fn filter_companies<'a>(
    companies: &'a [ParticipantCompany],
    term: &str,
) -> Vec<&'a ParticipantCompany> {
    companies
        .iter()
        .filter(|c| matches_term(term, &[c.name.as_str(), c.booth_code.as_str()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(name: &str, code: &str) -> Staff {
        Staff {
            id: code.to_lowercase(),
            name: name.into(),
            personal_code: code.into(),
            department_id: None,
            photo_url: None,
        }
    }

    fn company(name: &str, booth: &str) -> ParticipantCompany {
        ParticipantCompany {
            id: booth.to_lowercase(),
            name: name.into(),
            booth_code: booth.into(),
        }
    }

    #[test]
    fn empty_term_matches_all() {
        let roster = vec![staff("Ana", "A1"), staff("Bruno", "B7")];
        assert_eq!(filter_staff(&roster, "").len(), 2);
    }

    #[test]
    fn staff_matches_name_case_insensitively() {
        let roster = vec![staff("Ana Souza", "A1"), staff("Bruno", "B7")];
        let names: Vec<_> = filter_staff(&roster, "SOUZA").iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ana Souza"]);
    }

    #[test]
    fn staff_matches_personal_code() {
        let roster = vec![staff("Ana", "A1"), staff("Bruno", "B7")];
        let names: Vec<_> = filter_staff(&roster, "b7").iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bruno"]);
    }

    #[test]
    fn companies_match_name_or_booth() {
        let companies = vec![company("Acme", "C1"), company("Globex", "X9")];
        assert_eq!(filter_companies(&companies, "glob").len(), 1);
        assert_eq!(filter_companies(&companies, "c1")[0].name, "Acme");
        assert!(filter_companies(&companies, "zzz").is_empty());
    }

    #[test]
    fn accented_terms_match() {
        assert!(matches_term("JOÃO", &["joão pedro"]));
    }
}
