//! Department scoping of report actions.

use crate::models::ReportButtonConfig;

/// Whether a staff member in `department` may see `button`.
///
/// General buttons (no department) are visible to everyone; scoped buttons
/// only to staff of that exact department.
pub fn is_visible_to(button: &ReportButtonConfig, department: Option<&str>) -> bool {
    match button.department_id.as_deref() {
        None => true,
        Some(scope) => department == Some(scope),
    }
}

/// Filter `buttons` down to those visible to `department`, keeping order.
pub fn visible_buttons<'a>(
    buttons: &'a [ReportButtonConfig],
    department: Option<&str>,
) -> Vec<&'a ReportButtonConfig> {
    buttons
        .iter()
        .filter(|b| is_visible_to(b, department))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportKind;

    fn button(id: &str, department: Option<&str>) -> ReportButtonConfig {
        ReportButtonConfig {
            id: id.into(),
            label: id.into(),
            question: "?".into(),
            kind: ReportKind::OpenText,
            department_id: department.map(Into::into),
        }
    }

    #[test]
    fn general_button_is_visible_to_everyone() {
        let b = button("g", None);
        assert!(is_visible_to(&b, Some("D1")));
        assert!(is_visible_to(&b, None));
    }

    #[test]
    fn scoped_button_requires_matching_department() {
        let b = button("s", Some("D2"));
        assert!(is_visible_to(&b, Some("D2")));
        assert!(!is_visible_to(&b, Some("D1")));
        assert!(!is_visible_to(&b, None));
    }

    #[test]
    fn visible_buttons_preserves_order() {
        let buttons = vec![
            button("a", None),
            button("b", Some("D2")),
            button("c", Some("D1")),
            button("d", None),
        ];
        let ids: Vec<_> = visible_buttons(&buttons, Some("D1"))
            .into_iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }

    #[test]
    fn department_match_is_case_sensitive() {
        let b = button("s", Some("D1"));
        assert!(!is_visible_to(&b, Some("d1")));
    }
}
