//! Structural checks: required fields present and list fields typed as lists.

use crate::issue::Issue;
use crate::record::{LIST_FIELDS, REQUIRED_FIELDS, SceneRecord};

/// Check a scene's structure.
///
/// Every rule is evaluated independently, so a record can collect several
/// issues at once. Never fails: absence of a field is itself an issue.
/// `location` and `time` types, element shapes and duplicates are not checked.
#[must_use]
pub fn check_structure(scene: &SceneRecord) -> Vec<Issue> {
    let mut issues: Vec<Issue> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !scene.contains(field))
        .map(|field| Issue::missing_field(field))
        .collect();

    for field in LIST_FIELDS {
        if let Some(value) = scene.get(field)
            && !value.is_array()
        {
            issues.push(Issue::not_a_list(field));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{IssueKind, Severity};
    use serde_json::{Value, json};

    fn record(value: Value) -> SceneRecord {
        SceneRecord::from_value(value)
    }

    fn well_formed() -> Value {
        json!({
            "id": "s1",
            "location": "loc",
            "time": "t",
            "characters": [],
            "actions": []
        })
    }

    #[test]
    fn test_well_formed_scene_has_no_issues() {
        assert!(check_structure(&record(well_formed())).is_empty());
    }

    #[test]
    fn test_each_missing_field_reported_once() {
        for field in REQUIRED_FIELDS {
            let mut value = well_formed();
            value.as_object_mut().unwrap().remove(*field);

            let issues = check_structure(&record(value));
            assert_eq!(issues.len(), 1, "field {field}: {issues:?}");
            assert_eq!(issues[0].kind, IssueKind::MissingField);
            assert_eq!(issues[0].field.as_deref(), Some(*field));
            assert_eq!(issues[0].severity, Severity::Error);
        }
    }

    #[test]
    fn test_empty_record_reports_all_fields_in_order() {
        let issues = check_structure(&record(json!({})));
        let fields: Vec<_> = issues.iter().filter_map(|i| i.field.as_deref()).collect();
        assert_eq!(fields, REQUIRED_FIELDS);
        assert!(issues.iter().all(|i| i.kind == IssueKind::MissingField));
    }

    #[test]
    fn test_characters_not_a_list() {
        let mut value = well_formed();
        value["characters"] = json!("Alice, Bob");

        let issues = check_structure(&record(value));
        assert_eq!(issues, vec![Issue::not_a_list("characters")]);
        assert_eq!(issues[0].message, "'characters' must be a list");
    }

    #[test]
    fn test_actions_not_a_list() {
        let mut value = well_formed();
        value["actions"] = json!(3);

        let issues = check_structure(&record(value));
        assert_eq!(issues, vec![Issue::not_a_list("actions")]);
    }

    #[test]
    fn test_rules_are_not_short_circuited() {
        let issues = check_structure(&record(json!({
            "characters": {"name": "Alice"},
            "actions": "runs"
        })));

        let missing = issues
            .iter()
            .filter(|i| i.kind == IssueKind::MissingField)
            .count();
        let invalid = issues
            .iter()
            .filter(|i| i.kind == IssueKind::InvalidFormat)
            .count();
        assert_eq!(missing, 3);
        assert_eq!(invalid, 2);
    }

    #[test]
    fn test_location_and_time_types_are_not_checked() {
        let mut value = well_formed();
        value["location"] = json!(7);
        value["time"] = json!(null);
        value["characters"] = json!([1, {"odd": true}, "x"]);

        assert!(check_structure(&record(value)).is_empty());
    }
}
