use super::*;
use std::collections::BTreeSet;

#[test]
fn field_lists_are_distinct_and_start_with_ico() {
    for fields in [DETAIL, EXTENDED] {
        let unique: BTreeSet<&str> = fields.iter().copied().collect();
        assert_eq!(unique.len(), fields.len(), "duplicate field name");
        assert_eq!(fields[0], KEY_ICO);
        assert!(!fields.contains(&KEY_TIMESTAMP));
    }
    assert_eq!(DETAIL.len(), 41);
    assert_eq!(EXTENDED.len(), 72);
}

#[test]
fn request_type_selects_matching_list() {
    assert_eq!(fields_for(RequestType::Detail), DETAIL);
    assert_eq!(fields_for(RequestType::Extended), EXTENDED);
}

#[test]
fn enriched_columns_append_timestamp_last() {
    let columns = enriched_columns(&["Ico", "Name"]);
    assert_eq!(columns, vec!["Ico", "Name", "timestamp"]);
}
