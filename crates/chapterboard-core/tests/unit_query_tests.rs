//! Unit tests for list request parsing and cache keys

use chapterboard_core::{ListQuery, ListRequest, Pagination};

fn query(pairs: &[(&str, &str)]) -> ListQuery {
    let mut q = ListQuery::default();
    for (name, value) in pairs {
        let value = Some(value.to_string());
        match *name {
            "class" => q.class_name = value,
            "unit" => q.unit = value,
            "status" => q.status = value,
            "isWeakChapter" => q.is_weak_chapter = value,
            "subject" => q.subject = value,
            "year" => q.year = value,
            "page" => q.page = value,
            "limit" => q.limit = value,
            other => panic!("unknown parameter {}", other),
        }
    }
    q
}

#[test]
fn test_cache_key_without_filters() {
    let request = ListRequest::from(ListQuery::default());
    assert_eq!(request.cache_key().unwrap(), "chapters:{}:1:10");
}

#[test]
fn test_cache_key_field_order_is_fixed() {
    // Parameter order in the request never changes the key
    let a = ListRequest::from(query(&[
        ("subject", "Physics"),
        ("isWeakChapter", "true"),
        ("class", "Class 11"),
    ]));
    let b = ListRequest::from(query(&[
        ("class", "Class 11"),
        ("subject", "Physics"),
        ("isWeakChapter", "true"),
    ]));

    assert_eq!(a.cache_key().unwrap(), b.cache_key().unwrap());
    assert_eq!(
        a.cache_key().unwrap(),
        r#"chapters:{"class":"Class 11","isWeakChapter":true,"subject":"Physics"}:1:10"#
    );
}

#[test]
fn test_year_changes_the_key() {
    let plain = ListRequest::from(query(&[("subject", "Physics")]));
    let with_year = ListRequest::from(query(&[("subject", "Physics"), ("year", "2023")]));

    assert_ne!(plain.cache_key().unwrap(), with_year.cache_key().unwrap());
    assert!(with_year.cache_key().unwrap().ends_with(":1:10:year=2023"));
    assert!(with_year.filter == plain.filter);
}

#[test]
fn test_weak_flag_is_true_only_for_literal_true() {
    for (raw, expected) in [("true", true), ("false", false), ("TRUE", false), ("1", false)] {
        let request = ListRequest::from(query(&[("isWeakChapter", raw)]));
        assert_eq!(request.filter.is_weak_chapter, Some(expected), "raw {}", raw);
    }
}

#[test]
fn test_empty_parameters_are_ignored() {
    let request = ListRequest::from(query(&[("subject", ""), ("year", ""), ("page", "")]));

    assert!(request.filter.is_empty());
    assert!(request.year.is_none());
    assert_eq!(request.pagination, Pagination::default());
}

#[test]
fn test_bad_pagination_falls_back_to_defaults() {
    for (page, limit) in [("0", "0"), ("-1", "abc"), ("1.5", "")] {
        let request = ListRequest::from(query(&[("page", page), ("limit", limit)]));
        assert_eq!(request.pagination, Pagination::default(), "page={} limit={}", page, limit);
    }

    let request = ListRequest::from(query(&[("page", "3"), ("limit", "25")]));
    assert_eq!(request.pagination.skip(), 50);
}
