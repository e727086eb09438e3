use sc_challenges::set_cover::{CoverError, Instance, LoadError};
use std::str::FromStr;

#[test]
fn test_parse_instance() {
    let instance = Instance::from_str("4 3\n2 0 1\n2 2 3\n3 0 1 2 3\n").unwrap();
    assert_eq!(instance.num_elements(), 4);
    assert_eq!(instance.num_subsets(), 3);
    assert_eq!(instance.costs(), &[2, 2, 3]);
    assert_eq!(instance.subset(2), &[0, 1, 2, 3]);
}

#[test]
fn test_parse_collapses_duplicates_and_sorts() {
    let instance = Instance::from_str("3 1\n7 2 0 2 1 0\n").unwrap();
    assert_eq!(instance.subset(0), &[0, 1, 2]);
}

#[test]
fn test_parse_ignores_extra_whitespace_and_trailing_lines() {
    let instance = Instance::from_str("  2   2 \n 1\t0 \n4 1 0\nthis line is ignored\n").unwrap();
    assert_eq!(instance.subsets(), &[vec![0], vec![0, 1]]);
    assert_eq!(instance.costs(), &[1, 4]);
}

#[test]
fn test_parse_subset_without_elements() {
    let instance = Instance::from_str("1 2\n5\n1 0").unwrap();
    assert!(instance.subset(0).is_empty());
    assert_eq!(instance.cost(0), 5);
}

#[test]
fn test_missing_header() {
    assert!(matches!(
        Instance::from_str(""),
        Err(LoadError::UnexpectedEof { line: 1, .. })
    ));
    assert!(matches!(
        Instance::from_str("4\n"),
        Err(LoadError::UnexpectedEof { line: 1, .. })
    ));
}

#[test]
fn test_missing_subset_line() {
    assert!(matches!(
        Instance::from_str("2 2\n1 0\n"),
        Err(LoadError::UnexpectedEof { line: 3, .. })
    ));
}

#[test]
fn test_header_subset_count_larger_than_file() {
    assert!(matches!(
        Instance::from_str("1 18446744073709551615\n1 0\n"),
        Err(LoadError::UnexpectedEof { line: 3, .. })
    ));
}

#[test]
fn test_blank_subset_line() {
    assert!(matches!(
        Instance::from_str("2 2\n1 0\n\n1 1\n"),
        Err(LoadError::UnexpectedEof { line: 3, .. })
    ));
}

#[test]
fn test_bad_tokens() {
    match Instance::from_str("2 1\n1 0 x\n") {
        Err(LoadError::Parse { line, token }) => {
            assert_eq!(line, 2);
            assert_eq!(token, "x");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        Instance::from_str("2 1\n-1 0\n"),
        Err(LoadError::Parse { line: 2, .. })
    ));
    assert!(matches!(
        Instance::from_str("2 1\n1.5 0\n"),
        Err(LoadError::Parse { line: 2, .. })
    ));
    assert!(matches!(
        Instance::from_str("n 1\n1 0\n"),
        Err(LoadError::Parse { line: 1, .. })
    ));
}

#[test]
fn test_element_out_of_range() {
    assert!(matches!(
        Instance::from_str("2 2\n1 0\n1 1 2\n"),
        Err(LoadError::ElementOutOfRange {
            line: 3,
            element: 2,
            num_elements: 2
        })
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Instance::from_path("/nonexistent/sc_0_0"),
        Err(LoadError::Io(_))
    ));
}

#[test]
fn test_text_round_trip_through_file() {
    let instance =
        Instance::new(5, vec![vec![4, 0], vec![1, 2, 3], vec![]], vec![10, 3, 0]).unwrap();
    let text = instance.to_text();
    assert_eq!(text, "5 3\n10 0 4\n3 1 2 3\n0\n");

    let path = std::env::temp_dir().join(format!("sc_loading_{}.txt", std::process::id()));
    std::fs::write(&path, &text).unwrap();
    let loaded = Instance::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, instance);
}

#[test]
fn test_load_error_wraps_cover_error() {
    let err: LoadError = CoverError::LengthMismatch {
        subsets: 1,
        costs: 2,
    }
    .into();
    assert_eq!(
        err.to_string(),
        "Number of subsets (1) does not match number of costs (2)"
    );
}
