use sc_runner::*;
use std::path::Path;

fn write_instance(name: &str, text: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("sc_runner_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_score_bounds() {
    let test = Test::new("data/sc_330_0", 29, 24);
    assert_eq!(test.score(20).points, BOUND2_SCORE);
    assert_eq!(test.score(24).points, BOUND2_SCORE);
    assert_eq!(test.score(25).points, BOUND1_SCORE);
    assert_eq!(test.score(28).points, BOUND1_SCORE);
    assert_eq!(test.score(29).points, BOUND0_SCORE);
    assert_eq!(test.score(1000).points, BOUND0_SCORE);
    assert_eq!(test.score(25).to_string(), "3/5");
}

#[test]
fn test_default_suite() {
    let suite = default_suite();
    assert_eq!(suite.len(), 6);
    assert_eq!(suite[0], Test::new("data/sc_157_0", 130000, 94402));
    assert_eq!(suite[5], Test::new("data/sc_10000_5", 120, 64));
    assert!(suite.iter().all(|t| t.bound2 < t.bound1));
}

#[test]
fn test_suite_json() {
    let tests: Vec<Test> =
        sc_utils::dejsonify(r#"[{"filename":"a","bound1":10,"bound2":5}]"#).unwrap();
    assert_eq!(tests, vec![Test::new("a", 10, 5)]);
}

#[test]
fn test_path_with_data_dir() {
    let test = Test::new("data/sc_330_0", 29, 24);
    assert_eq!(test.path(None), Path::new("data/sc_330_0"));
    assert_eq!(
        test.path(Some(Path::new("/srv"))),
        Path::new("/srv/data/sc_330_0")
    );
}

#[test]
fn test_run_test() {
    let path = write_instance("disjoint", "4 3\n2 0 1\n2 2 3\n3 0 1 2 3\n");
    let test = Test::new("disjoint", 4, 3);
    let report = run_test(&test, path.parent()).unwrap();
    assert_eq!(report.cover.covering, vec![2]);
    assert_eq!(report.cover.total_cost, 3);
    assert_eq!(report.score.points, BOUND2_SCORE);

    let text = report.to_string();
    assert!(text.starts_with("running test disjoint\t"));
    assert!(text.contains("s\t5/5\n"));
    assert!(text.ends_with("cost = 3"));
}

#[test]
fn test_run_test_failures() {
    let test = Test::new("missing_instance", 1, 1);
    let dir = std::env::temp_dir().join("sc_runner_missing_dir");
    assert!(run_test(&test, Some(&dir)).is_err());

    let path = write_instance("unsolvable", "3 1\n1 0 1\n");
    let test = Test::new("unsolvable", 10, 5);
    let err = run_test(&test, path.parent()).unwrap_err();
    assert!(err.to_string().contains("element 2"));
}

#[test]
fn test_total_score() {
    let path = write_instance("overlap", "3 3\n1 0 1\n1 1 2\n3 0 1 2\n");
    let reports = vec![
        run_test(&Test::new("overlap", 3, 2), path.parent()),
        run_test(&Test::new("overlap", 3, 1), path.parent()),
        run_test(&Test::new("overlap", 2, 1), path.parent()),
        run_test(&Test::new("nonexistent", 2, 1), path.parent()),
    ];
    let score = total_score(&reports);
    assert_eq!(score.points, BOUND2_SCORE + BOUND1_SCORE);
    assert_eq!(score.max_points, 4 * BOUND2_SCORE);
}
