use std::fs;

use chrono::NaiveDate;

use goal_intervals::catalog::MatchCatalog;
use goal_intervals::combine::{FixedConceded, combine};
use goal_intervals::export::{export_file_name, export_profile};

#[test]
fn builtin_catalog_has_three_matches() {
    let catalog = MatchCatalog::builtin();
    assert_eq!(catalog.len(), 3);
    let first = catalog.get(0).expect("first match");
    assert_eq!(first.home, "Southampton");
    assert_eq!(first.away, "Aston Villa");
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 4, 12).expect("valid date"));
    assert_eq!(first.title(), "2025-04-12 - Southampton vs Aston Villa");
}

#[test]
fn catalog_loads_from_json() {
    let catalog = MatchCatalog::from_json(
        r#"[{"id": 9, "home": "Everton", "away": "Fulham", "date": "2025-05-01"}]"#,
    )
    .expect("valid catalog");
    assert_eq!(catalog.find(9).map(|m| m.home.as_str()), Some("Everton"));
    assert!(catalog.find(1).is_none());
}

#[test]
fn catalog_rejects_empty_and_duplicates() {
    assert!(MatchCatalog::from_json("[]").is_err());
    assert!(
        MatchCatalog::from_json(
            r#"[{"id": 1, "home": "A", "away": "B", "date": "2025-05-01"},
                {"id": 1, "home": "C", "away": "D", "date": "2025-05-02"}]"#,
        )
        .is_err()
    );
    assert!(MatchCatalog::from_json(r#"[{"id": 1}]"#).is_err());
}

#[test]
fn export_writes_workbook() {
    let catalog = MatchCatalog::builtin();
    let selection = catalog.find(2).expect("united-chelsea");
    assert_eq!(
        export_file_name(selection),
        "goal_intervals_Manchester_United_vs_Chelsea.xlsx"
    );

    let dir = std::env::temp_dir().join(format!("goal_intervals_export_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let rows = combine(&[], &[], &[], &selection.home, &selection.away, &mut FixedConceded(0.0));
    let path = export_profile(&dir, selection, &rows).expect("export should succeed");
    let meta = fs::metadata(&path).expect("workbook exists");
    assert!(meta.len() > 0);
    let _ = fs::remove_dir_all(&dir);
}
