//! Unit tests for NKF7 placement analysis
//!
//! Each test builds a small document in memory and checks the coordinate map,
//! the row summary and the run counters.

use wafermap::{
    analyze, AnalysisConfig, Analyzer, ColumnBlock, DieSlotDef, GroupCatalog, MapError,
    Nkf7Coordinate, SlotSelection, WaferDocument, WaferRow,
};

/// Group of `len` slots with `family` at `pos` and a filler family elsewhere.
fn group(len: usize, pos: usize, family: &str) -> Vec<DieSlotDef> {
    (0..len)
        .map(|i| DieSlotDef::new(if i == pos { family } else { "PLN3" }))
        .collect()
}

fn catalog() -> GroupCatalog {
    GroupCatalog::new()
        .with_group("Group1", group(6, 99, "NKF7"))
        .with_group("Group2", group(10, 8, "NKF7"))
        .with_group("Group9", group(9, 7, "NKF7_v2"))
}

fn all(name: &str) -> ColumnBlock {
    ColumnBlock::new(name, SlotSelection::All, SlotSelection::All)
}

fn explicit(name: &str, existing: &[usize], testable: &[usize]) -> ColumnBlock {
    ColumnBlock::new(
        name,
        SlotSelection::Explicit(existing.to_vec()),
        SlotSelection::Explicit(testable.to_vec()),
    )
}

fn run(doc: &WaferDocument) -> wafermap::Analysis {
    analyze(doc, &AnalysisConfig::default()).unwrap()
}

#[test]
fn test_all_block_matches_target_slot() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new("MapGroupsRow3", vec![all("Group1"), all("Group2")])],
    );

    let analysis = run(&doc);

    // Group1 takes columns 0..6, so slot 8 of Group2 lands on 6 + 8
    assert_eq!(analysis.coordinates.len(), 1);
    assert_eq!(
        analysis.coordinates.get("NKF7_S_-14_-3"),
        Some(&Nkf7Coordinate { x: -14, y: -3 })
    );
    let row = analysis.rows.get("MapGroupsRow3").unwrap();
    assert_eq!(row.count, 1);
    assert_eq!(row.columns, vec![14]);
}

#[test]
fn test_explicit_existence_uses_position_in_set() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new(
            "MapGroupsRow0",
            vec![all("Group1"), explicit("Group2", &[2, 8], &[8])],
        )],
    );

    let analysis = run(&doc);

    // second existing entry: start 6 + 1, not 6 + 8
    assert_eq!(analysis.rows.get("MapGroupsRow0").unwrap().columns, vec![7]);
    assert!(analysis.coordinates.get("NKF7_S_-7_0").is_some());
}

#[test]
fn test_non_conforming_row_key_excluded() {
    let doc = WaferDocument::new(
        catalog(),
        vec![
            WaferRow::new("RowX", vec![all("Group2")]),
            WaferRow::new("MapGroupsRowX", vec![all("Group2")]),
        ],
    );

    let analysis = run(&doc);

    assert!(analysis.coordinates.is_empty());
    assert!(analysis.rows.is_empty());
    assert_eq!(analysis.stats.rows_ignored, 1);
    assert_eq!(analysis.stats.rows_skipped, 1);
    assert_eq!(analysis.stats.rows_scanned, 0);
}

#[test]
fn test_block_outside_interest_shifts_following_block() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new(
            "MapGroupsRow1",
            vec![explicit("Group2", &[8], &[8]), all("Group1"), explicit("Group2", &[8], &[8])],
        )],
    );

    let analysis = run(&doc);

    // first Group2 block at 0, Group1 covers 1..7, second Group2 block at 7
    assert_eq!(analysis.rows.get("MapGroupsRow1").unwrap().columns, vec![0, 7]);
    assert_eq!(analysis.stats.columns, 8);
    assert_eq!(analysis.stats.blocks, 3);
    assert_eq!(analysis.stats.blocks_of_interest, 2);
}

#[test]
fn test_group9_targets_slot_seven_with_variant_family() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new("MapGroupsRow5", vec![all("Group9")])],
    );

    let analysis = run(&doc);
    assert_eq!(analysis.rows.get("MapGroupsRow5").unwrap().columns, vec![7]);
}

#[test]
fn test_family_mismatch_rejected() {
    let catalog = GroupCatalog::new().with_group("Group2", group(10, 8, "XKF7"));
    let doc = WaferDocument::new(
        catalog,
        vec![WaferRow::new("MapGroupsRow2", vec![all("Group2")])],
    );

    let analysis = run(&doc);
    assert!(analysis.rows.is_empty());
    assert_eq!(analysis.stats.family_mismatch, 1);
}

#[test]
fn test_untestable_target_rejected() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new(
            "MapGroupsRow2",
            vec![explicit("Group2", &[7, 8, 9], &[7, 9])],
        )],
    );

    let analysis = run(&doc);
    assert!(analysis.coordinates.is_empty());
    assert_eq!(analysis.stats.not_testable, 1);
    assert_eq!(analysis.stats.not_target_position, 2);
}

#[test]
fn test_out_of_bounds_slot_rejected() {
    let catalog = GroupCatalog::new().with_group("Group2", group(5, 0, "NKF7"));
    let doc = WaferDocument::new(
        catalog,
        vec![WaferRow::new(
            "MapGroupsRow2",
            vec![explicit("Group2", &[8], &[8])],
        )],
    );

    let analysis = run(&doc);
    assert!(analysis.coordinates.is_empty());
    assert_eq!(analysis.stats.out_of_bounds, 1);
}

#[test]
fn test_rows_without_matches_omitted() {
    let doc = WaferDocument::new(
        catalog(),
        vec![
            WaferRow::new("MapGroupsRow1", vec![all("Group1")]),
            WaferRow::new("MapGroupsRow2", vec![all("Group2")]),
            WaferRow::new("MapGroupsRow3", vec![]),
        ],
    );

    let analysis = run(&doc);
    let keys: Vec<_> = analysis.rows.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["MapGroupsRow2"]);
    assert_eq!(analysis.stats.rows_scanned, 3);
}

#[test]
fn test_columns_strictly_increasing() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new(
            "MapGroupsRow8",
            vec![
                all("Group2"),
                all("Group9"),
                all("Group1"),
                explicit("Group2", &[8, 0], &[8]),
                all("Group9"),
            ],
        )],
    );

    let analysis = run(&doc);
    let row = analysis.rows.get("MapGroupsRow8").unwrap();
    assert_eq!(row.columns, vec![8, 17, 25, 34]);
    assert_eq!(row.count, row.columns.len());
    assert!(row.columns.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_analysis_is_idempotent() {
    let doc = WaferDocument::new(
        catalog(),
        vec![
            WaferRow::new("MapGroupsRow1", vec![all("Group2"), all("Group9")]),
            WaferRow::new("MapGroupsRow2", vec![all("Group1"), all("Group2")]),
        ],
    );

    let first = run(&doc);
    let second = run(&doc);
    assert_eq!(first, second);
    assert_eq!(first.coordinates.len(), 3);
}

#[test]
fn test_parallel_matches_sequential() {
    let rows = (0..40)
        .map(|i| {
            let blocks = if i % 3 == 0 {
                vec![all("Group1"), all("Group2")]
            } else {
                vec![all("Group9"), explicit("Group2", &[8], &[8])]
            };
            WaferRow::new(format!("MapGroupsRow{i}"), blocks)
        })
        .collect();
    let doc = WaferDocument::new(catalog(), rows);

    let sequential = analyze(&doc, &AnalysisConfig::default()).unwrap();
    let parallel = analyze(&doc, &AnalysisConfig::default().with_parallel(true)).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_negative_row_index_keys() {
    let doc = WaferDocument::new(
        catalog(),
        vec![WaferRow::new("MapGroupsRow-2", vec![all("Group2")])],
    );

    let analysis = run(&doc);
    assert_eq!(
        analysis.coordinates.get("NKF7_S_-8_2"),
        Some(&Nkf7Coordinate { x: -8, y: 2 })
    );
}

#[test]
fn test_bad_map_group_entries_skip_only_their_rows() {
    let parsed = WaferDocument::from_json(
        r#"{
            "MapGroups": {
                "Legend": "ER1 v3",
                "MapGroupsRowTop": null,
                "MapGroupsRow5": null,
                "MapGroupsRow3": {
                    "MapGroupsColumns": [
                        {"GroupName": "Group1", "ExistingAsics": ["All"], "MechanicallyIntergerASICs": ["None"]},
                        {"GroupName": "Group2", "ExistingAsics": ["All"], "MechanicallyIntergerASICs": ["All"]}
                    ]
                },
                "MapGroupsRow4": {
                    "MapGroupsColumns": [
                        {"GroupName": "Group1", "ExistingAsics": ["None", "x"], "MechanicallyIntergerASICs": []},
                        {"GroupName": "Group2", "ExistingAsics": ["All"], "MechanicallyIntergerASICs": ["All"]}
                    ]
                }
            }
        }"#,
    )
    .unwrap();
    let doc = WaferDocument::new(catalog(), parsed.rows);

    let analysis = run(&doc);

    assert_eq!(analysis.rows.get("MapGroupsRow3").unwrap().columns, vec![14]);
    // two unlisted entries still take two columns
    assert_eq!(analysis.rows.get("MapGroupsRow4").unwrap().columns, vec![10]);
    assert_eq!(analysis.stats.rows_ignored, 1);
    assert_eq!(analysis.stats.rows_skipped, 2);
    assert_eq!(analysis.stats.rows_scanned, 2);
}

#[test]
fn test_unnegatable_row_index_skipped() {
    let doc = WaferDocument::new(
        catalog(),
        vec![
            WaferRow::new("MapGroupsRow-9223372036854775808", vec![all("Group2")]),
            WaferRow::new("MapGroupsRow1", vec![all("Group2")]),
        ],
    );

    let analysis = run(&doc);
    assert_eq!(analysis.stats.rows_skipped, 1);
    assert_eq!(analysis.coordinates.len(), 1);
    assert!(analysis.coordinates.get("NKF7_S_-8_-1").is_some());
}

#[test]
fn test_group_of_interest_missing_from_catalog() {
    let catalog = GroupCatalog::new().with_group("Group1", group(6, 99, "NKF7"));
    let doc = WaferDocument::new(
        catalog,
        vec![WaferRow::new(
            "MapGroupsRow2",
            vec![explicit("Group2", &[8], &[8])],
        )],
    );

    let analysis = run(&doc);
    assert!(analysis.coordinates.is_empty());
    assert!(analysis.rows.is_empty());
    assert_eq!(analysis.stats.out_of_bounds, 1);
    assert_eq!(analysis.stats.columns, 1);
    assert_eq!(analysis.stats.blocks_of_interest, 1);
}

#[test]
fn test_custom_family() {
    let catalog = GroupCatalog::new().with_group("Group2", group(10, 8, "PLN3"));
    let doc = WaferDocument::new(
        catalog,
        vec![WaferRow::new("MapGroupsRow0", vec![all("Group2")])],
    );
    let config = AnalysisConfig {
        family: "PLN3".to_string(),
        coordinate_key_prefix: "PLN3_S".to_string(),
        ..Default::default()
    };

    let analysis = analyze(&doc, &config).unwrap();
    assert!(analysis.coordinates.get("PLN3_S_-8_0").is_some());
}

#[test]
fn test_invalid_config_rejected() {
    let config = AnalysisConfig {
        family: String::new(),
        ..Default::default()
    };
    assert!(matches!(
        Analyzer::new(config),
        Err(MapError::InvalidConfig(_))
    ));
}
