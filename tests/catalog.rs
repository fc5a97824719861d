use std::fs;

use tarnim::{Catalog, Config, Error, MatchKind};

const CORPUS: &str = r#"[
    {"song_number": "42", "song_title": "الرَّبُّ راعِيَّ", "song_lyrics": "الرب راعي فلا يعوزني\nفي مراع خضر يربضني"},
    {"song_number": "7", "song_title": "نشيد الفَرَح", "song_lyrics": "هللويا\nآمين"},
    {"song_number": "42", "song_title": "الرب راعي (لحن ثان)", "song_lyrics": "\nترنيمة بديلة"}
]"#;

fn setup() -> (tempfile::TempDir, Config, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::in_dir(dir.path());
    fs::write(&config.corpus_path, CORPUS).unwrap();
    let mut catalog = Catalog::open(&config.db_path).unwrap();
    assert_eq!(catalog.import_file(&config.corpus_path).unwrap(), 3);
    (dir, config, catalog)
}

#[test]
fn test_import_persists_across_reopen() {
    let (_dir, config, catalog) = setup();
    drop(catalog);

    let reopened = Catalog::open(&config.db_path).unwrap();
    assert_eq!(reopened.song_count().unwrap(), 3);
    assert_eq!(reopened.search("نشيد الفرح").unwrap().len(), 1);
}

#[test]
fn test_search_with_snippets_end_to_end() {
    let (_dir, _config, catalog) = setup();

    let results = catalog.search_with_snippets("يَعوزني").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, MatchKind::Lyric);
    assert_eq!(results[0].match_line_number, 1);
    assert_eq!(results[0].matching_line, "الرب راعي فلا يعوزني");

    let results = catalog.search_with_snippets("الفرح").unwrap();
    assert_eq!(results[0].kind, MatchKind::Title);
    assert_eq!(results[0].match_line_number, 0);

    let results = catalog.search_with_snippets("ترنيمة 42").unwrap();
    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| r.song.number == 42 && r.match_line_number == 1));
    assert_eq!(results[1].matching_line, "ترنيمة بديلة");

    let all = catalog.search_with_snippets("").unwrap();
    let numbers: Vec<i64> = all.iter().map(|r| r.song.number).collect();
    assert_eq!(numbers, vec![7, 42, 42]);
}

#[test]
fn test_reimport_makes_old_ids_stale() {
    let (_dir, config, mut catalog) = setup();
    let old_id = catalog.all_songs().unwrap()[0].id;

    assert_eq!(catalog.import_file(&config.corpus_path).unwrap(), 3);
    assert!(catalog.song_by_id(old_id).unwrap().is_none());
    assert_eq!(catalog.song_count().unwrap(), 3);
    assert_eq!(catalog.search("42").unwrap().len(), 2);
}

#[test]
fn test_bad_corpus_is_rejected_and_store_kept() {
    let (dir, _config, mut catalog) = setup();
    let bad = dir.path().join("bad.json");
    fs::write(
        &bad,
        r#"[{"song_number": "1", "song_title": "a"}, {"song_number": "x1", "song_title": "b"}]"#,
    )
    .unwrap();

    let err = catalog.import_file(&bad).unwrap_err();
    assert!(matches!(err, Error::InvalidEntry { index: 1, .. }));
    assert_eq!(catalog.song_count().unwrap(), 3);
}
