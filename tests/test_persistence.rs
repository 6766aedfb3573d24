use space_invaders::entities::ScoreEntry;
use space_invaders::persistence::*;

fn entry(name: &str, score: u32) -> ScoreEntry {
    ScoreEntry {
        name: name.to_string(),
        score,
    }
}

// ── JsonScoreStore ────────────────────────────────────────────────────────────

#[test]
fn missing_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonScoreStore::new(dir.path());
    assert_eq!(store.load_high_score(), 0);
    assert!(store.load_leaderboard().is_empty());
}

#[test]
fn high_score_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonScoreStore::new(dir.path());
    store.save_high_score(1234).unwrap();
    assert_eq!(JsonScoreStore::new(dir.path()).load_high_score(), 1234);

    let text = std::fs::read_to_string(dir.path().join(HIGH_SCORE_FILE)).unwrap();
    assert_eq!(text, "1234");
}

#[test]
fn leaderboard_is_written_sorted_and_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonScoreStore::new(dir.path());
    let entries: Vec<ScoreEntry> = (0..12).map(|i| entry(&format!("p{i}"), i * 10)).collect();
    store.save_leaderboard(&entries).unwrap();

    let loaded = store.load_leaderboard();
    assert_eq!(loaded.len(), 10);
    assert_eq!(loaded[0], entry("p11", 110));
    assert_eq!(loaded[9], entry("p2", 20));
}

#[test]
fn writes_create_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut store = JsonScoreStore::new(&nested);
    store.save_leaderboard(&[entry("ANON", 30)]).unwrap();
    assert!(nested.join(LEADERBOARD_FILE).exists());
}

#[test]
fn corrupt_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(HIGH_SCORE_FILE), "not json").unwrap();
    std::fs::write(dir.path().join(LEADERBOARD_FILE), "{\"oops\":1}").unwrap();
    let store = JsonScoreStore::new(dir.path());
    assert_eq!(store.load_high_score(), 0);
    assert!(store.load_leaderboard().is_empty());
}

#[test]
fn leaderboard_file_uses_name_and_score_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonScoreStore::new(dir.path());
    store.save_leaderboard(&[entry("ANON", 30)]).unwrap();
    let text = std::fs::read_to_string(dir.path().join(LEADERBOARD_FILE)).unwrap();
    assert_eq!(text, r#"[{"name":"ANON","score":30}]"#);
}

// ── MemoryScoreStore ──────────────────────────────────────────────────────────

#[test]
fn memory_store_counts_writes() {
    let mut store = MemoryScoreStore::default();
    store.save_high_score(10).unwrap();
    store.save_high_score(20).unwrap();
    store.save_leaderboard(&[entry("a", 1), entry("b", 2)]).unwrap();
    assert_eq!(store.high_score_writes, 2);
    assert_eq!(store.leaderboard_writes, 1);
    assert_eq!(store.load_high_score(), 20);
    assert_eq!(store.load_leaderboard()[0], entry("b", 2));
}
