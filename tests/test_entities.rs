use space_invaders::entities::*;

#[test]
fn alien_values_by_kind() {
    let points: Vec<u32> = AlienKind::ALL.iter().map(|k| k.spec().points).collect();
    assert_eq!(points, vec![40, 30, 20, 10]);
}

#[test]
fn every_kind_shares_the_footprint() {
    for kind in AlienKind::ALL {
        let spec = kind.spec();
        assert_eq!((spec.width, spec.height), (ALIEN_WIDTH, ALIEN_HEIGHT));
        assert_eq!(spec.idle_frames, 2);
        assert_eq!(spec.explosion_frames, 3);
    }
}

#[test]
fn row_bands() {
    assert_eq!(AlienKind::for_row(0), AlienKind::Red);
    assert_eq!(AlienKind::for_row(2), AlienKind::Pink);
    assert_eq!(AlienKind::for_row(4), AlienKind::Blue);
    assert_eq!(AlienKind::for_row(5), AlienKind::Green);
    assert_eq!(AlienKind::for_row(40), AlienKind::Green);
}

#[test]
fn controls_default_to_idle() {
    let c = Controls::default();
    assert!(!(c.left || c.right || c.up || c.down || c.fire || c.quit));
}

#[test]
fn score_entry_json_shape() {
    let e = ScoreEntry {
        name: "ANON".to_string(),
        score: 120,
    };
    let json = serde_json::to_string(&e).unwrap();
    assert_eq!(json, r#"{"name":"ANON","score":120}"#);
    let back: ScoreEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, e);
}
