//! End-to-end exchange between two devices with no shared memory: the
//! share URL is the only channel.

use duet_core::codec::{build_share_url, decode_token_from_url};
use duet_core::merge::{ConflictKind, Kept};
use duet_core::model::{LockState, Question, Set, Side};
use duet_core::state::GameState;
use duet_core::store::SessionStore;
use duet_core::{ensure_order, merge_into_state, resolve_conflict};
use tempfile::TempDir;

fn questions() -> Vec<Question> {
    let mut out = Vec::new();
    for set in Set::ALL {
        for i in 0..3 {
            out.push(Question::new(
                format!("s{}q{i}", set.number()),
                format!("question {i} of set {set}"),
                set,
            ));
        }
    }
    out
}

#[test]
fn share_import_share_back_converges() {
    let questions = questions();

    // Device A starts the game and answers its side of two questions.
    let dir_a = TempDir::new().expect("tempdir");
    let store_a = SessionStore::new(dir_a.path());
    let mut a = store_a.load();
    a.players.a = "Ana".into();
    ensure_order(&mut a, &questions);
    let q1 = a.order[0].clone();
    let q2 = a.order[1].clone();
    a.entry_mut(&q1).set_text(Side::A, "A's answer to q1");
    *a.locks_mut(&q1).side_mut(Side::A) = LockState::locked_at(1_000);
    a.entry_mut(&q2).set_text(Side::A, "draft for q2");
    store_a.save(&a).expect("save A");

    let url = build_share_url("https://duet.example/play", &a);

    // Device B starts blank and imports A's link.
    let dir_b = TempDir::new().expect("tempdir");
    let store_b = SessionStore::new(dir_b.path());
    let mut b = store_b.load();
    let payload = decode_token_from_url(&url).expect("decode A's link");
    let report = merge_into_state(&mut b, &payload);
    store_b.save(&b).expect("save B");

    assert!(report.is_clean());
    // B adopted A's order wholesale and its answers carried over.
    assert_eq!(b.order, a.order);
    assert_eq!(b.entry(&q1).a, "A's answer to q1");
    assert!(b.lock_pair(&q1).a.locked);
    assert_eq!(b.players.a, "Ana");

    // B answers its own side and locks q1, then shares back.
    b.players.b = "Ben".into();
    b.entry_mut(&q1).set_text(Side::B, "B's answer to q1");
    *b.locks_mut(&q1).side_mut(Side::B) = LockState::locked_at(2_000);
    store_b.save(&b).expect("save B");

    let url_back = decode_token_from_url(&build_share_url("https://duet.example/play", &b))
        .expect("decode B's link");
    let report = merge_into_state(&mut a, &url_back);

    assert!(report.is_clean());
    assert_eq!(a.players.b, "Ben");
    assert_eq!(a.entry(&q1).b, "B's answer to q1");
    assert!(a.lock_pair(&q1).both_locked(), "q1 is revealed on A now");
    // Both copies agree on every note and lock.
    assert_eq!(a.notes, b.notes);
    assert_eq!(a.locks, b.locks);
}

#[test]
fn conflicting_locks_surface_and_resolve() {
    let mut a = GameState {
        order: vec!["q1".into()],
        ..GameState::default()
    };
    a.entry_mut("q1").set_text(Side::A, "committed late");
    *a.locks_mut("q1").side_mut(Side::A) = LockState::locked_at(900);

    let mut b = GameState {
        order: vec!["q1".into()],
        ..GameState::default()
    };
    b.entry_mut("q1").set_text(Side::A, "committed first");
    *b.locks_mut("q1").side_mut(Side::A) = LockState::locked_at(100);

    let payload = b.to_payload();
    let mut report = merge_into_state(&mut a, &payload);

    // First lock wins automatically, but the conflict is still reported.
    assert_eq!(a.entry("q1").a, "committed first");
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].kind, ConflictKind::BothLockedDifferent);
    assert_eq!(report.conflicts[0].kept, Kept::Incoming);

    // The user overrules the tie-break: the displaced local copy comes
    // back, lock timestamp included.
    resolve_conflict(&mut a, &payload, &mut report, "q1", Side::A, Kept::Local)
        .expect("conflict exists");
    assert!(report.is_clean());
    assert_eq!(a.entry("q1").a, "committed late");
    assert_eq!(a.lock_pair("q1").a, LockState::locked_at(900));
}

#[test]
fn reimporting_the_same_link_is_a_no_op() {
    let questions = questions();
    let mut a = GameState::default();
    ensure_order(&mut a, &questions);
    let q1 = a.order[0].clone();
    a.entry_mut(&q1).set_text(Side::A, "hello");
    *a.locks_mut(&q1).side_mut(Side::A) = LockState::locked_at(5);

    let url = build_share_url("https://duet.example/play", &a);
    let payload = decode_token_from_url(&url).expect("decode");

    let mut b = GameState::default();
    merge_into_state(&mut b, &payload);
    let once = (b.notes.clone(), b.locks.clone(), b.order.clone());
    merge_into_state(&mut b, &payload);
    assert_eq!((b.notes, b.locks, b.order), once);
}
