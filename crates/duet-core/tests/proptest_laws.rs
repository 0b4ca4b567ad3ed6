//! Property tests for the codec and merge laws.

use duet_core::codec::{decode_session, encode_session};
use duet_core::merge_into_state;
use proptest::prelude::*;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    /// decode(encode(p)) == p for every valid payload.
    #[test]
    fn token_round_trip(payload in arb_payload()) {
        let token = encode_session(&payload);
        prop_assert!(token.is_ascii());
        let decoded = decode_session(&token).expect("decode own token");
        prop_assert_eq!(decoded, payload);
    }

    /// Merging the same payload twice leaves notes and locks unchanged.
    #[test]
    fn merge_idempotent(mut local in arb_state(), payload in arb_payload()) {
        merge_into_state(&mut local, &payload);
        let once = notes_and_locks(&local);
        merge_into_state(&mut local, &payload);
        prop_assert_eq!(notes_and_locks(&local), once);
    }

    /// A locked incoming side always ends locked locally.
    #[test]
    fn lock_dominance(mut local in arb_state(), payload in arb_payload()) {
        merge_into_state(&mut local, &payload);
        for (qid, pair) in &payload.locks {
            for side in duet_core::Side::ALL {
                if pair.side(side).locked {
                    prop_assert!(local.lock_pair(qid).side(side).locked);
                }
            }
        }
    }

    /// Merge never leaves the index out of bounds.
    #[test]
    fn index_invariant_holds(mut local in arb_state(), payload in arb_payload()) {
        merge_into_state(&mut local, &payload);
        if local.order.is_empty() {
            prop_assert_eq!(local.index, 0);
        } else {
            prop_assert!(local.index < local.order.len());
        }
    }

    /// A non-empty unlocked local draft is never overwritten by an
    /// unlocked incoming one.
    #[test]
    fn unlocked_drafts_are_fill_only(mut local in arb_state(), payload in arb_payload()) {
        let before = notes_and_locks(&local).0;
        merge_into_state(&mut local, &payload);
        for (qid, entry) in &before {
            for side in duet_core::Side::ALL {
                let was_unlocked = !local.lock_pair(qid).side(side).locked
                    && !payload
                        .locks
                        .get(qid)
                        .is_some_and(|p| p.side(side).locked);
                if was_unlocked && !entry.text(side).trim().is_empty() {
                    let local_entry = local.entry(qid);
                    prop_assert_eq!(local_entry.text(side), entry.text(side));
                }
            }
        }
    }
}
