//! Play-order generation.
//!
//! The order is a permutation of all question ids with a fixed macro
//! structure: every question of set one comes before set two, and set two
//! before set three. Only the order inside each set is randomized. Once a
//! valid order exists it is never reshuffled, so both devices keep a stable
//! sequence for the whole session.

use rand::seq::SliceRandom;
use tracing::debug;

use crate::model::{Question, Set};
use crate::state::GameState;

/// Ensure `state.order` is a valid permutation of the live question ids,
/// regenerating it when it is not (empty, stale length, unknown ids).
///
/// Returns `true` when a new order was generated. Idempotent: calling this
/// on a state with a valid order changes nothing.
pub fn ensure_order(state: &mut GameState, questions: &[Question]) -> bool {
    if is_permutation(&state.order, questions) {
        return false;
    }

    let mut rng = rand::thread_rng();
    let mut order = Vec::with_capacity(questions.len());
    for set in Set::ALL {
        let mut ids: Vec<String> = questions
            .iter()
            .filter(|q| q.set == set)
            .map(|q| q.id.clone())
            .collect();
        ids.shuffle(&mut rng);
        order.extend(ids);
    }

    debug!(questions = order.len(), "generated new play order");
    state.order = order;
    state.clamp_index();
    true
}

/// Whether `order` contains exactly the ids of `questions`, each once.
fn is_permutation(order: &[String], questions: &[Question]) -> bool {
    if order.is_empty() || order.len() != questions.len() {
        return false;
    }
    let mut have: Vec<&str> = order.iter().map(String::as_str).collect();
    let mut want: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    have.sort_unstable();
    want.sort_unstable();
    have == want
}
