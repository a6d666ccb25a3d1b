//! The fixed state-to-code contract shared with the fitted artifacts.
//!
//! These codes were assigned when the model was trained and must never
//! change independently of the artifacts. The encoder artifact carries the
//! same mapping; the two are checked against each other at load time.

/// Category codes in fit order. The one-hot columns of the fitted encoder
/// follow this code order.
pub const STATE_CODES: [(&str, i64); 3] = [("New York", 0), ("California", 1), ("Florida", 2)];

/// Look up the category code for a state label.
pub fn state_code(state: &str) -> Option<i64> {
    STATE_CODES
        .iter()
        .find(|(name, _)| *name == state)
        .map(|&(_, code)| code)
}

/// Valid state labels, in code order.
pub fn valid_states() -> Vec<&'static str> {
    STATE_CODES.iter().map(|&(name, _)| name).collect()
}
