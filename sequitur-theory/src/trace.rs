/*! Names the spans, events and fields that theory extension and derivation search report
through `tracing`. */
pub mod subscriber;

// search record fields:
pub const EVENT_FIELD: &str = "event";
pub const TARGET_FIELD: &str = "target";
pub const DEPTH_FIELD: &str = "depth";
pub const RULE_FIELD: &str = "rule";
pub const PREMISES_FIELD: &str = "premises";
pub const THEOREM_FIELD: &str = "theorem";

// log span types:
/// Inside the search for one target formula.
pub const SEARCH_STEP: &str = "@search_step";

// log event types:
/// The target is already a valid statement.
pub const EXACT: &str = "@exact";

/// A rule concludes the target; its necessary premises are being established.
pub const CANDIDATE: &str = "@candidate";

/// A new theorem is derived.
pub const DERIVED: &str = "@derived";

/// A derivation is appended to a theory.
pub const EXTEND: &str = "@extend";

/// The search for the target failed.
pub const FAIL: &str = "@fail";

/// The depth limit is reached.
pub const DEPTH: &str = "@depth";
