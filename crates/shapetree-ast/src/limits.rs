//! Centralized limits for shapetree.
//!
//! Tree construction, folding and queries are iterative and have no depth
//! limit of their own. The only recursive algorithm is the `serde` phase of
//! JSON decoding, which is bounded here.

/// Maximum JSON nesting depth accepted by [`crate::decode::from_json`].
///
/// A struct level spans three JSON levels (node, `fields`, field entry).
/// Text parsed by [`crate::decode::from_json_str`] is held to 128 levels by
/// `serde_json` before this applies.
pub const MAX_DECODE_DEPTH: u32 = 1024;

/// Remaining stack below which decoding a child node switches to a new segment.
pub const DECODE_STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated while decoding.
pub const DECODE_STACK_GROWTH: usize = 1024 * 1024;

/// Initial capacity of builder and fold work-lists.
pub const INITIAL_WORKLIST_CAPACITY: usize = 64;
