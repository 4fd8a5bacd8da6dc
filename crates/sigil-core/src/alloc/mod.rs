//! Optimized collection types for Sigil.
//!
//! Glyph tables are looked up once per character on every measure and draw
//! pass, so they use AHash instead of SipHash.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
