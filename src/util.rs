//! Shared utility modules used across SymSpell components.

pub mod hash;
pub mod varint;
