//! Protocol encoding and decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, opcodes and sizes (source of truth)
//! - `reader`: safe byte access and protocol conventions
//! - `writer` / `parser`: domain-level encoding and decoding (no direct byte
//!   indexing)
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; the binary owns sockets and timing.

pub mod artnet;
pub(crate) mod common;
pub mod config;
