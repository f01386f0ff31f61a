//! TalkUp Practice Service (talkup-ps) - Library root
//!
//! Practice content delivery and speech scoring for the TalkUp
//! language-learning client:
//! - Content cache with generation-on-miss and static fallback
//! - Background queue replenishment below a low watermark
//! - Deterministic transcript scoring (accuracy / fluency / speed)

pub mod api;
pub mod cache;
pub mod corpus;
pub mod generation;
pub mod replenish;
pub mod scoring;
pub mod snapshot;
