//! Background home-directory scanner and cleanup engine.
//!
//! One [`Engine`] instance owns the category rules, the scan results and the
//! single background walk. Scans classify regular files into cleanup and
//! migration categories; bulk operations then delete or relocate the
//! recorded sets.

mod category;
mod cleanup;
mod engine;
mod rules;
mod scanner;
mod store;
mod utils;

pub use category::{Category, CategorySet};
pub use engine::Engine;
pub use rules::CategoryRules;
pub use store::FileRecord;
