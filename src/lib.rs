//! Timed poker-math drill: pot-odds and fold-equity quizzes plus a
//! hand-strength bucketing drill, with score, streak and mistake tracking
//! persisted between runs.

pub mod cards;
pub mod cli;
pub mod display;
pub mod drill;
pub mod error;
pub mod labels;
pub mod math_engine;
pub mod question;
pub mod range3;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;
