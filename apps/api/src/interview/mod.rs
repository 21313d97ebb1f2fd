// Adaptive interview engine.
// Flow: start → (question → answer → adapt)* → end.
// The difficulty controller is pure; sessions are mutated only through `store`.

pub mod difficulty;
pub mod evaluator;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod report;
pub mod session;
