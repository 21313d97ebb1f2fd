// Resume intelligence: profile extraction, JD matching, rewriting, PDF intake.
// All oracle calls go through `crate::oracle`.

pub mod handlers;
pub mod matching;
pub mod pdf;
pub mod profile;
pub mod prompts;
pub mod rewrite;
