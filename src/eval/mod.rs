//! Hand evaluation.
//!
//! The simulation engine consumes the [`Evaluator`] trait only. The crate
//! ships [`StandardEvaluator`] so estimations run out of the box.
//!
//! Scores follow the convention that lower is stronger. The category registry
//! maps names such as `"flush"` to the weakest score still in that category.

pub mod category;
pub mod evaluator;
pub mod hand_eval;

pub use category::{normalize_name, HandCategory};
pub use evaluator::{Evaluator, Score};
pub use hand_eval::{HandRank, StandardEvaluator};
