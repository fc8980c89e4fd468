pub mod calc_engine;
pub mod editor;
pub mod format;
pub mod session;

pub use calc_engine::{evaluate, CalcError, Calculator, EvaluationTrace, Step};
