pub mod problem;

pub use problem::{ApiResult, Problem};
