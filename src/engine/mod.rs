pub mod estimator;
pub mod matching;
pub mod pricing;
pub mod route;
