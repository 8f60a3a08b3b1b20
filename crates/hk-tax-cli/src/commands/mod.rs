pub mod advice;
pub mod calculators;
pub mod optimize;
pub mod report;
