//! fitcheck-report — presentation of assessment results.

pub mod html;
pub mod radar;
