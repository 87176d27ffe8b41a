//! Service layer.
//!
//! | Service | Purpose |
//! |---------|---------|
//! | [`AssessmentGateway`] | Privacy impact assessments via a text-generation provider |

mod assessment;

pub use assessment::AssessmentGateway;
