pub mod cohort;
pub mod page;
pub mod record;

pub use cohort::{Cohort, CohortFlags, CohortResult, RecordAssessment, RiskScore};
pub use page::{Page, Pagination};
pub use record::{BloodPressure, NormalizedRecord, RawRecord};
