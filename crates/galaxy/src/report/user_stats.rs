//! Per-user statistics report.

use super::{FeatureCount, PlanResults};
use crate::error::Error;

pub fn statistics(results: &PlanResults) -> Result<Vec<FeatureCount>, Error> {
    Ok(results.get("user_statistics")?.deserialize_rows()?)
}
