//! User population breakdowns

use serde::Serialize;
use serde_json::Value;

use super::Frequencies;
use super::categorical::value_counts;
use crate::error::ReportError;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDistribution {
    pub by_state: Frequencies,
    pub by_role: Frequencies,
    pub by_signup_source: Frequencies,
    pub active_users: usize,
}

pub fn analyze_user_distribution(table: &Table) -> Result<UserDistribution, ReportError> {
    let active_users = table
        .require_column("active")?
        .values()
        .filter(|v| matches!(v, Value::Bool(true)))
        .count();

    Ok(UserDistribution {
        by_state: value_counts(table, "state")?,
        by_role: value_counts(table, "role")?,
        by_signup_source: value_counts(table, "signUpSource")?,
        active_users,
    })
}
