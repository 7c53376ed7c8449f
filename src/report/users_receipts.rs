//! Users and receipts report

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::{ReportFormat, format_datetime, write_report};
use crate::analysis::consistency::{ConsistencyIssue, login_order_issue, missing_values_issue};
use crate::analysis::distribution::{UserDistribution, analyze_user_distribution};
use crate::analysis::duplicates::{DuplicateSummary, check_duplicates};
use crate::analysis::missing::check_missing_values;
use crate::analysis::temporal::{TemporalSummary, analyze_temporal, login_before_creation};
use crate::error::ReportError;
use crate::table::{Flatten, Table, load_ndjson_file};

/// Flattened identity column shared by both datasets
pub const ID_FIELD: &str = "_id.$oid";
pub const CREATED_FIELD: &str = "createdDate.$date";
pub const LOGIN_FIELD: &str = "lastLogin.$date";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsersReceiptsReport {
    pub users: DuplicateSummary,
    pub receipts: DuplicateSummary,
    pub temporal: TemporalSummary,
    pub distribution: UserDistribution,
    pub consistency_issues: Vec<ConsistencyIssue>,
}

/// Run every users/receipts analysis pass. Both tables are expected to be
/// loaded with dotted flattening.
pub fn build(users: &Table, receipts: &Table) -> Result<UsersReceiptsReport, ReportError> {
    log::debug!(
        "Analyzing {} users and {} receipts",
        users.len(),
        receipts.len()
    );

    let inverted_logins = login_before_creation(users, CREATED_FIELD, LOGIN_FIELD)?;

    let consistency_issues = [
        missing_values_issue("users", &check_missing_values(users)),
        login_order_issue(&inverted_logins),
        missing_values_issue("receipts", &check_missing_values(receipts)),
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(UsersReceiptsReport {
        users: check_duplicates(users, &[ID_FIELD])?,
        receipts: check_duplicates(receipts, &[ID_FIELD])?,
        temporal: analyze_temporal(users, CREATED_FIELD, LOGIN_FIELD)?,
        distribution: analyze_user_distribution(users)?,
        consistency_issues,
    })
}

/// Load both files, analyze them and write the report
pub fn generate(
    users_path: &Path,
    receipts_path: &Path,
    report_path: &Path,
    format: ReportFormat,
) -> Result<UsersReceiptsReport, ReportError> {
    let users = load_ndjson_file(users_path, Flatten::Dotted)?;
    let receipts = load_ndjson_file(receipts_path, Flatten::Dotted)?;
    let report = build(&users, &receipts)?;
    write_report(&report, report_path, format)?;
    Ok(report)
}

fn write_duplicates(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    summary: &DuplicateSummary,
) -> fmt::Result {
    writeln!(f, "{}:", label)?;
    writeln!(f, "- Total Records: {}", summary.total_records)?;
    writeln!(f, "- Unique Records: {}", summary.unique_records)?;
    writeln!(
        f,
        "- Duplicate IDs: {}",
        summary.for_column(ID_FIELD).unwrap_or(0)
    )
}

impl fmt::Display for UsersReceiptsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Users & Receipts Data Quality Analysis Report")?;
        writeln!(f, "=============================================")?;
        writeln!(f)?;

        writeln!(f, "1. Duplicate Analysis")?;
        writeln!(f, "---------------------")?;
        write_duplicates(f, "Users", &self.users)?;
        writeln!(f)?;
        write_duplicates(f, "Receipts", &self.receipts)?;
        writeln!(f)?;

        let creation = self.temporal.creation.as_ref();
        let login = self.temporal.login.as_ref();
        writeln!(f, "2. Temporal Analysis")?;
        writeln!(f, "--------------------")?;
        writeln!(f, "Date Range:")?;
        writeln!(
            f,
            "- Earliest Creation: {}",
            format_datetime(creation.map(|r| &r.earliest))
        )?;
        writeln!(
            f,
            "- Latest Creation: {}",
            format_datetime(creation.map(|r| &r.latest))
        )?;
        writeln!(
            f,
            "- Earliest Login: {}",
            format_datetime(login.map(|r| &r.earliest))
        )?;
        writeln!(
            f,
            "- Latest Login: {}",
            format_datetime(login.map(|r| &r.latest))
        )?;
        writeln!(f)?;

        let dist = &self.distribution;
        writeln!(f, "3. User Distribution")?;
        writeln!(f, "--------------------")?;
        writeln!(f, "By State: {}", dist.by_state)?;
        writeln!(f, "By Role: {}", dist.by_role)?;
        writeln!(f, "By Signup Source: {}", dist.by_signup_source)?;
        writeln!(f, "Active Users: {}", dist.active_users)?;
        writeln!(f)?;

        writeln!(f, "4. Data Consistency Issues")?;
        writeln!(f, "--------------------------")?;
        if self.consistency_issues.is_empty() {
            writeln!(f, "No issues found")
        } else {
            for issue in &self.consistency_issues {
                writeln!(f, "{}", issue)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_ndjson;
    use insta::assert_snapshot;
    use std::fs;
    use tempfile::TempDir;

    const USERS: &str = r#"{"_id":{"$oid":"5ff1e194b6a9d73a3a9f1052"},"active":true,"createdDate":{"$date":1609687444800},"lastLogin":{"$date":1609687537858},"role":"consumer","signUpSource":"Email","state":"WI"}
{"_id":{"$oid":"5ff1e194b6a9d73a3a9f1052"},"active":true,"createdDate":{"$date":1609687444800},"lastLogin":{"$date":1609687537858},"role":"consumer","signUpSource":"Email","state":"WI"}
{"_id":{"$oid":"5ff1e1eacfcf6c399c274ae6"},"active":false,"createdDate":{"$date":1609687530554},"lastLogin":{"$date":1609687530000},"role":"fetch-staff","signUpSource":"Google","state":"WI"}"#;

    const RECEIPTS: &str = r#"{"_id":{"$oid":"5ff1e1eb0a720f0523000575"},"bonusPointsEarned":500,"rewardsReceiptItemList":[{"barcode":"4011","quantityPurchased":5}],"userId":"5ff1e194b6a9d73a3a9f1052"}
{"_id":{"$oid":"5ff1e1bb0a720f052300056b"},"rewardsReceiptItemList":[{"barcode":"028400642255"}],"userId":"5ff1e194b6a9d73a3a9f1052"}"#;

    fn tables() -> (Table, Table) {
        (
            parse_ndjson(USERS, Flatten::Dotted).unwrap(),
            parse_ndjson(RECEIPTS, Flatten::Dotted).unwrap(),
        )
    }

    #[test]
    fn test_build_counts_duplicates_per_dataset() {
        let (users, receipts) = tables();
        let report = build(&users, &receipts).unwrap();

        assert_eq!(report.users.total_records, 3);
        assert_eq!(report.users.unique_records, 2);
        assert_eq!(report.users.for_column(ID_FIELD), Some(1));
        assert_eq!(report.receipts.total_records, 2);
        assert_eq!(report.receipts.unique_records, 2);
        assert_eq!(report.receipts.for_column(ID_FIELD), Some(0));
    }

    #[test]
    fn test_build_collects_consistency_issues() {
        let (users, receipts) = tables();
        let report = build(&users, &receipts).unwrap();

        assert_eq!(
            report.consistency_issues,
            vec![
                ConsistencyIssue::LoginBeforeCreation { count: 1 },
                ConsistencyIssue::MissingValues {
                    dataset: "receipts".to_string(),
                    columns: vec![("bonusPointsEarned".to_string(), 1)],
                },
            ]
        );
    }

    #[test]
    fn test_missing_id_column_fails() {
        let (users, _) = tables();
        let receipts = parse_ndjson(r#"{"userId":"x"}"#, Flatten::Dotted).unwrap();
        assert!(matches!(
            build(&users, &receipts),
            Err(ReportError::MissingColumn { column }) if column == ID_FIELD
        ));
    }

    #[test]
    fn test_generate_reads_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let users_path = temp_dir.path().join("users.json");
        let receipts_path = temp_dir.path().join("receipts.json");
        let report_path = temp_dir.path().join("users_receipts.txt");
        fs::write(&users_path, USERS).unwrap();
        fs::write(&receipts_path, RECEIPTS).unwrap();

        let report = generate(&users_path, &receipts_path, &report_path, ReportFormat::Text).unwrap();
        assert_eq!(report.distribution.active_users, 2);
        assert_eq!(fs::read_to_string(&report_path).unwrap(), report.to_string());
    }

    #[test]
    fn test_generate_fails_without_receipts_file() {
        let temp_dir = TempDir::new().unwrap();
        let users_path = temp_dir.path().join("users.json");
        let report_path = temp_dir.path().join("users_receipts.txt");
        fs::write(&users_path, USERS).unwrap();

        let result = generate(
            &users_path,
            &temp_dir.path().join("missing.json"),
            &report_path,
            ReportFormat::Text,
        );
        assert!(matches!(result, Err(ReportError::Io { .. })));
        assert!(!report_path.exists());
    }

    #[test]
    fn snapshot_users_receipts_report_text() {
        let (users, receipts) = tables();
        let report = build(&users, &receipts).unwrap();
        assert_snapshot!(report.to_string(), @r"
        Users & Receipts Data Quality Analysis Report
        =============================================

        1. Duplicate Analysis
        ---------------------
        Users:
        - Total Records: 3
        - Unique Records: 2
        - Duplicate IDs: 1

        Receipts:
        - Total Records: 2
        - Unique Records: 2
        - Duplicate IDs: 0

        2. Temporal Analysis
        --------------------
        Date Range:
        - Earliest Creation: 2021-01-03 15:24:04.800
        - Latest Creation: 2021-01-03 15:25:30.554
        - Earliest Login: 2021-01-03 15:25:30.000
        - Latest Login: 2021-01-03 15:25:37.858

        3. User Distribution
        --------------------
        By State: {WI: 3}
        By Role: {consumer: 2, fetch-staff: 1}
        By Signup Source: {Email: 2, Google: 1}
        Active Users: 2

        4. Data Consistency Issues
        --------------------------
        Found 1 cases where login date is before creation date
        Missing values found in receipts: {bonusPointsEarned: 1}
        ");
    }
}
