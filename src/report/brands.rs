//! Brand catalog report

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::{ReportFormat, write_report};

use crate::analysis::barcode::{BarcodeSummary, check_barcode_validity};
use crate::analysis::categorical::{
    BrandConsistency, CategoricalSummary, analyze_categorical, brand_consistency,
};
use crate::analysis::duplicates::{DuplicateSummary, check_duplicates};
use crate::analysis::missing::{MissingSummary, check_missing_values};
use crate::error::ReportError;
use crate::table::{Flatten, Table, load_ndjson_file};

/// Columns expected to identify a brand
pub const IDENTITY_FIELDS: [&str; 3] = ["barcode", "name", "brandCode"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandReport {
    pub total_records: usize,
    pub missing_data: MissingSummary,
    pub duplicates: DuplicateSummary,
    pub categorical_analysis: CategoricalSummary,
    pub barcode_analysis: BarcodeSummary,
    pub brand_analysis: BrandConsistency,
}

/// Run every brand analysis pass over the table
pub fn build(table: &Table) -> Result<BrandReport, ReportError> {
    log::debug!("Analyzing {} brand records", table.len());

    Ok(BrandReport {
        total_records: table.len(),
        missing_data: check_missing_values(table),
        duplicates: check_duplicates(table, &IDENTITY_FIELDS)?,
        categorical_analysis: analyze_categorical(table, "category", "categoryCode")?,
        barcode_analysis: check_barcode_validity(table, "barcode")?,
        brand_analysis: brand_consistency(table)?,
    })
}

/// Load the brand file, analyze it and write the report
pub fn generate(
    json_path: &Path,
    report_path: &Path,
    format: ReportFormat,
) -> Result<BrandReport, ReportError> {
    let table = load_ndjson_file(json_path, Flatten::Nested)?;
    let report = build(&table)?;
    write_report(&report, report_path, format)?;
    Ok(report)
}

impl BrandReport {
    fn key_duplicates(&self, column: &str) -> usize {
        self.duplicates.for_column(column).unwrap_or(0)
    }
}

impl fmt::Display for BrandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Brand Data Quality Analysis Report")?;
        writeln!(f, "==================================")?;
        writeln!(f)?;

        writeln!(f, "1. Dataset Size:")?;
        writeln!(f, "- Total Records: {}", self.total_records)?;
        writeln!(f)?;

        writeln!(f, "2. Missing Data Summary:")?;
        writeln!(
            f,
            "- Fields with missing values: {} of {}",
            self.missing_data.with_missing().count(),
            self.missing_data.columns.len()
        )?;
        for column in &self.missing_data.columns {
            writeln!(
                f,
                "  - {}: {} ({:.2}%)",
                column.column, column.total_missing, column.percent_missing
            )?;
        }
        writeln!(f)?;

        writeln!(f, "3. Duplicate Analysis:")?;
        writeln!(f, "- Exact duplicates: {}", self.duplicates.exact_duplicates)?;
        writeln!(f, "- Barcode duplicates: {}", self.key_duplicates("barcode"))?;
        writeln!(f, "- Name duplicates: {}", self.key_duplicates("name"))?;
        writeln!(f, "- Brand code duplicates: {}", self.key_duplicates("brandCode"))?;
        writeln!(f)?;

        let categorical = &self.categorical_analysis;
        writeln!(f, "4. Categorical Consistency:")?;
        writeln!(f, "- Unique categories: {}", categorical.unique_categories.len())?;
        writeln!(
            f,
            "- Category-CategoryCode mismatches: {}",
            categorical.category_code_mismatches
        )?;
        writeln!(f)?;

        let barcodes = &self.barcode_analysis;
        writeln!(f, "5. Barcode Analysis:")?;
        writeln!(f, "- Unique barcodes: {}", barcodes.unique_barcode_count)?;
        writeln!(f, "- Length distribution: {}", barcodes.length_distribution)?;
        writeln!(
            f,
            "- Invalid format barcodes: {}",
            barcodes.non_numeric_barcodes.len()
        )?;
        writeln!(f)?;

        let brands = &self.brand_analysis;
        writeln!(f, "6. Brand Analysis:")?;
        writeln!(f, "- Brands missing codes: {}", brands.brands_without_codes)?;
        writeln!(f, "- Name-Code mismatches: {}", brands.mismatched_names)?;
        writeln!(f, "- Top brand distribution: {}", brands.top_brand_distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_ndjson;
    use insta::assert_snapshot;
    use std::fs;
    use tempfile::TempDir;

    const BRANDS: &str = r#"{"_id":{"$oid":"601ac115be37ce2ead437551"},"barcode":"511111019862","category":"Baking","categoryCode":"BAKING","name":"test brand @1612366101024","topBrand":false}
{"_id":{"$oid":"601c5460be37ce2ead43755f"},"barcode":"511111019862","category":"Beverages","categoryCode":"BEVERAGES","name":"Starbucks","brandCode":"Starbucks","topBrand":true}
{"_id":{"$oid":"601ac142be37ce2ead43755d"},"barcode":"51111181990X","category":"Baking","name":"test brand @1612366146176","brandCode":"TEST BRANDCODE"}"#;

    fn report() -> BrandReport {
        let table = parse_ndjson(BRANDS, Flatten::Nested).unwrap();
        build(&table).unwrap()
    }

    #[test]
    fn test_build_collects_every_section() {
        let report = report();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.duplicates.for_column("barcode"), Some(1));
        assert_eq!(report.duplicates.exact_duplicates, 0);
        assert_eq!(report.categorical_analysis.unique_categories.len(), 2);
        assert_eq!(report.categorical_analysis.category_code_mismatches, 0);
        assert_eq!(
            report.barcode_analysis.non_numeric_barcodes,
            vec!["51111181990X".to_string()]
        );
        assert_eq!(report.brand_analysis.brands_without_codes, 1);
        assert_eq!(report.brand_analysis.mismatched_names, 2);
    }

    #[test]
    fn test_missing_brand_code_column_fails() {
        let text = r#"{"barcode":"1","category":"Baking","categoryCode":"BAKING","name":"x","topBrand":false}"#;
        let table = parse_ndjson(text, Flatten::Nested).unwrap();
        assert!(matches!(
            build(&table),
            Err(ReportError::MissingColumn { column }) if column == "brandCode"
        ));
    }

    #[test]
    fn test_missing_section_lists_every_column() {
        let text = report().to_string();
        assert!(text.contains("- Fields with missing values: 3 of 7"));
        assert!(text.contains("  - barcode: 0 (0.00%)"));
        assert!(text.contains("  - brandCode: 1 (33.33%)"));
    }

    #[test]
    fn test_generate_writes_report_file() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("brands.json");
        let report_path = temp_dir.path().join("report").join("brands.txt");
        fs::write(&json_path, BRANDS).unwrap();

        let report = generate(&json_path, &report_path, ReportFormat::Text).unwrap();
        let written = fs::read_to_string(&report_path).unwrap();
        assert_eq!(written, report.to_string());
        assert!(written.contains("- Barcode duplicates: 1"));
    }

    #[test]
    fn test_generate_json_report() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("brands.json");
        let report_path = temp_dir.path().join("brands.json.out");
        fs::write(&json_path, BRANDS).unwrap();

        generate(&json_path, &report_path, ReportFormat::Json).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(parsed["total_records"], 3);
        assert_eq!(parsed["barcode_analysis"]["length_distribution"]["12"], 3);
    }

    #[test]
    fn snapshot_brand_report_text() {
        assert_snapshot!(report().to_string(), @r"
        Brand Data Quality Analysis Report
        ==================================

        1. Dataset Size:
        - Total Records: 3

        2. Missing Data Summary:
        - Fields with missing values: 3 of 7
          - _id: 0 (0.00%)
          - barcode: 0 (0.00%)
          - category: 0 (0.00%)
          - categoryCode: 1 (33.33%)
          - name: 0 (0.00%)
          - topBrand: 1 (33.33%)
          - brandCode: 1 (33.33%)

        3. Duplicate Analysis:
        - Exact duplicates: 0
        - Barcode duplicates: 1
        - Name duplicates: 0
        - Brand code duplicates: 0

        4. Categorical Consistency:
        - Unique categories: 2
        - Category-CategoryCode mismatches: 0

        5. Barcode Analysis:
        - Unique barcodes: 2
        - Length distribution: {12: 3}
        - Invalid format barcodes: 1

        6. Brand Analysis:
        - Brands missing codes: 1
        - Name-Code mismatches: 2
        - Top brand distribution: {false: 1, true: 1}
        ");
    }
}
