//! The canonical consolidated record and its sections.
//!
//! Every declared field is present in serialized output even when the
//! source data was unavailable: string fields default to the missing-value
//! sentinel, lists to empty. Monetary leaves only ever hold the sentinel or
//! a formatted `R$ x.xxx,xx` string once consolidation has run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::normalize::MISSING_VALUE;

/// Serde default: the missing-value sentinel.
pub(crate) fn missing() -> String {
    MISSING_VALUE.to_string()
}

/// Accept string, number, bool or null JSON leaves as a `String`.
///
/// The extraction service is instructed to return strings, but numeric
/// columns sometimes come back as bare numbers; coercing here keeps the
/// normalizer's input uniform. Null maps to the sentinel, booleans to the
/// Sim/Não convention the documents use.
pub(crate) fn stringlike<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => missing(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(true) => "Sim".to_string(),
        serde_json::Value::Bool(false) => "Não".to_string(),
        other => other.to_string(),
    })
}

/// The consolidated output of one pipeline run.
///
/// Section ordering mirrors extraction order; no re-sorting is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub header: PolicyHeader,

    #[serde(default)]
    pub risk_locations: Vec<RiskLocation>,

    #[serde(default)]
    pub coverages: Vec<CoverageEntry>,

    #[serde(default)]
    pub financial_breakdown: FinancialBreakdown,
}

/// Run provenance attached to every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Source policy filename.
    pub source_file: String,

    /// When consolidation produced this record.
    pub generated_at: DateTime<Utc>,

    /// Unique id of the pipeline run.
    pub run_id: Uuid,
}

impl RunMetadata {
    /// Stamp metadata for a run starting now.
    pub fn now(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            generated_at: Utc::now(),
            run_id: Uuid::new_v4(),
        }
    }
}

/// Policy identity, dates, currency and the per-peril derived fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyHeader {
    pub metadata: RunMetadata,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub insured: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub tax_id: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub policy_number: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub inception: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub expiry: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub currency: String,

    /// Maximum guarantee limit, formatted.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub max_guarantee_limit: String,

    /// Issued or net premium, formatted.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub net_premium: String,

    /// Our co-insurance share (percentage text, kept raw).
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub our_share: String,

    /// Whether the policy declares a single combined limit (Sim/Não).
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub single_limit: String,

    /// Whether contingent business interruption cover is present (Sim/Não).
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub has_business_interruption: String,

    pub country: String,

    /// Business interruption limit, from coverage lookup.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub business_interruption_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub windstorm_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub windstorm_deductible: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub flood_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub flood_deductible: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub earthquake_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub earthquake_deductible: String,

    #[serde(default)]
    pub co_insurers: Vec<CoInsurer>,
}

/// An entity sharing a percentage of the insured risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoInsurer {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub name: String,

    /// Participation percentage (raw text).
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub share: String,

    /// Designated lead participant.
    #[serde(default)]
    pub is_lead: bool,
}

/// One physically insured site with its own value columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLocation {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub number: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub address: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub city: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub state: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub postal_code: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub activity: String,

    /// Building value, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub building_value: String,

    /// Machinery and furniture value, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub machinery_value: String,

    /// Stock value, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub stock_value: String,
}

/// One named coverage row from the coverage table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageEntry {
    /// Coverage name exactly as extracted.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub name: String,

    /// Limit of indemnity, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub limit: String,

    /// Deductible text, kept raw.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub deductible: String,

    /// Premium for the row, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub premium: String,
}

/// Ceded co-insurance specification: participants, installments, totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialBreakdown {
    #[serde(default)]
    pub general: FinancialGeneral,

    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub other_lines: Vec<LineEntry>,

    #[serde(default)]
    pub installments: Vec<Installment>,

    #[serde(default)]
    pub totals: InstallmentTotals,
}

/// General fields of the financial specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGeneral {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub lead_code: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub lead_insurer: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub policyholder: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub policyholder_tax_id: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub broker: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub broker_susep_code: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub line_of_business: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub document_type: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub policy_number: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub issue_date: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub inception: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub expiry: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub installment_count: String,

    /// Insured amount, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub insured_amount: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub currency: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub exchange_rate: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub discount_percent: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub commission_percent: String,
}

impl Default for FinancialGeneral {
    fn default() -> Self {
        Self {
            lead_code: missing(),
            lead_insurer: missing(),
            policyholder: missing(),
            policyholder_tax_id: missing(),
            broker: missing(),
            broker_susep_code: missing(),
            line_of_business: missing(),
            document_type: missing(),
            policy_number: missing(),
            issue_date: missing(),
            inception: missing(),
            expiry: missing(),
            installment_count: missing(),
            insured_amount: missing(),
            currency: missing(),
            exchange_rate: missing(),
            discount_percent: missing(),
            commission_percent: missing(),
        }
    }
}

/// One co-insurance participant row (lead included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub code: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub name: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub order_number: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub share_percent: String,
}

/// One "other lines of business" row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub line: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub code: String,

    /// Insured amount for the line, formatted after consolidation.
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub insured_amount: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub premium_percent: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub commission_percent: String,
}

/// One scheduled payment row with its monetary breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub number: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub gross_premium: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub discount: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub fractioning_surcharge: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub coinsurance_commission: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub net_total: String,
}

/// Column-wise aggregate across installments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentTotals {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub gross_premium: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub discount: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub fractioning_surcharge: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub coinsurance_commission: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub net_total: String,
}

impl Default for InstallmentTotals {
    fn default() -> Self {
        Self {
            gross_premium: missing(),
            discount: missing(),
            fractioning_surcharge: missing(),
            coinsurance_commission: missing(),
            net_total: missing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_default_to_sentinel() {
        let coverage: CoverageEntry = serde_json::from_value(json!({
            "name": "Incêndio"
        }))
        .unwrap();

        assert_eq!(coverage.name, "Incêndio");
        assert_eq!(coverage.limit, MISSING_VALUE);
        assert_eq!(coverage.deductible, MISSING_VALUE);
        assert_eq!(coverage.premium, MISSING_VALUE);
    }

    #[test]
    fn test_numeric_and_null_leaves_coerce() {
        let coverage: CoverageEntry = serde_json::from_value(json!({
            "name": "Vendaval",
            "limit": 1234.5,
            "premium": null
        }))
        .unwrap();

        assert_eq!(coverage.limit, "1234.5");
        assert_eq!(coverage.premium, MISSING_VALUE);
    }

    #[test]
    fn test_financial_breakdown_default_is_sentinel_filled() {
        let breakdown = FinancialBreakdown::default();
        assert_eq!(breakdown.general.insured_amount, MISSING_VALUE);
        assert_eq!(breakdown.totals.net_total, MISSING_VALUE);
        assert!(breakdown.installments.is_empty());
    }

    #[test]
    fn test_record_serializes_all_sections() {
        let record = CanonicalRecord {
            header: PolicyHeader {
                metadata: RunMetadata::now("APOLICE.pdf"),
                insured: missing(),
                tax_id: missing(),
                policy_number: missing(),
                inception: missing(),
                expiry: missing(),
                currency: missing(),
                max_guarantee_limit: missing(),
                net_premium: missing(),
                our_share: missing(),
                single_limit: missing(),
                has_business_interruption: missing(),
                country: "Brasil".to_string(),
                business_interruption_limit: missing(),
                windstorm_limit: missing(),
                windstorm_deductible: missing(),
                flood_limit: missing(),
                flood_deductible: missing(),
                earthquake_limit: missing(),
                earthquake_deductible: missing(),
                co_insurers: vec![],
            },
            risk_locations: vec![],
            coverages: vec![],
            financial_breakdown: FinancialBreakdown::default(),
        };

        let json = serde_json::to_value(&record).unwrap();
        for section in ["header", "risk_locations", "coverages", "financial_breakdown"] {
            assert!(json.get(section).is_some(), "missing section {}", section);
        }
        assert_eq!(json["header"]["country"], "Brasil");
        assert_eq!(json["financial_breakdown"]["totals"]["net_total"], MISSING_VALUE);
    }
}
