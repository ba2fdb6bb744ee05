//! Typed payload schemas, one per extraction task kind.
//!
//! Consolidation never walks raw JSON: each task's payload decodes into one
//! of these shapes, with every absent or null leaf defaulting to the
//! missing-value sentinel. A payload that fails to decode degrades the
//! whole section to its default.

use serde::Deserialize;

use super::record::{missing, stringlike, CoInsurer, CoverageEntry, RiskLocation};
use crate::types::FinancialBreakdown;

/// Payload of the `master` task: policy identity, dates, headline amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterPayload {
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

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub max_guarantee_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub net_premium: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub our_share: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub single_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub has_business_interruption: String,

    #[serde(default)]
    pub co_insurers: Vec<CoInsurer>,
}

impl Default for MasterPayload {
    fn default() -> Self {
        Self {
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
            co_insurers: Vec::new(),
        }
    }
}

/// Payload of the `locations` task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsPayload {
    #[serde(default)]
    pub risk_locations: Vec<RiskLocation>,
}

/// Payload of the `coverages` task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoveragesPayload {
    #[serde(default)]
    pub coverages: Vec<CoverageEntry>,
}

/// Payload of the `clauses` task: the two boolean clause flags.
#[derive(Debug, Clone, Deserialize)]
pub struct ClausesPayload {
    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub single_limit: String,

    #[serde(default = "missing", deserialize_with = "stringlike")]
    pub has_business_interruption: String,
}

impl Default for ClausesPayload {
    fn default() -> Self {
        Self {
            single_limit: missing(),
            has_business_interruption: missing(),
        }
    }
}

/// Payload of the secondary (financial specification) extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialPayload {
    #[serde(default)]
    pub financial_breakdown: FinancialBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::MISSING_VALUE;
    use serde_json::json;

    #[test]
    fn test_master_payload_partial_decode() {
        let payload: MasterPayload = serde_json::from_value(json!({
            "insured": "ACME Indústria S.A.",
            "tax_id": "12.345.678/0001-90",
            "max_guarantee_limit": "50.000.000,00",
            "co_insurers": [
                {"name": "Seguradora Líder", "share": "60%", "is_lead": true},
                {"name": "Participante", "share": "40%"}
            ]
        }))
        .unwrap();

        assert_eq!(payload.insured, "ACME Indústria S.A.");
        assert_eq!(payload.policy_number, MISSING_VALUE);
        assert_eq!(payload.co_insurers.len(), 2);
        assert!(payload.co_insurers[0].is_lead);
        assert!(!payload.co_insurers[1].is_lead);
    }

    #[test]
    fn test_locations_payload_preserves_order() {
        let payload: LocationsPayload = serde_json::from_value(json!({
            "risk_locations": [
                {"number": "2", "city": "Campinas"},
                {"number": "1", "city": "São Paulo"}
            ]
        }))
        .unwrap();

        let numbers: Vec<&str> = payload
            .risk_locations
            .iter()
            .map(|l| l.number.as_str())
            .collect();
        assert_eq!(numbers, ["2", "1"]);
    }

    #[test]
    fn test_clauses_payload_defaults() {
        let payload = ClausesPayload::default();
        assert_eq!(payload.single_limit, MISSING_VALUE);
        assert_eq!(payload.has_business_interruption, MISSING_VALUE);
    }

    #[test]
    fn test_misshapen_payload_fails_decode() {
        // A list where an object is expected must not silently decode.
        let result: Result<LocationsPayload, _> =
            serde_json::from_value(json!({"risk_locations": {"not": "a list"}}));
        assert!(result.is_err());
    }
}
