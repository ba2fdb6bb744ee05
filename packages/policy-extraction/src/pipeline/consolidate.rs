//! Consolidation engine: merge per-task payloads into the canonical record.
//!
//! Every section decodes through its typed payload schema; a missing,
//! failed or misshapen task entry degrades that section to sentinel
//! defaults and the rest of the record is still produced. Monetary fields
//! are normalized uniformly, field by field. Extraction order of locations,
//! coverages and installments is preserved.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::normalize::{format_currency, MISSING_VALUE};
use crate::types::{
    CanonicalRecord, ClausesPayload, CoverageEntry, CoveragesPayload, ExtractionResult,
    FinancialBreakdown, FinancialPayload, LocationsPayload, MasterPayload, PolicyHeader,
    RiskLocation, RunMetadata, TaskResultSet,
};

use super::instructions::{TASK_CLAUSES, TASK_COVERAGES, TASK_LOCATIONS, TASK_MASTER};

/// Keyword sets for the per-peril coverage lookups.
const BUSINESS_INTERRUPTION_KEYWORDS: &[&str] = &["lucros cessantes"];
const WINDSTORM_KEYWORDS: &[&str] = &["vendaval"];
const FLOOD_KEYWORDS: &[&str] = &["alagamento"];
const EARTHQUAKE_KEYWORDS: &[&str] = &["terremoto"];

/// Merge the policy task results and the financial specification result
/// into one canonical record.
pub fn consolidate(
    primary: &TaskResultSet,
    secondary: &ExtractionResult,
    source_file: &str,
) -> CanonicalRecord {
    let master: MasterPayload = decode_section(primary, TASK_MASTER);
    let locations: LocationsPayload = decode_section(primary, TASK_LOCATIONS);
    let coverages: CoveragesPayload = decode_section(primary, TASK_COVERAGES);
    let clauses: ClausesPayload = decode_section(primary, TASK_CLAUSES);

    let financial: FinancialPayload = decode_result(Some(secondary), "financial");

    // Per-peril lookups run against the raw coverage list; the list itself
    // is normalized afterwards (formatting is idempotent, so order between
    // the two does not matter).
    let (bi_limit, _) = find_coverage(&coverages.coverages, BUSINESS_INTERRUPTION_KEYWORDS);
    let (windstorm_limit, windstorm_deductible) =
        find_coverage(&coverages.coverages, WINDSTORM_KEYWORDS);
    let (flood_limit, flood_deductible) = find_coverage(&coverages.coverages, FLOOD_KEYWORDS);
    let (earthquake_limit, earthquake_deductible) =
        find_coverage(&coverages.coverages, EARTHQUAKE_KEYWORDS);

    let header = PolicyHeader {
        metadata: RunMetadata::now(source_file),
        insured: master.insured,
        tax_id: master.tax_id,
        policy_number: master.policy_number,
        inception: master.inception,
        expiry: master.expiry,
        currency: master.currency,
        max_guarantee_limit: format_currency(&master.max_guarantee_limit),
        net_premium: format_currency(&master.net_premium),
        our_share: master.our_share,
        single_limit: pick_flag(&master.single_limit, &clauses.single_limit),
        has_business_interruption: pick_flag(
            &master.has_business_interruption,
            &clauses.has_business_interruption,
        ),
        country: "Brasil".to_string(),
        business_interruption_limit: bi_limit,
        windstorm_limit,
        windstorm_deductible,
        flood_limit,
        flood_deductible,
        earthquake_limit,
        earthquake_deductible,
        co_insurers: master.co_insurers,
    };

    CanonicalRecord {
        header,
        risk_locations: normalize_locations(locations.risk_locations),
        coverages: normalize_coverages(coverages.coverages),
        financial_breakdown: normalize_financial(financial.financial_breakdown),
    }
}

/// Find the first coverage whose name contains every keyword.
///
/// Names are compared lower-cased; keywords match as substrings; entries
/// are scanned in extraction order and the first match wins, with no
/// aggregation across matches. Returns `(formatted limit, raw deductible
/// text)`, or the sentinel pair when nothing matches.
pub fn find_coverage(coverages: &[CoverageEntry], keywords: &[&str]) -> (String, String) {
    for entry in coverages {
        let name = entry.name.to_lowercase();
        if keywords.iter().all(|k| name.contains(&k.to_lowercase())) {
            return (format_currency(&entry.limit), entry.deductible.clone());
        }
    }

    (MISSING_VALUE.to_string(), MISSING_VALUE.to_string())
}

/// Decode a named task's payload, degrading to the section default.
fn decode_section<T>(results: &TaskResultSet, name: &str) -> T
where
    T: DeserializeOwned + Default,
{
    decode_result(results.get(name), name)
}

/// Decode one result into a typed payload, degrading to the default on a
/// missing entry, a failed task or a shape mismatch.
fn decode_result<T>(result: Option<&ExtractionResult>, name: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match result {
        Some(ExtractionResult::Success(payload)) => {
            match serde_json::from_value(payload.clone()) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!(task = name, error = %e, "payload shape mismatch; section degraded");
                    T::default()
                }
            }
        }
        Some(ExtractionResult::Failure(failure)) => {
            warn!(
                task = name,
                kind = %failure.kind,
                message = %failure.message,
                "task failed; section degraded"
            );
            T::default()
        }
        None => {
            warn!(task = name, "task result missing; section degraded");
            T::default()
        }
    }
}

/// Master flags win; the clauses task only fills what the master left at
/// the sentinel.
fn pick_flag(master: &str, clauses: &str) -> String {
    if master == MISSING_VALUE {
        clauses.to_string()
    } else {
        master.to_string()
    }
}

fn normalize_locations(locations: Vec<RiskLocation>) -> Vec<RiskLocation> {
    locations
        .into_iter()
        .map(|mut location| {
            location.building_value = format_currency(&location.building_value);
            location.machinery_value = format_currency(&location.machinery_value);
            location.stock_value = format_currency(&location.stock_value);
            location
        })
        .collect()
}

fn normalize_coverages(coverages: Vec<CoverageEntry>) -> Vec<CoverageEntry> {
    coverages
        .into_iter()
        .map(|mut entry| {
            entry.limit = format_currency(&entry.limit);
            entry.premium = format_currency(&entry.premium);
            entry
        })
        .collect()
}

fn normalize_financial(mut financial: FinancialBreakdown) -> FinancialBreakdown {
    financial.general.insured_amount = format_currency(&financial.general.insured_amount);

    for line in &mut financial.other_lines {
        line.insured_amount = format_currency(&line.insured_amount);
    }

    for installment in &mut financial.installments {
        installment.gross_premium = format_currency(&installment.gross_premium);
        installment.discount = format_currency(&installment.discount);
        installment.fractioning_surcharge = format_currency(&installment.fractioning_surcharge);
        installment.coinsurance_commission = format_currency(&installment.coinsurance_commission);
        installment.net_total = format_currency(&installment.net_total);
    }

    let totals = &mut financial.totals;
    totals.gross_premium = format_currency(&totals.gross_premium);
    totals.discount = format_currency(&totals.discount);
    totals.fractioning_surcharge = format_currency(&totals.fractioning_surcharge);
    totals.coinsurance_commission = format_currency(&totals.coinsurance_commission);
    totals.net_total = format_currency(&totals.net_total);

    financial
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtractionResult, FailureKind};
    use serde_json::json;

    fn coverage(name: &str, limit: &str, deductible: &str) -> CoverageEntry {
        serde_json::from_value(json!({
            "name": name,
            "limit": limit,
            "deductible": deductible,
        }))
        .unwrap()
    }

    fn primary_results() -> TaskResultSet {
        let mut results = TaskResultSet::new();
        results.insert(
            TASK_MASTER,
            ExtractionResult::Success(json!({
                "insured": "ACME Indústria S.A.",
                "tax_id": "12.345.678/0001-90",
                "policy_number": "123-456",
                "inception": "01/01/2024",
                "expiry": "01/01/2025",
                "currency": "BRL",
                "max_guarantee_limit": "50.000.000,00",
                "net_premium": 123456.78,
                "our_share": "35%",
                "single_limit": "Não",
                "has_business_interruption": "Sim",
                "co_insurers": [
                    {"name": "Líder Seguros", "share": "65%", "is_lead": true}
                ]
            })),
        );
        results.insert(
            TASK_LOCATIONS,
            ExtractionResult::Success(json!({
                "risk_locations": [
                    {"number": "1", "city": "São Paulo", "building_value": "1.000.000,00",
                     "machinery_value": "500000", "stock_value": null}
                ]
            })),
        );
        results.insert(
            TASK_COVERAGES,
            ExtractionResult::Success(json!({
                "coverages": [
                    {"name": "Incêndio", "limit": "10.000.000,00", "deductible": "10% dos prejuízos"},
                    {"name": "Vendaval, Furacão e Ciclone", "limit": "2.000.000,00",
                     "deductible": "R$ 50.000,00", "premium": "1234,56"},
                    {"name": "Lucros Cessantes", "limit": "5.000.000,00", "deductible": "30 dias"}
                ]
            })),
        );
        results.insert(
            TASK_CLAUSES,
            ExtractionResult::Success(json!({
                "single_limit": "Sim",
                "has_business_interruption": "Não"
            })),
        );
        results
    }

    fn secondary_result() -> ExtractionResult {
        ExtractionResult::Success(json!({
            "financial_breakdown": {
                "general": {"insured_amount": "1.234.567,89", "policyholder": "ACME"},
                "participants": [
                    {"code": "001", "name": "Líder Seguros", "order_number": "1", "share_percent": "65"}
                ],
                "installments": [
                    {"number": "1", "gross_premium": "1000,00", "discount": "0",
                     "fractioning_surcharge": "10,00", "coinsurance_commission": "50,00",
                     "net_total": "960,00"}
                ],
                "totals": {"gross_premium": "1000,00", "net_total": "960,00"}
            }
        }))
    }

    #[test]
    fn test_coverage_lookup_first_match_wins() {
        let list = vec![
            coverage("Incêndio", "1000", "x"),
            coverage("Vendaval e Granizo", "2000", "first"),
            coverage("Vendaval", "3000", "second"),
        ];

        let (limit, deductible) = find_coverage(&list, &["vendaval"]);
        assert_eq!(limit, "R$ 2.000,00");
        assert_eq!(deductible, "first");
    }

    #[test]
    fn test_coverage_lookup_requires_every_keyword() {
        let list = vec![
            coverage("Vendaval", "1000", "a"),
            coverage("Vendaval e Granizo", "2000", "b"),
        ];

        let (limit, deductible) = find_coverage(&list, &["vendaval", "granizo"]);
        assert_eq!(limit, "R$ 2.000,00");
        assert_eq!(deductible, "b");
    }

    #[test]
    fn test_coverage_lookup_no_match_is_sentinel_pair() {
        let list = vec![coverage("Incêndio", "1000", "a")];
        let (limit, deductible) = find_coverage(&list, &["terremoto"]);
        assert_eq!(limit, MISSING_VALUE);
        assert_eq!(deductible, MISSING_VALUE);
    }

    #[test]
    fn test_consolidate_happy_path() {
        let record = consolidate(&primary_results(), &secondary_result(), "APOLICE.pdf");

        assert_eq!(record.header.insured, "ACME Indústria S.A.");
        assert_eq!(record.header.max_guarantee_limit, "R$ 50.000.000,00");
        assert_eq!(record.header.net_premium, "R$ 123.456,78");
        assert_eq!(record.header.metadata.source_file, "APOLICE.pdf");
        assert_eq!(record.header.country, "Brasil");

        // Per-peril lookups
        assert_eq!(record.header.business_interruption_limit, "R$ 5.000.000,00");
        assert_eq!(record.header.windstorm_limit, "R$ 2.000.000,00");
        assert_eq!(record.header.windstorm_deductible, "R$ 50.000,00");
        assert_eq!(record.header.flood_limit, MISSING_VALUE);

        // Master flags win over the clauses task
        assert_eq!(record.header.single_limit, "Não");
        assert_eq!(record.header.has_business_interruption, "Sim");

        // Locations normalized; null degraded to sentinel, order kept
        let location = &record.risk_locations[0];
        assert_eq!(location.building_value, "R$ 1.000.000,00");
        assert_eq!(location.machinery_value, "R$ 500.000,00");
        assert_eq!(location.stock_value, MISSING_VALUE);

        // Coverage list normalized in place, order preserved
        assert_eq!(record.coverages[0].name, "Incêndio");
        assert_eq!(record.coverages[0].limit, "R$ 10.000.000,00");
        assert_eq!(record.coverages[1].premium, "R$ 1.234,56");

        // Financial section normalized
        let financial = &record.financial_breakdown;
        assert_eq!(financial.general.insured_amount, "R$ 1.234.567,89");
        assert_eq!(financial.installments[0].discount, MISSING_VALUE); // literal "0"
        assert_eq!(financial.installments[0].net_total, "R$ 960,00");
        assert_eq!(financial.totals.net_total, "R$ 960,00");
    }

    #[test]
    fn test_clauses_fill_flags_master_left_missing() {
        let mut results = primary_results();
        results.insert(
            TASK_MASTER,
            ExtractionResult::Success(json!({"insured": "ACME"})),
        );

        let record = consolidate(&results, &secondary_result(), "APOLICE.pdf");

        assert_eq!(record.header.single_limit, "Sim");
        assert_eq!(record.header.has_business_interruption, "Não");
    }

    #[test]
    fn test_failed_task_degrades_only_its_section() {
        let mut results = primary_results();
        results.insert(
            TASK_LOCATIONS,
            ExtractionResult::failure(FailureKind::ServiceError, "timed out"),
        );

        let record = consolidate(&results, &secondary_result(), "APOLICE.pdf");

        assert!(record.risk_locations.is_empty());
        assert_eq!(record.header.insured, "ACME Indústria S.A.");
        assert_eq!(record.coverages.len(), 3);
    }

    #[test]
    fn test_missing_task_degrades_only_its_section() {
        let mut results = TaskResultSet::new();
        results.insert(
            TASK_COVERAGES,
            ExtractionResult::Success(json!({
                "coverages": [{"name": "Incêndio", "limit": "100"}]
            })),
        );

        let record = consolidate(&results, &secondary_result(), "APOLICE.pdf");

        assert_eq!(record.header.insured, MISSING_VALUE);
        assert_eq!(record.coverages.len(), 1);
        assert!(record.risk_locations.is_empty());
    }

    #[test]
    fn test_misshapen_payload_degrades_section() {
        let mut results = primary_results();
        results.insert(
            TASK_LOCATIONS,
            ExtractionResult::Success(json!({"risk_locations": "not a list"})),
        );

        let record = consolidate(&results, &secondary_result(), "APOLICE.pdf");
        assert!(record.risk_locations.is_empty());
    }

    #[test]
    fn test_failed_secondary_degrades_financial_section() {
        let failure = ExtractionResult::failure(FailureKind::MalformedResponse, "bad json");
        let record = consolidate(&primary_results(), &failure, "APOLICE.pdf");

        assert_eq!(
            record.financial_breakdown.general.insured_amount,
            MISSING_VALUE
        );
        assert!(record.financial_breakdown.installments.is_empty());
        // The policy sections are untouched
        assert_eq!(record.header.insured, "ACME Indústria S.A.");
    }
}
