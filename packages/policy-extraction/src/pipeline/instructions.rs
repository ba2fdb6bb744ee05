//! Instruction texts sent to the extraction service, one per task kind,
//! plus the task name constants the result set is keyed by.
//!
//! Every instruction pins the same contract: answer with JSON only, use the
//! exact keys listed, and write "Não consta" for anything the document does
//! not show.

/// Task name: policy master fields.
pub const TASK_MASTER: &str = "master";

/// Task name: risk location table.
pub const TASK_LOCATIONS: &str = "locations";

/// Task name: coverage table.
pub const TASK_COVERAGES: &str = "coverages";

/// Task name: supplementary clause flags.
pub const TASK_CLAUSES: &str = "clauses";

/// The four policy tasks, paired with their instructions in fan-out order.
pub const POLICY_TASKS: [(&str, &str); 4] = [
    (TASK_MASTER, MASTER_INSTRUCTION),
    (TASK_LOCATIONS, LOCATIONS_INSTRUCTION),
    (TASK_COVERAGES, COVERAGES_INSTRUCTION),
    (TASK_CLAUSES, CLAUSES_INSTRUCTION),
];

/// Master fields of the policy document.
pub const MASTER_INSTRUCTION: &str = r#"
Analyze this insurance policy document visually and extract its master fields.
Answer with JSON only. Use "Não consta" for anything the document does not show.

{
  "insured": "Insured name",
  "tax_id": "CNPJ",
  "policy_number": "Lead policy number",
  "inception": "Inception date",
  "expiry": "Expiry date",
  "currency": "Currency",
  "max_guarantee_limit": "Maximum guarantee limit (raw value)",
  "net_premium": "Issued or net premium (raw value)",
  "our_share": "Our participation %",
  "single_limit": "Sim/Não",
  "has_business_interruption": "Sim/Não",
  "co_insurers": [ { "name": "Name", "share": "%", "is_lead": true } ]
}
"#;

/// Risk location table ("Identificação do Bem Segurado").
pub const LOCATIONS_INSTRUCTION: &str = r#"
Analyze the insured-property table or the list of risk locations visually.
Extract the values EXACTLY as printed. Answer with JSON only.

{
  "risk_locations": [
    {
      "number": "No.",
      "address": "Full address",
      "city": "City",
      "state": "State",
      "postal_code": "CEP",
      "activity": "Main activity at the site",
      "building_value": "Buildings column value",
      "machinery_value": "Machinery/furniture column value",
      "stock_value": "Stock/goods column value"
    }
  ]
}
"#;

/// Coverage table: every row, with limit, deductible and premium.
pub const COVERAGES_INSTRUCTION: &str = r#"
Analyze the coverage table visually and extract ALL rows. Answer with JSON only.

{
  "coverages": [
    { "name": "Coverage name", "limit": "Limit value", "deductible": "Deductible text", "premium": "Premium value" }
  ]
}
"#;

/// Supplementary clause flags.
pub const CLAUSES_INSTRUCTION: &str = r#"
Analyze the document and answer with JSON only:
{ "single_limit": "Sim/Não", "has_business_interruption": "Sim/Não" }
"#;

/// Financial specification of the ceded co-insurance (secondary document).
pub const FINANCIAL_INSTRUCTION: &str = r#"
You are an accounting specialist. Analyze this co-insurance specification
document VISUALLY. Ignore broken text flow and read the TABLES.

1. LEAD vs PARTICIPANTS: the table at the top is the lead insurer, the one
   below lists the co-insurers. The "participants" array MUST include both.
   Extract each order number exactly as printed.
2. OTHER LINES: locate the "other lines of business" area. Even if fields
   look empty, extract the structure; capture any filled code, insured
   amount or commission next to each line.
3. INSTALLMENTS: locate the due-date table. If numbers are visually glued
   together, separate them logically (1, 2, 3...).

Answer with JSON only. Use "Não consta" for anything the document does not show.

{
  "financial_breakdown": {
    "general": {
      "lead_code": "Code", "lead_insurer": "Name", "policyholder": "Name",
      "policyholder_tax_id": "CNPJ", "broker": "Name", "broker_susep_code": "SUSEP code",
      "line_of_business": "Line", "document_type": "Type", "policy_number": "Policy no.",
      "issue_date": "Date", "inception": "Date", "expiry": "Date",
      "installment_count": "Qty", "insured_amount": "Value", "currency": "Text",
      "exchange_rate": "Value", "discount_percent": "%", "commission_percent": "%"
    },
    "participants": [
      { "code": "Code", "name": "Name", "order_number": "Order no.", "share_percent": "%" }
    ],
    "other_lines": [
      { "line": "Name", "code": "Code", "insured_amount": "Value", "premium_percent": "%", "commission_percent": "%" }
    ],
    "installments": [
      { "number": "1", "gross_premium": "Value", "discount": "Value", "fractioning_surcharge": "Value", "coinsurance_commission": "Value", "net_total": "Value" }
    ],
    "totals": {
      "gross_premium": "Value", "discount": "Value", "fractioning_surcharge": "Value", "coinsurance_commission": "Value", "net_total": "Value"
    }
  }
}
"#;
