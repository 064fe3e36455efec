//! Output column sets for each request type.
//!
//! The registry answers with far more than we keep; these lists decide which
//! fields land in the output table and in what order.
use crate::config::RequestType;

/// Column stamped with the run start time on every enriched row.
pub const KEY_TIMESTAMP: &str = "timestamp";

/// Identifier column, also the primary key of both output tables.
pub const KEY_ICO: &str = "Ico";

pub const DETAIL: &[&str] = &[
    "Ico",
    "RegisterNumberText",
    "Dic",
    "IcDPH",
    "Name",
    "Street",
    "StreetNumber",
    "ZipCode",
    "City",
    "District",
    "Region",
    "Country",
    "Activity",
    "Created",
    "Cancelled",
    "SuspendedAsPerson",
    "Url",
    "Warning",
    "WarningUrl",
    "PaymentOrderWarning",
    "PaymentOrderUrl",
    "OrChange",
    "OrChangeUrl",
    "Revenue",
    "SkNaceCode",
    "SkNaceText",
    "SkNaceDivision",
    "SkNaceGroup",
    "LegalFormCode",
    "LegalFormText",
    "RpvsInsert",
    "RpvsUrl",
    "ProfitActual",
    "RevenueActual",
    "JudgementFinstatLink",
    "SalesCategory",
    "HasKaR",
    "KarUrl",
    "HasDebt",
    "DebtUrl",
    "JudgementIndicators",
];

pub const EXTENDED: &[&str] = &[
    "Ico",
    "Dic",
    "IcDPH",
    "Name",
    "Street",
    "StreetNumber",
    "ZipCode",
    "City",
    "Activity",
    "District",
    "Region",
    "Country",
    "Created",
    "Cancelled",
    "SuspendedAsPerson",
    "Url",
    "RegisterNumberText",
    "IcDphAdditional",
    "SkNaceCode",
    "SkNaceText",
    "SkNaceDivision",
    "SkNaceGroup",
    "Phones",
    "Emails",
    "Warning",
    "WarningUrl",
    "Debts",
    "StateReceivables",
    "CommercialReceivables",
    "PaymentOrderWarning",
    "PaymentOrderUrl",
    "PaymentOrders",
    "OrChange",
    "OrChangeUrl",
    "EmployeeCode",
    "EmployeeText",
    "LegalFormCode",
    "LegalFormText",
    "RpvsInsert",
    "RpvsUrl",
    "OwnershipTypeCode",
    "OwnershipTypeText",
    "CreditScoreValue",
    "ProfitActual",
    "ProfitPrev",
    "RevenueActual",
    "RevenuePrev",
    "ActualYear",
    "CreditScoreState",
    "ForeignResources",
    "GrossMargin",
    "ROA",
    "WarningLiquidation",
    "SelfEmployed",
    "WarningKaR",
    "Offices",
    "Subjects",
    "StructuredName",
    "HasKaR",
    "KarUrl",
    "HasDebt",
    "DebtUrl",
    "HasDisposal",
    "DisposalUrl",
    "ContactSources",
    "BasicCapital",
    "JudgementIndicators",
    "JudgementFinstatLink",
    "JudgementCounts",
    "JudgementLastPublishedDate",
    "Ratios",
    "SalesCategory",
];

/// Fields extracted from each registry response for `request_type`.
pub fn fields_for(request_type: RequestType) -> &'static [&'static str] {
    match request_type {
        RequestType::Detail => DETAIL,
        RequestType::Extended => EXTENDED,
    }
}

/// Header of the enriched table: the schema fields followed by `timestamp`.
pub fn enriched_columns(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|field| field.to_string())
        .chain(std::iter::once(KEY_TIMESTAMP.to_string()))
        .collect()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
