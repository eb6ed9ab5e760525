use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{FieldValue, FinancialInputs, Thesis, ThesisField, ThesisOutcome};
use crate::types::*;

/// Combined PIS/COFINS rate applied to the ISS wrongly kept in the base.
pub const PIS_COFINS_RATE: Rate = dec!(0.0365);

pub const CITATION: &str = "STF RE 592.616 e RE 574.706";

/// Exclusion of ISS from the PIS/COFINS base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PisCofinsIssResult {
    pub base_atual: Money,
    pub base_corrigida: Money,
    pub credito_apuravel: Money,
    pub fundamentacao: String,
}

pub fn apply_pis_cofins_iss(inputs: &FinancialInputs) -> PisCofinsIssResult {
    PisCofinsIssResult {
        base_atual: round_money(inputs.receita_bruta),
        base_corrigida: round_money(inputs.receita_bruta.saturating_sub(inputs.iss)),
        credito_apuravel: round_money(inputs.iss.saturating_mul(PIS_COFINS_RATE)),
        fundamentacao: CITATION.to_string(),
    }
}

impl PisCofinsIssResult {
    /// True when ISS exceeds revenue and the corrected base went negative.
    pub fn has_negative_base(&self) -> bool {
        self.base_corrigida < Decimal::ZERO
    }
}

impl ThesisOutcome for PisCofinsIssResult {
    fn thesis(&self) -> Thesis {
        Thesis::PisCofinsIss
    }

    fn fields(&self) -> Vec<ThesisField> {
        vec![
            ThesisField::new("base_atual", FieldValue::Money(self.base_atual)),
            ThesisField::new("base_corrigida", FieldValue::Money(self.base_corrigida)),
            ThesisField::new("credito_apuravel", FieldValue::Money(self.credito_apuravel)),
            ThesisField::new("fundamentacao", FieldValue::Citation(self.fundamentacao.clone())),
        ]
    }
}
