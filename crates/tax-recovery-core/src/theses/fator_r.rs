use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FieldValue, FinancialInputs, Thesis, ThesisField, ThesisOutcome};
use crate::types::*;

/// Payroll-to-revenue ratio at or above which services move to Anexo III.
pub const FATOR_R_THRESHOLD: Rate = dec!(0.28);

pub const CITATION: &str = "LC 123/2006";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Simples Nacional annex recommended by the Fator R test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplesAnexo {
    #[serde(rename = "Anexo III")]
    AnexoIII,
    #[serde(rename = "Anexo V")]
    AnexoV,
}

impl fmt::Display for SimplesAnexo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnexoIII => write!(f, "Anexo III"),
            Self::AnexoV => write!(f, "Anexo V"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatorRResult {
    /// Payroll / gross revenue, four decimal places.
    pub fator_r: Rate,
    pub regime_recomendado: SimplesAnexo,
    pub fundamentacao: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the Fator R and the annex it points to.
///
/// Zero revenue yields a ratio of 0, and the same guarded ratio drives the
/// annex decision, so zero revenue always recommends Anexo V. The decision
/// uses the unrounded ratio: 0.27999 stays in Anexo V even though it is
/// reported as 0.2800. A quotient too large for `Decimal` saturates at
/// `Decimal::MAX`; `validate_inputs` rejects such pairs up front.
pub fn apply_fator_r(inputs: &FinancialInputs) -> FatorRResult {
    let ratio =
        payroll_ratio(inputs.folha_12m, inputs.receita_bruta).unwrap_or(Decimal::MAX);
    FatorRResult {
        fator_r: round_ratio(ratio),
        regime_recomendado: recommend_anexo(ratio),
        fundamentacao: CITATION.to_string(),
    }
}

pub fn recommend_anexo(ratio: Rate) -> SimplesAnexo {
    if ratio >= FATOR_R_THRESHOLD {
        SimplesAnexo::AnexoIII
    } else {
        SimplesAnexo::AnexoV
    }
}

/// Payroll over revenue, 0 for zero revenue, `None` when the quotient
/// overflows.
pub(crate) fn payroll_ratio(folha_12m: Money, receita_bruta: Money) -> Option<Rate> {
    if receita_bruta.is_zero() {
        tracing::debug!("fator_r: zero gross revenue, ratio defaulted to 0");
        return Some(Decimal::ZERO);
    }
    folha_12m.checked_div(receita_bruta)
}

impl ThesisOutcome for FatorRResult {
    fn thesis(&self) -> Thesis {
        Thesis::FatorR
    }

    fn fields(&self) -> Vec<ThesisField> {
        vec![
            ThesisField::new("fator_r", FieldValue::Ratio(self.fator_r)),
            ThesisField::new(
                "regime_recomendado",
                FieldValue::Label(self.regime_recomendado.to_string()),
            ),
            ThesisField::new("fundamentacao", FieldValue::Citation(self.fundamentacao.clone())),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theses::tests::sample_inputs;

    fn with_ratio(folha: Money, receita: Money) -> FatorRResult {
        let mut inputs = sample_inputs();
        inputs.folha_12m = folha;
        inputs.receita_bruta = receita;
        apply_fator_r(&inputs)
    }

    #[test]
    fn test_reference_figures() {
        // 147,500 / 500,000 = 0.295
        let r = apply_fator_r(&sample_inputs());
        assert_eq!(r.fator_r, dec!(0.295));
        assert_eq!(r.regime_recomendado, SimplesAnexo::AnexoIII);
        assert_eq!(r.fundamentacao, "LC 123/2006");
    }

    #[test]
    fn test_exact_threshold_selects_anexo_iii() {
        let r = with_ratio(dec!(28), dec!(100));
        assert_eq!(r.fator_r, dec!(0.28));
        assert_eq!(r.regime_recomendado, SimplesAnexo::AnexoIII);
    }

    #[test]
    fn test_just_below_threshold_selects_anexo_v() {
        let r = with_ratio(dec!(27_999_999), dec!(100_000_000));
        // Reported ratio rounds up to the threshold, the decision does not
        assert_eq!(r.fator_r, dec!(0.2800));
        assert_eq!(r.regime_recomendado, SimplesAnexo::AnexoV);
    }

    #[test]
    fn test_zero_revenue_is_defined() {
        let r = with_ratio(dec!(147_500), Decimal::ZERO);
        assert_eq!(r.fator_r, Decimal::ZERO);
        assert_eq!(r.regime_recomendado, SimplesAnexo::AnexoV);
    }

    #[test]
    fn test_overflowing_ratio_saturates() {
        let r = with_ratio(dec!(1_000_000_000_000_000_000_000_000_000), dec!(0.01));
        assert_eq!(r.fator_r, Decimal::MAX);
        assert_eq!(r.regime_recomendado, SimplesAnexo::AnexoIII);
        assert_eq!(payroll_ratio(dec!(1_000_000_000_000_000_000_000_000_000), dec!(0.01)), None);
    }

    #[test]
    fn test_ratio_rounded_to_four_places() {
        // 1 / 3 = 0.3333...
        let r = with_ratio(dec!(1), dec!(3));
        assert_eq!(r.fator_r, dec!(0.3333));
    }

    #[test]
    fn test_anexo_display_and_json() {
        assert_eq!(SimplesAnexo::AnexoIII.to_string(), "Anexo III");
        assert_eq!(
            serde_json::to_string(&SimplesAnexo::AnexoV).unwrap(),
            "\"Anexo V\""
        );
    }

    #[test]
    fn test_no_money_fields() {
        let r = apply_fator_r(&sample_inputs());
        assert!(r.fields().iter().all(|f| f.value.as_money().is_none()));
    }
}
