use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{FieldValue, FinancialInputs, Thesis, ThesisField, ThesisOutcome};
use crate::types::*;

/// Employer INSS contribution rate levied on payroll.
pub const EMPLOYER_INSS_RATE: Rate = dec!(0.20);

pub const CITATION: &str = "IN RFB 971/2009";

/// Employer INSS improperly charged on indemnity payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InssIndenizatorioResult {
    pub base_indevida: Money,
    pub valor_indevido: Money,
    pub fundamentacao: String,
}

pub fn apply_inss_indenizatorio(inputs: &FinancialInputs) -> InssIndenizatorioResult {
    InssIndenizatorioResult {
        base_indevida: round_money(inputs.verbas_indenizatorias),
        valor_indevido: round_money(inputs.verbas_indenizatorias.saturating_mul(EMPLOYER_INSS_RATE)),
        fundamentacao: CITATION.to_string(),
    }
}

impl ThesisOutcome for InssIndenizatorioResult {
    fn thesis(&self) -> Thesis {
        Thesis::InssIndenizatorio
    }

    fn fields(&self) -> Vec<ThesisField> {
        vec![
            ThesisField::new("base_indevida", FieldValue::Money(self.base_indevida)),
            ThesisField::new("valor_indevido", FieldValue::Money(self.valor_indevido)),
            ThesisField::new("fundamentacao", FieldValue::Citation(self.fundamentacao.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theses::tests::sample_inputs;
    use rust_decimal::Decimal;

    #[test]
    fn test_reference_figures() {
        let r = apply_inss_indenizatorio(&sample_inputs());
        assert_eq!(r.base_indevida, dec!(80_000));
        assert_eq!(r.valor_indevido, dec!(16_000.00));
    }

    #[test]
    fn test_zero_payroll() {
        let mut inputs = sample_inputs();
        inputs.verbas_indenizatorias = Decimal::ZERO;
        let r = apply_inss_indenizatorio(&inputs);
        assert_eq!(r.valor_indevido, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_cents_rounded() {
        let mut inputs = sample_inputs();
        inputs.verbas_indenizatorias = dec!(100.025);
        // 100.025 * 0.20 = 20.005 -> half-to-even -> 20.00
        let r = apply_inss_indenizatorio(&inputs);
        assert_eq!(r.valor_indevido, dec!(20.00));
    }
}
