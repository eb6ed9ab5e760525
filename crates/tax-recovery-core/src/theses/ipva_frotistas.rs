use serde::{Deserialize, Serialize};

use super::{FieldValue, FinancialInputs, Thesis, ThesisField, ThesisOutcome};
use crate::types::*;

pub const CITATION: &str = "Tese IPVA frotistas";

/// IPVA charged on fleet vehicles over a base inflated by prior taxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpvaFrotistasResult {
    pub valor_venal: Money,
    pub percentual_excedente: Rate,
    pub valor_questionavel: Money,
    pub fundamentacao: String,
}

pub fn apply_ipva_frotistas(inputs: &FinancialInputs) -> IpvaFrotistasResult {
    IpvaFrotistasResult {
        valor_venal: round_money(inputs.valor_venal),
        percentual_excedente: inputs.percentual_ipva,
        valor_questionavel: round_money(inputs.valor_venal.saturating_mul(inputs.percentual_ipva)),
        fundamentacao: CITATION.to_string(),
    }
}

impl ThesisOutcome for IpvaFrotistasResult {
    fn thesis(&self) -> Thesis {
        Thesis::IpvaFrotistas
    }

    fn fields(&self) -> Vec<ThesisField> {
        vec![
            ThesisField::new("valor_venal", FieldValue::Money(self.valor_venal)),
            ThesisField::new(
                "percentual_excedente",
                FieldValue::Ratio(self.percentual_excedente),
            ),
            ThesisField::new("valor_questionavel", FieldValue::Money(self.valor_questionavel)),
            ThesisField::new("fundamentacao", FieldValue::Citation(self.fundamentacao.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theses::tests::sample_inputs;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_figures() {
        let r = apply_ipva_frotistas(&sample_inputs());
        assert_eq!(r.valor_venal, dec!(120_000));
        assert_eq!(r.percentual_excedente, dec!(0.12));
        assert_eq!(r.valor_questionavel, dec!(14_400.00));
    }

    #[test]
    fn test_unvalidated_overflow_saturates() {
        let mut inputs = sample_inputs();
        inputs.valor_venal = Decimal::MAX;
        inputs.percentual_ipva = dec!(12);
        let r = apply_ipva_frotistas(&inputs);
        assert_eq!(r.valor_questionavel, Decimal::MAX);
    }

    #[test]
    fn test_percentage_is_a_ratio_field() {
        let r = apply_ipva_frotistas(&sample_inputs());
        assert_eq!(r.money("percentual_excedente"), None);
        assert_eq!(r.money("valor_questionavel"), Some(dec!(14_400)));
    }
}
