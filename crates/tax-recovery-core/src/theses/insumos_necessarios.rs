use serde::{Deserialize, Serialize};

use super::{FieldValue, FinancialInputs, Thesis, ThesisField, ThesisOutcome};
use crate::types::*;

pub const CITATION: &str = "STJ Tema 779";

/// PIS/COFINS credits on essential and relevant inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsumosNecessariosResult {
    pub valor_total_compras: Money,
    pub percentual_insumos_essenciais: Rate,
    pub credito_estimado: Money,
    pub fundamentacao: String,
}

pub fn apply_insumos_necessarios(inputs: &FinancialInputs) -> InsumosNecessariosResult {
    InsumosNecessariosResult {
        valor_total_compras: round_money(inputs.compras),
        percentual_insumos_essenciais: inputs.percentual_insumos,
        credito_estimado: round_money(inputs.compras.saturating_mul(inputs.percentual_insumos)),
        fundamentacao: CITATION.to_string(),
    }
}

impl ThesisOutcome for InsumosNecessariosResult {
    fn thesis(&self) -> Thesis {
        Thesis::InsumosNecessarios
    }

    fn fields(&self) -> Vec<ThesisField> {
        vec![
            ThesisField::new("valor_total_compras", FieldValue::Money(self.valor_total_compras)),
            ThesisField::new(
                "percentual_insumos_essenciais",
                FieldValue::Ratio(self.percentual_insumos_essenciais),
            ),
            ThesisField::new("credito_estimado", FieldValue::Money(self.credito_estimado)),
            ThesisField::new("fundamentacao", FieldValue::Citation(self.fundamentacao.clone())),
        ]
    }
}
