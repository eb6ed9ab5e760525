use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::company::Company;
use crate::report::{format_brl, render_report, ReportArtifact};
use crate::theses::{
    apply_theses, fator_r, inss_indenizatorio, pis_cofins_iss, total_recoverable,
    validate_inputs, FinancialInputs, ThesisSet, RECOVERABLE_KEYS,
};
use crate::{types::*, TaxRecoveryResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// One submission: who the company is and its annual figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisInput {
    pub empresa: Company,
    pub dados: FinancialInputs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisOutput {
    pub empresa: Company,
    pub teses: ThesisSet,
    pub total_recuperavel: Money,
    /// `total_recuperavel` formatted for display, e.g. `R$ 131,495.00`.
    pub total_formatado: String,
    pub relatorio: ReportArtifact,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate the inputs, apply every thesis, total the recoverable amounts and
/// render the text report.
pub fn run_diagnosis(
    input: &DiagnosisInput,
) -> TaxRecoveryResult<ComputationOutput<DiagnosisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_inputs(&input.dados)?;

    let teses = apply_theses(&input.dados);
    let results = teses.results();
    let total = total_recoverable(&results);

    if input.dados.receita_bruta.is_zero() {
        warnings.push(
            "receita_bruta is zero: fator_r set to 0 and Anexo V recommended.".to_string(),
        );
    }
    if teses.pis_cofins_iss.has_negative_base() {
        warnings.push(
            "iss exceeds receita_bruta: base_corrigida is negative.".to_string(),
        );
    }
    for w in &warnings {
        tracing::warn!(empresa = %input.empresa.cnpj, "{w}");
    }

    let relatorio = ReportArtifact::new(render_report(&input.empresa, &results));

    tracing::info!(
        empresa = %input.empresa.cnpj,
        total = %total,
        "diagnosis complete"
    );

    let output = DiagnosisOutput {
        empresa: input.empresa.clone(),
        total_formatado: format_brl(total),
        total_recuperavel: total,
        teses,
        relatorio,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "pis_cofins_iss": format!("credito = iss * {}", pis_cofins_iss::PIS_COFINS_RATE),
        "inss_indenizatorio": format!(
            "valor_indevido = verbas_indenizatorias * {}",
            inss_indenizatorio::EMPLOYER_INSS_RATE
        ),
        "fator_r": format!(
            "Anexo III when folha_12m / receita_bruta >= {}, else Anexo V; 0 when receita_bruta = 0",
            fator_r::FATOR_R_THRESHOLD
        ),
        "ipva_frotistas": "valor_questionavel = valor_venal * percentual_ipva",
        "insumos_necessarios": "credito_estimado = compras * percentual_insumos",
        "total_keys": RECOVERABLE_KEYS,
        "rounding": "2 dp half-to-even on money, 4 dp on fator_r"
    });

    Ok(with_metadata(
        "Tax-recovery thesis diagnosis (PIS/COFINS-ISS, INSS indenizatório, Fator R, IPVA frotistas, insumos)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
