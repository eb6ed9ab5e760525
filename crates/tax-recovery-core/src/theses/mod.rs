//! Tax-recovery theses ("teses").
//!
//! Each thesis is an independent formula over [`FinancialInputs`] producing
//! its own result record. The records share no schema; [`ThesisOutcome`]
//! exposes them uniformly as ordered `(key, value)` fields so the aggregator
//! and the report can treat them generically.

pub mod aggregate;
pub mod fator_r;
pub mod inss_indenizatorio;
pub mod insumos_necessarios;
pub mod ipva_frotistas;
pub mod pis_cofins_iss;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{types::*, TaxRecoveryError, TaxRecoveryResult};

pub use aggregate::{total_recoverable, RECOVERABLE_KEYS};
pub use fator_r::{FatorRResult, SimplesAnexo};
pub use inss_indenizatorio::InssIndenizatorioResult;
pub use insumos_necessarios::InsumosNecessariosResult;
pub use ipva_frotistas::IpvaFrotistasResult;
pub use pis_cofins_iss::PisCofinsIssResult;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Annual financial figures submitted for one diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    /// Gross revenue (receita bruta).
    pub receita_bruta: Money,
    /// ISS (municipal service tax) highlighted in the year.
    pub iss: Money,
    /// Indemnity-type payroll disbursements in the year.
    pub verbas_indenizatorias: Money,
    /// Payroll total over the last 12 months.
    pub folha_12m: Money,
    /// Vehicle venal (assessed) value.
    pub valor_venal: Money,
    /// Share of prior taxes embedded in IPVA, as a fraction.
    pub percentual_ipva: Rate,
    /// Total annual purchases.
    pub compras: Money,
    /// Share of purchases that are essential inputs, as a fraction.
    pub percentual_insumos: Rate,
}

/// Reject negative amounts and percentages outside [0, 1].
///
/// [`apply_theses`] never calls this itself; callers validate first.
pub fn validate_inputs(inputs: &FinancialInputs) -> TaxRecoveryResult<()> {
    let amounts = [
        ("receita_bruta", inputs.receita_bruta),
        ("iss", inputs.iss),
        ("verbas_indenizatorias", inputs.verbas_indenizatorias),
        ("folha_12m", inputs.folha_12m),
        ("valor_venal", inputs.valor_venal),
        ("compras", inputs.compras),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(TaxRecoveryError::InvalidInput {
                field: field.into(),
                reason: format!("Amount must be non-negative, got {value}."),
            });
        }
    }

    let fractions = [
        ("percentual_ipva", inputs.percentual_ipva),
        ("percentual_insumos", inputs.percentual_insumos),
    ];
    for (field, value) in fractions {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(TaxRecoveryError::InvalidInput {
                field: field.into(),
                reason: format!("Percentage must be a fraction between 0 and 1, got {value}."),
            });
        }
    }

    if fator_r::payroll_ratio(inputs.folha_12m, inputs.receita_bruta).is_none() {
        return Err(TaxRecoveryError::InvalidInput {
            field: "folha_12m".into(),
            reason: format!(
                "folha_12m / receita_bruta ({} / {}) exceeds the representable range.",
                inputs.folha_12m, inputs.receita_bruta
            ),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Thesis identifiers and field values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Thesis {
    PisCofinsIss,
    InssIndenizatorio,
    FatorR,
    IpvaFrotistas,
    InsumosNecessarios,
}

impl Thesis {
    /// Declaration order, which is also report order.
    pub const ALL: [Thesis; 5] = [
        Thesis::PisCofinsIss,
        Thesis::InssIndenizatorio,
        Thesis::FatorR,
        Thesis::IpvaFrotistas,
        Thesis::InsumosNecessarios,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::PisCofinsIss => "pis_cofins_iss",
            Self::InssIndenizatorio => "inss_indenizatorio",
            Self::FatorR => "fator_r",
            Self::IpvaFrotistas => "ipva_frotistas",
            Self::InsumosNecessarios => "insumos_necessarios",
        }
    }

    /// Legal basis cited for the thesis.
    pub fn citation(&self) -> &'static str {
        match self {
            Self::PisCofinsIss => pis_cofins_iss::CITATION,
            Self::InssIndenizatorio => inss_indenizatorio::CITATION,
            Self::FatorR => fator_r::CITATION,
            Self::IpvaFrotistas => ipva_frotistas::CITATION,
            Self::InsumosNecessarios => insumos_necessarios::CITATION,
        }
    }
}

impl fmt::Display for Thesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single value inside a thesis result.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Money(Money),
    Ratio(Rate),
    Label(String),
    Citation(String),
}

impl FieldValue {
    pub fn as_money(&self) -> Option<Money> {
        match self {
            Self::Money(m) => Some(*m),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Money(v) | Self::Ratio(v) => write!(f, "{v}"),
            Self::Label(s) | Self::Citation(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThesisField {
    pub key: &'static str,
    pub value: FieldValue,
}

impl ThesisField {
    pub(crate) fn new(key: &'static str, value: FieldValue) -> Self {
        Self { key, value }
    }
}

/// Uniform view over heterogeneous thesis results.
pub trait ThesisOutcome {
    fn thesis(&self) -> Thesis;

    /// Output fields in declaration order.
    fn fields(&self) -> Vec<ThesisField>;

    /// Monetary value stored under `key`, if this result has one.
    fn money(&self, key: &str) -> Option<Money> {
        self.fields()
            .into_iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value.as_money())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One thesis result, tagged by thesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThesisResult {
    PisCofinsIss(PisCofinsIssResult),
    InssIndenizatorio(InssIndenizatorioResult),
    FatorR(FatorRResult),
    IpvaFrotistas(IpvaFrotistasResult),
    InsumosNecessarios(InsumosNecessariosResult),
}

impl ThesisResult {
    fn inner(&self) -> &dyn ThesisOutcome {
        match self {
            Self::PisCofinsIss(r) => r,
            Self::InssIndenizatorio(r) => r,
            Self::FatorR(r) => r,
            Self::IpvaFrotistas(r) => r,
            Self::InsumosNecessarios(r) => r,
        }
    }
}

impl ThesisOutcome for ThesisResult {
    fn thesis(&self) -> Thesis {
        self.inner().thesis()
    }

    fn fields(&self) -> Vec<ThesisField> {
        self.inner().fields()
    }
}

/// The five thesis results of one diagnosis, keyed by thesis id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesisSet {
    pub pis_cofins_iss: PisCofinsIssResult,
    pub inss_indenizatorio: InssIndenizatorioResult,
    pub fator_r: FatorRResult,
    pub ipva_frotistas: IpvaFrotistasResult,
    pub insumos_necessarios: InsumosNecessariosResult,
}

impl ThesisSet {
    /// Results in declaration order.
    pub fn results(&self) -> Vec<ThesisResult> {
        vec![
            ThesisResult::PisCofinsIss(self.pis_cofins_iss.clone()),
            ThesisResult::InssIndenizatorio(self.inss_indenizatorio.clone()),
            ThesisResult::FatorR(self.fator_r.clone()),
            ThesisResult::IpvaFrotistas(self.ipva_frotistas.clone()),
            ThesisResult::InsumosNecessarios(self.insumos_necessarios.clone()),
        ]
    }

    pub fn total_recoverable(&self) -> Money {
        total_recoverable(&self.results())
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Apply all five theses to the inputs.
///
/// Pure and total: no validation, no I/O, identical inputs give identical
/// results. Validate with [`validate_inputs`] first if inputs are untrusted.
pub fn apply_theses(inputs: &FinancialInputs) -> ThesisSet {
    let set = ThesisSet {
        pis_cofins_iss: pis_cofins_iss::apply_pis_cofins_iss(inputs),
        inss_indenizatorio: inss_indenizatorio::apply_inss_indenizatorio(inputs),
        fator_r: fator_r::apply_fator_r(inputs),
        ipva_frotistas: ipva_frotistas::apply_ipva_frotistas(inputs),
        insumos_necessarios: insumos_necessarios::apply_insumos_necessarios(inputs),
    };
    tracing::debug!(
        credito_apuravel = %set.pis_cofins_iss.credito_apuravel,
        valor_indevido = %set.inss_indenizatorio.valor_indevido,
        fator_r = %set.fator_r.fator_r,
        valor_questionavel = %set.ipva_frotistas.valor_questionavel,
        credito_estimado = %set.insumos_necessarios.credito_estimado,
        "theses applied"
    );
    set
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
