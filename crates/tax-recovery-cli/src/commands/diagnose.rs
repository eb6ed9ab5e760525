use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::fs;

use tax_recovery_core::company::Company;
use tax_recovery_core::diagnosis::{self, DiagnosisInput};
use tax_recovery_core::report::REPORT_FILE_NAME;
use tax_recovery_core::theses::{FinancialInputs, Thesis};

use crate::input;

/// Company identity printed in the report header
#[derive(Args)]
pub struct CompanyArgs {
    /// Company name
    #[arg(long, default_value = "Clínica Multisaúde LTDA")]
    pub nome: String,

    /// CNPJ (tax ID)
    #[arg(long, default_value = "42.193.486/0001-71")]
    pub cnpj: String,

    /// Sector of activity
    #[arg(long, default_value = "Serviços médicos")]
    pub setor: String,
}

/// Annual financial figures (BRL; percentages as fractions 0 to 1)
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FiguresArgs {
    /// Gross annual revenue
    #[arg(long, default_value = "500000")]
    pub receita_bruta: Decimal,

    /// ISS highlighted in the year
    #[arg(long, default_value = "30000")]
    pub iss: Decimal,

    /// Annual indemnity payments on payroll
    #[arg(long, default_value = "80000")]
    pub verbas_indenizatorias: Decimal,

    /// Payroll total for the last 12 months
    #[arg(long = "folha-12m", default_value = "147500")]
    pub folha_12m: Decimal,

    /// Vehicle venal value
    #[arg(long, default_value = "120000")]
    pub valor_venal: Decimal,

    /// Share of prior taxes embedded in IPVA (e.g. 0.12)
    #[arg(long, default_value = "0.12")]
    pub percentual_ipva: Decimal,

    /// Total annual purchases
    #[arg(long, default_value = "250000")]
    pub compras: Decimal,

    /// Share of essential inputs in purchases (0 to 1)
    #[arg(long, default_value = "0.4")]
    pub percentual_insumos: Decimal,
}

/// Arguments for a full diagnosis
#[derive(Args)]
pub struct DiagnoseArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub company: CompanyArgs,

    #[command(flatten)]
    pub figures: FiguresArgs,
}

/// Arguments for exporting the text report
#[derive(Args)]
pub struct ReportArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Destination file
    #[arg(long, default_value = REPORT_FILE_NAME)]
    pub out: String,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub company: CompanyArgs,

    #[command(flatten)]
    pub figures: FiguresArgs,
}

pub fn run_diagnose(args: DiagnoseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let diagnosis_input = resolve_input(args.input.as_deref(), args.company, args.figures)?;
    let result = diagnosis::run_diagnosis(&diagnosis_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Writes the report and returns a summary, or prints it and returns `Null`.
pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let diagnosis_input = resolve_input(args.input.as_deref(), args.company, args.figures)?;
    let result = diagnosis::run_diagnosis(&diagnosis_input)?;
    let artifact = &result.result.relatorio;

    if args.stdout {
        print!("{}", artifact.content);
        return Ok(Value::Null);
    }

    fs::write(&args.out, artifact.as_bytes())
        .map_err(|e| format!("Failed to write '{}': {}", args.out, e))?;
    tracing::info!(path = %args.out, bytes = artifact.as_bytes().len(), "report written");

    Ok(json!({
        "result": {
            "arquivo": args.out,
            "bytes": artifact.as_bytes().len(),
            "total_recuperavel": result.result.total_recuperavel,
            "total_formatado": result.result.total_formatado,
        },
        "warnings": result.warnings,
    }))
}

pub fn run_theses() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = Thesis::ALL
        .iter()
        .map(|t| json!({ "tese": t.id(), "fundamentacao": t.citation() }))
        .collect();
    Ok(Value::Array(rows))
}

fn resolve_input(
    path: Option<&str>,
    company: CompanyArgs,
    figures: FiguresArgs,
) -> Result<DiagnosisInput, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_structured(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(DiagnosisInput {
        empresa: Company::new(company.nome, company.cnpj, company.setor),
        dados: FinancialInputs {
            receita_bruta: figures.receita_bruta,
            iss: figures.iss,
            verbas_indenizatorias: figures.verbas_indenizatorias,
            folha_12m: figures.folha_12m,
            valor_venal: figures.valor_venal,
            percentual_ipva: figures.percentual_ipva,
            compras: figures.compras,
            percentual_insumos: figures.percentual_insumos,
        },
    })
}
