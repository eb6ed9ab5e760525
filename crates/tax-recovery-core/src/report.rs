use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::company::Company;
use crate::theses::ThesisOutcome;
use crate::types::*;

/// File name offered for the downloadable report.
pub const REPORT_FILE_NAME: &str = "relatorio_tributario.txt";

pub const REPORT_TITLE: &str = "Relatório de Diagnóstico Tributário";

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

/// Render the plain-text diagnosis report.
///
/// A header with the company identity, then one section per result in the
/// order given. Every field prints on its own line with its humanized key and
/// the value's plain `Display` form.
pub fn render_report<T: ThesisOutcome>(company: &Company, results: &[T]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "Empresa: {}", company.nome);
    let _ = writeln!(out, "CNPJ: {}", company.cnpj);
    let _ = writeln!(out, "Setor: {}", company.setor);
    out.push('\n');

    for result in results {
        let _ = writeln!(out, "--- {} ---", result.thesis().id().to_uppercase());
        for field in result.fields() {
            let _ = writeln!(out, "{}: {}", humanize_key(field.key), field.value);
        }
        out.push('\n');
    }
    out
}

/// `credito_apuravel` -> `Credito apuravel`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Format an amount for on-screen display: `R$ 131,495.00`.
pub fn format_brl(value: Money) -> String {
    let rounded = round_money(value);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("R$ {sign}{grouped}.{frac_part}")
}

// ---------------------------------------------------------------------------
// Download artifact
// ---------------------------------------------------------------------------

/// The report packaged for download. Transport encoding is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content: String,
}

impl ReportArtifact {
    pub fn new(content: String) -> Self {
        Self {
            file_name: REPORT_FILE_NAME.to_string(),
            content,
        }
    }

    /// UTF-8 bytes of the report.
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
