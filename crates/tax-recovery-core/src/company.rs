use serde::{Deserialize, Serialize};

/// Identity of the company under diagnosis. Only used for report headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub nome: String,
    pub cnpj: String,
    pub setor: String,
    /// Supporting documents attached by the caller. Carried through but never
    /// read by the thesis engine or the report.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentos: Vec<CompanyDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDocument {
    pub tipo: String,
    pub conteudo: String,
}

impl Company {
    pub fn new(nome: impl Into<String>, cnpj: impl Into<String>, setor: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            cnpj: cnpj.into(),
            setor: setor.into(),
            documentos: Vec::new(),
        }
    }

    pub fn add_document(&mut self, tipo: impl Into<String>, conteudo: impl Into<String>) {
        self.documentos.push(CompanyDocument {
            tipo: tipo.into(),
            conteudo: conteudo.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company_has_no_documents() {
        let c = Company::new("Acme", "00.000.000/0001-00", "Retail");
        assert_eq!(c.nome, "Acme");
        assert!(c.documentos.is_empty());
    }

    #[test]
    fn test_add_document_appends_in_order() {
        let mut c = Company::new("Acme", "00.000.000/0001-00", "Retail");
        c.add_document("dctf", "2023");
        c.add_document("efd", "2024");
        assert_eq!(c.documentos.len(), 2);
        assert_eq!(c.documentos[1].tipo, "efd");
    }

    #[test]
    fn test_documents_omitted_from_json_when_empty() {
        let c = Company::new("Acme", "00.000.000/0001-00", "Retail");
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("documentos").is_none());

        let back: Company =
            serde_json::from_str(r#"{"nome":"A","cnpj":"1","setor":"S"}"#).unwrap();
        assert!(back.documentos.is_empty());
    }
}
