//! Pure mapping from an extraction outcome to a presentational view model,
//! plus text and HTML templates over that model.

use std::fmt;

use crate::result::{ExtractedFields, ExtractionResult};

pub const SUCCESS_TITLE: &str = "Extracted data";
pub const FAILURE_TITLE: &str = "Processing error";

/// Known fields in display order.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("nome_completo", "Full name"),
    ("cpf", "CPF"),
    ("rg", "RG"),
    ("data_emissao", "Issue date"),
    ("orgao_emissor", "Issuing authority"),
    ("uf_emissor", "Issuing state"),
    ("data_nascimento", "Birth date"),
    ("naturalidade", "Place of birth"),
    ("endereco_completo", "Address"),
    ("cidade", "City"),
    ("estado", "State"),
    ("cep", "Postal code"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Success { rows: Vec<FieldRow> },
    Failure { message: String },
}

impl ExtractedFields {
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "nome_completo" => &self.nome_completo,
            "cpf" => &self.cpf,
            "rg" => &self.rg,
            "data_emissao" => &self.data_emissao,
            "orgao_emissor" => &self.orgao_emissor,
            "uf_emissor" => &self.uf_emissor,
            "data_nascimento" => &self.data_nascimento,
            "naturalidade" => &self.naturalidade,
            "endereco_completo" => &self.endereco_completo,
            "cidade" => &self.cidade,
            "estado" => &self.estado,
            "cep" => &self.cep,
            _ => return None,
        };
        value.as_deref()
    }
}

#[must_use]
pub fn render(result: &ExtractionResult) -> ResultView {
    match result {
        ExtractionResult::Success { fields } => ResultView::Success {
            rows: FIELD_LABELS
                .iter()
                .filter_map(|&(key, label)| {
                    let value = fields.field(key)?.trim();
                    (!value.is_empty()).then(|| FieldRow {
                        key,
                        label,
                        value: value.to_owned(),
                    })
                })
                .collect(),
        },
        ExtractionResult::Failure { message } => ResultView::Failure {
            message: message.clone(),
        },
    }
}

impl ResultView {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Success { .. } => SUCCESS_TITLE,
            Self::Failure { .. } => FAILURE_TITLE,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// HTML fragment for embedding in a results panel. All values are escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let (class, lines): (&str, Vec<(&str, &str)>) = match self {
            Self::Success { rows } => (
                "success",
                rows.iter().map(|r| (r.label, r.value.as_str())).collect(),
            ),
            Self::Failure { message } => ("error", vec![("Error", message.as_str())]),
        };
        let mut out = format!(
            "<div class=\"result-item {class}\">\n<h4>{}</h4>\n",
            escape_html(self.title())
        );
        for (label, value) in lines {
            out.push_str("<p><strong>");
            out.push_str(&escape_html(label));
            out.push_str(":</strong> ");
            out.push_str(&escape_html(value));
            out.push_str("</p>\n");
        }
        out.push_str("</div>");
        out
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())?;
        match self {
            Self::Success { rows } => {
                for row in rows {
                    write!(f, "\n{}: {}", row.label, row.value)?;
                }
            }
            Self::Failure { message } => write!(f, "\nError: {message}")?,
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
