use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Fields the extraction service may return. Every field is optional and
/// unknown fields are ignored. Numbers and booleans are kept as their JSON
/// text; nulls, arrays and objects count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    #[serde(deserialize_with = "scalar_text")]
    pub nome_completo: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub cpf: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub rg: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub data_emissao: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub orgao_emissor: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub uf_emissor: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub data_nascimento: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub naturalidade: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub endereco_completo: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub cidade: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub estado: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub cep: Option<String>,
}

fn scalar_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Body of a 2xx reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ExtractedFields>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of one submission, consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Success { fields: ExtractedFields },
    Failure { message: String },
}

impl ExtractionResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<ExtractionResponse> for ExtractionResult {
    fn from(resp: ExtractionResponse) -> Self {
        if resp.success {
            Self::Success {
                fields: resp.data.unwrap_or_default(),
            }
        } else {
            Self::Failure {
                message: resp
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ExtractionResult {
        serde_json::from_str::<ExtractionResponse>(json).unwrap().into()
    }

    #[test]
    fn success_with_partial_fields() {
        let result =
            parse(r#"{"success":true,"data":{"nome_completo":"Ana Silva","cpf":"123.456.789-00"}}"#);
        let ExtractionResult::Success { fields } = result else {
            panic!("expected success");
        };
        assert_eq!(fields.nome_completo.as_deref(), Some("Ana Silva"));
        assert_eq!(fields.cpf.as_deref(), Some("123.456.789-00"));
        assert!(fields.rg.is_none());
    }

    #[test]
    fn unknown_and_null_fields_are_tolerated() {
        let result = parse(
            r#"{"success":true,"data":{"cidade":null,"confidence":"0.93","cep":"01001-000"},"message":"ok"}"#,
        );
        let ExtractionResult::Success { fields } = result else {
            panic!("expected success");
        };
        assert!(fields.cidade.is_none());
        assert_eq!(fields.cep.as_deref(), Some("01001-000"));
    }

    #[test]
    fn non_string_scalars_keep_their_json_text() {
        let result = parse(
            r#"{"success":true,"data":{"nome_completo":"Ana Silva","cep":1001000,"rg":true,"cidade":["Recife"],"estado":{"uf":"PE"}}}"#,
        );
        let ExtractionResult::Success { fields } = result else {
            panic!("expected success");
        };
        assert_eq!(fields.nome_completo.as_deref(), Some("Ana Silva"));
        assert_eq!(fields.cep.as_deref(), Some("1001000"));
        assert_eq!(fields.rg.as_deref(), Some("true"));
        assert!(fields.cidade.is_none());
        assert!(fields.estado.is_none());
    }

    #[test]
    fn success_without_data_is_empty() {
        assert_eq!(
            parse(r#"{"success":true}"#),
            ExtractionResult::Success {
                fields: ExtractedFields::default()
            }
        );
    }

    #[test]
    fn failure_carries_server_message() {
        assert_eq!(
            parse(r#"{"success":false,"error":"low image quality"}"#),
            ExtractionResult::Failure {
                message: "low image quality".into()
            }
        );
    }

    #[test]
    fn failure_without_message_falls_back() {
        assert_eq!(
            parse(r#"{"success":false}"#),
            ExtractionResult::Failure {
                message: UNKNOWN_ERROR.into()
            }
        );
        assert_eq!(
            parse(r#"{"success":false,"error":"  "}"#),
            ExtractionResult::Failure {
                message: UNKNOWN_ERROR.into()
            }
        );
    }

    #[test]
    fn missing_success_flag_does_not_parse() {
        assert!(serde_json::from_str::<ExtractionResponse>(r#"{"data":{}}"#).is_err());
    }
}
