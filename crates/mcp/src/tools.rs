//! Tool definitions exposed by the tool server.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input shared by both tools.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PostalCodeInput {
    /// Brazilian postal code (CEP), with or without the hyphen, e.g. "01310-100"
    #[serde(default)]
    pub cep: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ConsultarCep,
    AnalisarEndereco,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::ConsultarCep, Tool::AnalisarEndereco];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ConsultarCep => "consultar_cep",
            Tool::AnalisarEndereco => "analisar_endereco",
        }
    }

    /// Name reported in the `tool` field of a reply.
    pub fn qualified_name(self) -> String {
        format!("mcp:{}", self.name())
    }

    pub fn path(self) -> String {
        format!("/mcp/{}", self.name())
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ConsultarCep => descriptions::CONSULTAR_CEP,
            Tool::AnalisarEndereco => descriptions::ANALISAR_ENDERECO,
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            path: self.path(),
            description: self.description().trim().to_string(),
            input_schema: serde_json::to_value(schemars::schema_for!(PostalCodeInput))
                .unwrap_or_default(),
        }
    }
}

/// Entry of `GET /mcp/tools`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub path: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

pub mod descriptions {
    pub const CONSULTAR_CEP: &str = r#"
Look up a Brazilian postal code (CEP) on ViaCEP and return street, neighborhood,
city, state and area code as a formatted text block.
"#;

    pub const ANALISAR_ENDERECO: &str = r#"
Look up a Brazilian postal code (CEP) and add an LLM-written analysis of the
region: type of area, characteristics, geographic context and useful facts.
If the analysis fails the basic lookup data is still returned.
"#;
}
