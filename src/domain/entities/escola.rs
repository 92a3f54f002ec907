use crate::domain::entities::turma::Turma;
use crate::domain::value_objects::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A school, owning zero or more Turmas.
///
/// `turmas` is always present on fetch responses; a freshly created
/// Escola carries an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escola {
    pub id: String,
    pub nome: String,
    pub endereco: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub turmas: Vec<Turma>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Raw input for creating an Escola, or the full body of a PUT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscolaInput {
    pub nome: String,
    pub endereco: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Partial update. Required fields are optional-to-replace; optional
/// fields are tri-state so "omitted" and "cleared" stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscolaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub telefone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
}

impl Escola {
    /// Full-input view of the current state, the shape a PUT expects.
    pub fn to_input(&self) -> EscolaInput {
        EscolaInput {
            nome: self.nome.clone(),
            endereco: self.endereco.clone(),
            telefone: self.telefone.clone(),
            email: self.email.clone(),
        }
    }
}
