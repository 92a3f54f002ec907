use crate::domain::value_objects::{Patch, Turno};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A class/cohort. Always belongs to exactly one Escola.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turma {
    pub id: String,
    pub escola_id: String,
    pub nome: String,
    pub turno: Turno,
    pub ano_letivo: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacidade: Option<i32>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurmaInput {
    pub escola_id: String,
    pub nome: String,
    pub turno: Turno,
    pub ano_letivo: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacidade: Option<i32>,
}

/// Partial update; the owning Escola cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurmaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turno: Option<Turno>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ano_letivo: Option<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub capacidade: Patch<i32>,
}
