use crate::domain::entities::{Turma, TurmaInput, TurmaPatch};
use crate::domain::factories::ValidationOutcome;
use crate::domain::value_objects::Patch;
use crate::shared::error::AppError;
use chrono::Utc;
use std::ops::RangeInclusive;
use uuid::Uuid;

pub const ANO_LETIVO_RANGE: RangeInclusive<i32> = 2020..=2030;
pub const CAPACIDADE_RANGE: RangeInclusive<i32> = 1..=100;

pub const MSG_ESCOLA_ID: &str = "ID da escola é obrigatório";
pub const MSG_NOME: &str = "Nome é obrigatório (mínimo 2 caracteres)";
pub const MSG_ANO_LETIVO: &str = "Ano letivo inválido";
pub const MSG_CAPACIDADE: &str = "Capacidade deve ser entre 1 e 100";

#[derive(Debug, Clone, Copy, Default)]
pub struct TurmaFactory;

impl TurmaFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, input: &TurmaInput) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        if input.escola_id.trim().is_empty() {
            outcome.push("escolaId", MSG_ESCOLA_ID);
        }
        if input.nome.trim().chars().count() < 2 {
            outcome.push("nome", MSG_NOME);
        }
        if !ANO_LETIVO_RANGE.contains(&input.ano_letivo) {
            outcome.push("anoLetivo", MSG_ANO_LETIVO);
        }
        if let Some(capacidade) = input.capacidade {
            if !CAPACIDADE_RANGE.contains(&capacidade) {
                outcome.push("capacidade", MSG_CAPACIDADE);
            }
        }

        outcome
    }

    pub fn create(&self, input: &TurmaInput) -> Result<Turma, AppError> {
        let outcome = self.validate(input);
        if !outcome.is_valid() {
            return Err(AppError::Validation(outcome.joined_messages()));
        }

        let now = Utc::now();
        Ok(Turma {
            id: Uuid::new_v4().to_string(),
            escola_id: input.escola_id.trim().to_string(),
            nome: input.nome.trim().to_string(),
            turno: input.turno,
            ano_letivo: input.ano_letivo,
            capacidade: input.capacidade,
            criado_em: now,
            atualizado_em: now,
        })
    }

    /// Merges a patch over an existing record; `escola_id` never changes.
    pub fn create_for_update(&self, existing: &Turma, patch: &TurmaPatch) -> Turma {
        let mut updated = existing.clone();

        if let Some(nome) = patch.nome.as_deref() {
            if !nome.trim().is_empty() {
                updated.nome = nome.trim().to_string();
            }
        }
        if let Some(turno) = patch.turno {
            updated.turno = turno;
        }
        if let Some(ano) = patch.ano_letivo {
            updated.ano_letivo = ano;
        }
        updated.capacidade = match patch.capacidade {
            Patch::Keep => existing.capacidade,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        };
        updated.atualizado_em = Utc::now();

        updated
    }
}
