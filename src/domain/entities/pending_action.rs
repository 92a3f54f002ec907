use crate::domain::entities::escola::EscolaInput;
use crate::domain::entities::turma::TurmaPatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Escola,
    Turma,
}

/// A mutation queued while offline, awaiting replay.
///
/// The payload is opaque at this level; the coordinator decodes it per
/// `(kind, entity)` when replaying. Persisted so it survives restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub id: String,
    pub kind: ActionKind,
    pub entity: EntityKind,
    pub payload: serde_json::Value,
    #[serde(default)]
    pub attempts: u32,
    pub enqueued_at: DateTime<Utc>,
}

impl PendingAction {
    pub fn new(kind: ActionKind, entity: EntityKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            entity,
            payload,
            attempts: 0,
            enqueued_at: Utc::now(),
        }
    }
}

/// Replay payload for `update` on an Escola: the PUT contract takes the
/// full input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscolaUpdatePayload {
    pub id: String,
    pub dados: EscolaInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurmaUpdatePayload {
    pub id: String,
    pub dados: TurmaPatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayload {
    pub id: String,
}
