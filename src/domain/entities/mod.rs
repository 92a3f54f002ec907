pub mod escola;
pub mod pending_action;
pub mod turma;

pub use escola::{Escola, EscolaInput, EscolaPatch};
pub use pending_action::{
    ActionKind, DeletePayload, EntityKind, EscolaUpdatePayload, PendingAction, TurmaUpdatePayload,
};
pub use turma::{Turma, TurmaInput, TurmaPatch};
