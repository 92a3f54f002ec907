pub mod escola_store;
pub mod turma_store;

pub use escola_store::EscolaStore;
pub use turma_store::TurmaStore;
