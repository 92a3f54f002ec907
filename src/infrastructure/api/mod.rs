pub mod client;
pub mod escola_repository;
pub mod turma_repository;

pub use client::ApiClient;
pub use escola_repository::EscolaApiRepository;
pub use turma_repository::TurmaApiRepository;
