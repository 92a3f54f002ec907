pub mod patch;
pub mod turno;

pub use patch::Patch;
pub use turno::Turno;
