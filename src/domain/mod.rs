pub mod entities;
pub mod factories;
pub mod value_objects;

pub use entities::{Escola, EscolaInput, EscolaPatch, PendingAction, Turma, TurmaInput, TurmaPatch};
pub use factories::{EscolaFactory, TurmaFactory};
pub use value_objects::{Patch, Turno};
