use crate::domain::entities::{Escola, EscolaInput, EscolaPatch};
use crate::domain::factories::{normalize_optional, ValidationOutcome};
use crate::domain::value_objects::Patch;
use crate::shared::error::AppError;
use chrono::Utc;
use uuid::Uuid;

pub const MSG_NOME: &str = "Nome é obrigatório (mínimo 3 caracteres)";
pub const MSG_ENDERECO: &str = "Endereço é obrigatório (mínimo 5 caracteres)";
pub const MSG_EMAIL: &str = "E-mail inválido";

#[derive(Debug, Clone, Copy, Default)]
pub struct EscolaFactory;

impl EscolaFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, input: &EscolaInput) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        if input.nome.trim().chars().count() < 3 {
            outcome.push("nome", MSG_NOME);
        }
        if input.endereco.trim().chars().count() < 5 {
            outcome.push("endereco", MSG_ENDERECO);
        }
        // Optional: only validated when present and non-blank.
        if let Some(email) = input.email.as_deref() {
            if !email.trim().is_empty() && !is_valid_email(email.trim()) {
                outcome.push("email", MSG_EMAIL);
            }
        }

        outcome
    }

    pub fn create(&self, input: &EscolaInput) -> Result<Escola, AppError> {
        let outcome = self.validate(input);
        if !outcome.is_valid() {
            return Err(AppError::Validation(outcome.joined_messages()));
        }

        let now = Utc::now();
        Ok(Escola {
            id: Uuid::new_v4().to_string(),
            nome: input.nome.trim().to_string(),
            endereco: input.endereco.trim().to_string(),
            telefone: normalize_optional(input.telefone.as_deref()),
            email: normalize_optional(input.email.as_deref()),
            turmas: Vec::new(),
            criado_em: now,
            atualizado_em: now,
        })
    }

    /// Merges a patch over an existing record. Omitted fields keep their
    /// value, `Clear` wipes an optional field, blank replacements are
    /// ignored for required fields. Only `atualizado_em` is refreshed.
    pub fn create_for_update(&self, existing: &Escola, patch: &EscolaPatch) -> Escola {
        let mut updated = existing.clone();

        if let Some(nome) = patch.nome.as_deref() {
            if !nome.trim().is_empty() {
                updated.nome = nome.trim().to_string();
            }
        }
        if let Some(endereco) = patch.endereco.as_deref() {
            if !endereco.trim().is_empty() {
                updated.endereco = endereco.trim().to_string();
            }
        }
        updated.telefone = resolve_optional(&patch.telefone, existing.telefone.clone());
        updated.email = resolve_optional(&patch.email, existing.email.clone());
        updated.atualizado_em = Utc::now();

        updated
    }
}

fn resolve_optional(patch: &Patch<String>, current: Option<String>) -> Option<String> {
    match patch {
        Patch::Keep => current,
        Patch::Clear => None,
        Patch::Set(value) => normalize_optional(Some(value)),
    }
}

/// Mirrors the app's simple `local@domain.tld` rule: no whitespace, a
/// single `@`, and a dot somewhere in the domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    let sound = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);
    match domain.rsplit_once('.') {
        Some((host, tld)) => sound(local) && sound(host) && sound(tld),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> EscolaInput {
        EscolaInput {
            nome: "Escola Teste".to_string(),
            endereco: "Rua das Flores 100".to_string(),
            telefone: None,
            email: None,
        }
    }

    #[test]
    fn accepts_valid_input() {
        let factory = EscolaFactory::new();
        assert!(factory.validate(&valid_input()).is_valid());
    }

    #[test]
    fn rejects_short_nome_after_trim() {
        let factory = EscolaFactory::new();
        let mut input = valid_input();
        input.nome = "  Sc  ".to_string();
        let outcome = factory.validate(&input);
        assert_eq!(outcome.error_for("nome"), Some(MSG_NOME));
    }

    #[test]
    fn rejects_short_endereco() {
        let factory = EscolaFactory::new();
        let mut input = valid_input();
        input.endereco = "Rua".to_string();
        assert_eq!(factory.validate(&input).error_for("endereco"), Some(MSG_ENDERECO));
    }

    #[test]
    fn reports_all_failing_fields_at_once() {
        let factory = EscolaFactory::new();
        let input = EscolaInput {
            nome: "Sc".to_string(),
            endereco: "Rua".to_string(),
            telefone: None,
            email: Some("sem-arroba".to_string()),
        };
        let outcome = factory.validate(&input);
        assert_eq!(outcome.errors().len(), 3);
        assert_eq!(outcome.error_for("email"), Some(MSG_EMAIL));
    }

    #[test]
    fn email_is_optional_and_blank_is_fine() {
        let factory = EscolaFactory::new();
        let mut input = valid_input();
        input.email = Some(String::new());
        assert!(factory.validate(&input).is_valid());
        input.email = None;
        assert!(factory.validate(&input).is_valid());
    }

    #[test]
    fn email_without_at_is_rejected() {
        let factory = EscolaFactory::new();
        let mut input = valid_input();
        input.email = Some("contato.escola.br".to_string());
        assert_eq!(factory.validate(&input).error_for("email"), Some(MSG_EMAIL));
    }

    #[test]
    fn email_needs_dotted_domain() {
        assert!(is_valid_email("contato@escola.edu.br"));
        assert!(!is_valid_email("contato@escola"));
        assert!(!is_valid_email("con tato@escola.br"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn create_trims_and_fills_defaults() {
        let factory = EscolaFactory::new();
        let input = EscolaInput {
            nome: "  Escola Teste  ".to_string(),
            endereco: " Rua das Flores 100 ".to_string(),
            telefone: Some("   ".to_string()),
            email: Some(" contato@escola.br ".to_string()),
        };
        let escola = factory.create(&input).unwrap();
        assert_eq!(escola.nome, "Escola Teste");
        assert_eq!(escola.endereco, "Rua das Flores 100");
        assert_eq!(escola.telefone, None);
        assert_eq!(escola.email.as_deref(), Some("contato@escola.br"));
        assert!(escola.turmas.is_empty());
        assert!(!escola.id.is_empty());
        assert_eq!(escola.criado_em, escola.atualizado_em);
    }

    #[test]
    fn create_joins_all_messages() {
        let factory = EscolaFactory::new();
        let input = EscolaInput {
            nome: "Sc".to_string(),
            endereco: "Rua".to_string(),
            telefone: None,
            email: None,
        };
        let err = factory.create(&input).unwrap_err();
        let message = err.to_string();
        assert_eq!(message, format!("Dados inválidos: {MSG_NOME}, {MSG_ENDERECO}"));
    }

    #[test]
    fn update_merges_tri_state_fields() {
        let factory = EscolaFactory::new();
        let existing = factory
            .create(&EscolaInput {
                nome: "Escola Teste".to_string(),
                endereco: "Rua das Flores 100".to_string(),
                telefone: Some("(11) 1234-5678".to_string()),
                email: Some("contato@escola.br".to_string()),
            })
            .unwrap();

        let patch = EscolaPatch {
            nome: Some("  Escola Renomeada ".to_string()),
            endereco: None,
            telefone: Patch::Keep,
            email: Patch::Clear,
        };
        let updated = factory.create_for_update(&existing, &patch);

        assert_eq!(updated.nome, "Escola Renomeada");
        assert_eq!(updated.endereco, existing.endereco);
        assert_eq!(updated.telefone, existing.telefone);
        assert_eq!(updated.email, None);
        assert_eq!(updated.criado_em, existing.criado_em);
        assert!(updated.atualizado_em >= existing.atualizado_em);
    }

    #[test]
    fn update_ignores_blank_required_replacement() {
        let factory = EscolaFactory::new();
        let existing = factory.create(&valid_input()).unwrap();
        let patch = EscolaPatch {
            nome: Some("   ".to_string()),
            ..Default::default()
        };
        let updated = factory.create_for_update(&existing, &patch);
        assert_eq!(updated.nome, existing.nome);
    }
}
