use crate::domain::entities::{Escola, Turma};
use crate::domain::value_objects::Turno;
use chrono::{DateTime, Utc};

/// A stored school. `turmas` is joined in per response, so records hold
/// only the school's own fields.
#[derive(Debug, Clone)]
pub struct EscolaRecord {
    pub id: String,
    pub nome: String,
    pub endereco: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl EscolaRecord {
    pub fn to_escola(&self, turmas: Vec<Turma>) -> Escola {
        Escola {
            id: self.id.clone(),
            nome: self.nome.clone(),
            endereco: self.endereco.clone(),
            telefone: self.telefone.clone(),
            email: self.email.clone(),
            turmas,
            criado_em: self.criado_em,
            atualizado_em: self.atualizado_em,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub escolas: Vec<EscolaRecord>,
    pub turmas: Vec<Turma>,
}

impl MockState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three schools and five classes every fresh server starts with.
    pub fn seeded() -> Self {
        let escolas = vec![
            EscolaRecord {
                id: "1".to_string(),
                nome: "Escola Municipal João da Silva".to_string(),
                endereco: "Rua das Flores, 123 - Centro".to_string(),
                telefone: Some("(11) 1234-5678".to_string()),
                email: Some("contato@emjoaodasilva.edu.br".to_string()),
                criado_em: ts("2024-01-15T10:00:00Z"),
                atualizado_em: ts("2024-01-15T10:00:00Z"),
            },
            EscolaRecord {
                id: "2".to_string(),
                nome: "Escola Estadual Maria Souza".to_string(),
                endereco: "Av. Brasil, 456 - Jardim América".to_string(),
                telefone: Some("(11) 9876-5432".to_string()),
                email: Some("secretaria@eemariasouza.edu.br".to_string()),
                criado_em: ts("2024-02-20T14:30:00Z"),
                atualizado_em: ts("2024-02-20T14:30:00Z"),
            },
            EscolaRecord {
                id: "3".to_string(),
                nome: "EMEF Professor Carlos Santos".to_string(),
                endereco: "Rua Independência, 789 - Vila Nova".to_string(),
                telefone: Some("(11) 5555-1234".to_string()),
                email: None,
                criado_em: ts("2024-03-10T09:15:00Z"),
                atualizado_em: ts("2024-03-10T09:15:00Z"),
            },
        ];

        let turmas = vec![
            turma("t1", "1", "5º Ano A", Turno::Matutino, Some(30), "2024-01-20T08:00:00Z"),
            turma("t2", "1", "5º Ano B", Turno::Vespertino, Some(28), "2024-01-20T08:00:00Z"),
            turma("t3", "1", "6º Ano A", Turno::Matutino, Some(32), "2024-01-22T10:00:00Z"),
            turma("t4", "2", "1º Ano A", Turno::Matutino, Some(25), "2024-02-25T11:00:00Z"),
            turma("t5", "2", "1º Ano B", Turno::Vespertino, Some(25), "2024-02-25T11:00:00Z"),
        ];

        Self { escolas, turmas }
    }

    pub fn escola(&self, id: &str) -> Option<&EscolaRecord> {
        self.escolas.iter().find(|e| e.id == id)
    }

    pub fn turmas_da_escola(&self, escola_id: &str) -> Vec<Turma> {
        self.turmas
            .iter()
            .filter(|t| t.escola_id == escola_id)
            .cloned()
            .collect()
    }
}

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn turma(
    id: &str,
    escola_id: &str,
    nome: &str,
    turno: Turno,
    capacidade: Option<i32>,
    criado_em: &str,
) -> Turma {
    Turma {
        id: id.to_string(),
        escola_id: escola_id.to_string(),
        nome: nome.to_string(),
        turno,
        ano_letivo: 2024,
        capacidade,
        criado_em: ts(criado_em),
        atualizado_em: ts(criado_em),
    }
}
