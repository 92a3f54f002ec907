use crate::domain::entities::Turma;
use crate::domain::factories::{escola_factory, turma_factory};
use crate::domain::value_objects::Turno;
use crate::infrastructure::mock_server::state::{EscolaRecord, MockState};
use crate::shared::collate::compare_nomes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

pub type SharedState = Arc<RwLock<MockState>>;

const ERRO_ESCOLA: &str = "Escola não encontrada";
const ERRO_TURMA: &str = "Turma não encontrada";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/schools", get(list_schools).post(create_school))
        .route(
            "/api/schools/{id}",
            get(get_school).put(update_school).delete(delete_school),
        )
        .route("/api/schools/{id}/classes", get(list_school_classes))
        .route("/api/classes", get(list_classes).post(create_class))
        .route(
            "/api/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .with_state(state)
}

fn erro(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "erro": message.into() }))).into_response()
}

/// Trimmed string field; blank counts as absent, like the app treats it.
fn campo_texto(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

async fn list_schools(State(state): State<SharedState>) -> Response {
    let state = state.read().await;
    let mut escolas: Vec<_> = state
        .escolas
        .iter()
        .map(|e| e.to_escola(state.turmas_da_escola(&e.id)))
        .collect();
    escolas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
    debug!(count = escolas.len(), "GET /api/schools");
    Json(escolas).into_response()
}

async fn get_school(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;
    match state.escola(&id) {
        Some(record) => Json(record.to_escola(state.turmas_da_escola(&id))).into_response(),
        None => erro(StatusCode::NOT_FOUND, ERRO_ESCOLA),
    }
}

async fn create_school(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let nome = campo_texto(&body, "nome");
    if nome.as_deref().map_or(true, |n| n.chars().count() < 3) {
        return erro(StatusCode::BAD_REQUEST, escola_factory::MSG_NOME);
    }
    let endereco = campo_texto(&body, "endereco");
    if endereco.as_deref().map_or(true, |e| e.chars().count() < 5) {
        return erro(StatusCode::BAD_REQUEST, escola_factory::MSG_ENDERECO);
    }

    let now = Utc::now();
    let record = EscolaRecord {
        id: Uuid::new_v4().to_string(),
        nome: nome.unwrap_or_default(),
        endereco: endereco.unwrap_or_default(),
        telefone: campo_texto(&body, "telefone"),
        email: campo_texto(&body, "email"),
        criado_em: now,
        atualizado_em: now,
    };
    let escola = record.to_escola(Vec::new());
    state.write().await.escolas.push(record);
    debug!(nome = %escola.nome, "POST /api/schools");
    Json(escola).into_response()
}

async fn update_school(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let nome = campo_texto(&body, "nome");
    if nome.as_deref().map_or(true, |n| n.chars().count() < 3) {
        return erro(StatusCode::BAD_REQUEST, escola_factory::MSG_NOME);
    }
    let endereco = campo_texto(&body, "endereco");
    if endereco.as_deref().map_or(true, |e| e.chars().count() < 5) {
        return erro(StatusCode::BAD_REQUEST, escola_factory::MSG_ENDERECO);
    }

    let mut state = state.write().await;
    let turmas = state.turmas_da_escola(&id);
    let Some(record) = state.escolas.iter_mut().find(|e| e.id == id) else {
        return erro(StatusCode::NOT_FOUND, ERRO_ESCOLA);
    };
    record.nome = nome.unwrap_or_default();
    record.endereco = endereco.unwrap_or_default();
    record.telefone = campo_texto(&body, "telefone");
    record.email = campo_texto(&body, "email");
    record.atualizado_em = Utc::now();
    debug!(%id, "PUT /api/schools");
    Json(record.to_escola(turmas)).into_response()
}

async fn delete_school(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = state.write().await;
    if state.escola(&id).is_none() {
        return erro(StatusCode::NOT_FOUND, ERRO_ESCOLA);
    }
    // Cascade: classes go first.
    state.turmas.retain(|t| t.escola_id != id);
    state.escolas.retain(|e| e.id != id);
    debug!(%id, "DELETE /api/schools");
    StatusCode::NO_CONTENT.into_response()
}

async fn list_school_classes(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;
    if state.escola(&id).is_none() {
        return erro(StatusCode::NOT_FOUND, ERRO_ESCOLA);
    }
    let mut turmas = state.turmas_da_escola(&id);
    turmas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
    Json(turmas).into_response()
}

async fn list_classes(State(state): State<SharedState>) -> Response {
    let state = state.read().await;
    let mut turmas = state.turmas.clone();
    turmas.sort_by(|a, b| compare_nomes(&a.nome, &b.nome));
    debug!(count = turmas.len(), "GET /api/classes");
    Json(turmas).into_response()
}

async fn get_class(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;
    match state.turmas.iter().find(|t| t.id == id) {
        Some(turma) => Json(turma.clone()).into_response(),
        None => erro(StatusCode::NOT_FOUND, ERRO_TURMA),
    }
}

async fn create_class(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let Some(escola_id) = campo_texto(&body, "escolaId") else {
        return erro(StatusCode::BAD_REQUEST, turma_factory::MSG_ESCOLA_ID);
    };

    let mut state = state.write().await;
    if state.escola(&escola_id).is_none() {
        return erro(StatusCode::BAD_REQUEST, ERRO_ESCOLA);
    }

    let nome = campo_texto(&body, "nome");
    if nome.as_deref().map_or(true, |n| n.chars().count() < 2) {
        return erro(StatusCode::BAD_REQUEST, turma_factory::MSG_NOME);
    }
    let turno = match body.get("turno").and_then(Value::as_str) {
        None => return erro(StatusCode::BAD_REQUEST, "Turno é obrigatório"),
        Some(raw) => match raw.parse::<Turno>() {
            Ok(turno) => turno,
            Err(message) => return erro(StatusCode::BAD_REQUEST, message),
        },
    };
    let ano_letivo = match body.get("anoLetivo").and_then(Value::as_i64) {
        None => return erro(StatusCode::BAD_REQUEST, "Ano letivo é obrigatório"),
        Some(ano) if !turma_factory::ANO_LETIVO_RANGE.contains(&(ano as i32)) => {
            return erro(StatusCode::BAD_REQUEST, turma_factory::MSG_ANO_LETIVO)
        }
        Some(ano) => ano as i32,
    };
    let capacidade = match body.get("capacidade") {
        None | Some(Value::Null) => None,
        Some(valor) => match valor.as_i64() {
            Some(c) if turma_factory::CAPACIDADE_RANGE.contains(&(c as i32)) => Some(c as i32),
            _ => return erro(StatusCode::BAD_REQUEST, turma_factory::MSG_CAPACIDADE),
        },
    };

    let now = Utc::now();
    let turma = Turma {
        id: Uuid::new_v4().to_string(),
        escola_id,
        nome: nome.unwrap_or_default(),
        turno,
        ano_letivo,
        capacidade,
        criado_em: now,
        atualizado_em: now,
    };
    state.turmas.push(turma.clone());
    debug!(nome = %turma.nome, "POST /api/classes");
    Json(turma).into_response()
}

async fn update_class(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let nome = match body.get("nome") {
        None | Some(Value::Null) => None,
        Some(valor) => match valor.as_str().map(str::trim) {
            Some(n) if n.chars().count() >= 2 => Some(n.to_string()),
            _ => return erro(StatusCode::BAD_REQUEST, "Nome deve ter mínimo 2 caracteres"),
        },
    };
    let turno = match body.get("turno").and_then(Value::as_str) {
        None => None,
        Some(raw) => match raw.parse::<Turno>() {
            Ok(turno) => Some(turno),
            Err(message) => return erro(StatusCode::BAD_REQUEST, message),
        },
    };
    let ano_letivo = match body.get("anoLetivo").and_then(Value::as_i64) {
        None => None,
        Some(ano) if !turma_factory::ANO_LETIVO_RANGE.contains(&(ano as i32)) => {
            return erro(StatusCode::BAD_REQUEST, turma_factory::MSG_ANO_LETIVO)
        }
        Some(ano) => Some(ano as i32),
    };
    // Tri-state: absent keeps, null clears, a value replaces.
    enum Capacidade {
        Manter,
        Limpar,
        Definir(i32),
    }
    let capacidade = match body.get("capacidade") {
        None => Capacidade::Manter,
        Some(Value::Null) => Capacidade::Limpar,
        Some(valor) => match valor.as_i64() {
            Some(c) if turma_factory::CAPACIDADE_RANGE.contains(&(c as i32)) => {
                Capacidade::Definir(c as i32)
            }
            _ => return erro(StatusCode::BAD_REQUEST, turma_factory::MSG_CAPACIDADE),
        },
    };

    let mut state = state.write().await;
    let Some(turma) = state.turmas.iter_mut().find(|t| t.id == id) else {
        return erro(StatusCode::NOT_FOUND, ERRO_TURMA);
    };
    if let Some(nome) = nome {
        turma.nome = nome;
    }
    if let Some(turno) = turno {
        turma.turno = turno;
    }
    if let Some(ano) = ano_letivo {
        turma.ano_letivo = ano;
    }
    match capacidade {
        Capacidade::Manter => {}
        Capacidade::Limpar => turma.capacidade = None,
        Capacidade::Definir(c) => turma.capacidade = Some(c),
    }
    turma.atualizado_em = Utc::now();
    debug!(%id, "PUT /api/classes");
    Json(turma.clone()).into_response()
}

async fn delete_class(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = state.write().await;
    if !state.turmas.iter().any(|t| t.id == id) {
        return erro(StatusCode::NOT_FOUND, ERRO_TURMA);
    }
    state.turmas.retain(|t| t.id != id);
    debug!(%id, "DELETE /api/classes");
    StatusCode::NO_CONTENT.into_response()
}
