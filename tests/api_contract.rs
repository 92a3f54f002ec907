mod common;

use common::{config_para, iniciar_servidor, repositorios};
use escolas_core::application::ports::{EscolaRepository, TurmaRepository};
use escolas_core::domain::entities::{EscolaInput, TurmaInput};
use escolas_core::domain::value_objects::Turno;
use escolas_core::infrastructure::api::{ApiClient, EscolaApiRepository};
use escolas_core::infrastructure::mock_server::state::MockState;
use escolas_core::infrastructure::mock_server::MockServer;
use escolas_core::AppError;
use std::net::SocketAddr;

fn escola_valida(nome: &str) -> EscolaInput {
    EscolaInput {
        nome: nome.to_string(),
        endereco: "Rua das Flores 100".to_string(),
        telefone: None,
        email: None,
    }
}

#[tokio::test]
async fn rejeita_escola_com_nome_curto_sem_criar_registro() {
    let server = iniciar_servidor().await;
    let (escolas, _) = repositorios(&server.base_url());

    let antes = escolas.get_all().await.unwrap().len();
    let err = escolas.create(&escola_valida("Sc")).await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Nome é obrigatório (mínimo 3 caracteres)");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(escolas.get_all().await.unwrap().len(), antes);

    server.stop().await;
}

#[tokio::test]
async fn criacao_e_busca_por_id_retornam_o_mesmo_registro() {
    let server = iniciar_servidor().await;
    let (escolas, _) = repositorios(&server.base_url());

    let criada = escolas.create(&escola_valida("Escola Teste")).await.unwrap();
    assert!(!criada.id.is_empty());
    assert!(criada.turmas.is_empty());

    let buscada = escolas.get_by_id(&criada.id).await.unwrap();
    assert_eq!(buscada, criada);

    server.stop().await;
}

#[tokio::test]
async fn turma_com_escola_inexistente_recebe_400() {
    let server = iniciar_servidor().await;
    let (_, turmas) = repositorios(&server.base_url());

    let antes = turmas.get_all().await.unwrap().len();
    let err = turmas
        .create(&TurmaInput {
            escola_id: "escola-fantasma".to_string(),
            nome: "1º Ano A".to_string(),
            turno: Turno::Matutino,
            ano_letivo: 2024,
            capacidade: None,
        })
        .await
        .unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Escola não encontrada");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(turmas.get_all().await.unwrap().len(), antes);

    server.stop().await;
}

#[tokio::test]
async fn excluir_escola_remove_turmas_em_cascata() {
    let server = iniciar_servidor().await;
    let (escolas, turmas) = repositorios(&server.base_url());

    // Seed school "1" owns t1, t2 and t3.
    assert!(turmas.get_by_id("t1").await.is_ok());
    escolas.delete("1").await.unwrap();

    for id in ["t1", "t2", "t3"] {
        let err = turmas.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, AppError::Api { status: 404, .. }), "{id} survived");
    }
    // Classes of other schools are untouched.
    assert!(turmas.get_by_id("t4").await.is_ok());

    server.stop().await;
}

#[tokio::test]
async fn listagem_ordena_por_nome_com_regras_de_localidade() {
    let server = MockServer::start_with(
        SocketAddr::from(([127, 0, 0, 1], 0)),
        MockState::empty(),
    )
    .await
    .unwrap();
    let (escolas, _) = repositorios(&server.base_url());

    escolas.create(&escola_valida("Beta")).await.unwrap();
    escolas.create(&escola_valida("Alfa")).await.unwrap();
    escolas.create(&escola_valida("árvore")).await.unwrap();

    let nomes: Vec<String> = escolas
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.nome)
        .collect();
    assert_eq!(nomes, vec!["Alfa", "árvore", "Beta"]);

    server.stop().await;
}

#[tokio::test]
async fn escola_inexistente_recebe_404() {
    let server = iniciar_servidor().await;
    let (escolas, _) = repositorios(&server.base_url());

    let err = escolas.get_by_id("nao-existe").await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Escola não encontrada");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    server.stop().await;
}

#[tokio::test]
async fn atualizacao_parcial_de_turma_preserva_campos_omitidos() {
    let server = iniciar_servidor().await;
    let (_, turmas) = repositorios(&server.base_url());

    let original = turmas.get_by_id("t1").await.unwrap();
    let atualizada = turmas
        .update(
            "t1",
            &escolas_core::domain::entities::TurmaPatch {
                nome: Some("5º Ano A Integral".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(atualizada.nome, "5º Ano A Integral");
    assert_eq!(atualizada.turno, original.turno);
    assert_eq!(atualizada.capacidade, original.capacidade);
    assert_eq!(atualizada.escola_id, original.escola_id);

    server.stop().await;
}

#[tokio::test]
async fn servidor_inacessivel_vira_erro_de_conexao() {
    // Bind-then-drop leaves a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cfg = config_para(&format!("http://{addr}/api"));
    let client = ApiClient::new(&cfg.api).unwrap();
    let escolas = EscolaApiRepository::new(client);

    let err = escolas.get_all().await.unwrap_err();
    assert!(err.is_connection());
    assert_eq!(err.to_string(), "Erro de conexão com o servidor");
}
