mod common;

use common::{config_para, iniciar_servidor};
use escolas_core::domain::entities::{EscolaInput, EscolaPatch};
use escolas_core::infrastructure::storage::MemoryStorage;
use escolas_core::AppState;
use std::sync::Arc;
use std::time::Duration;

async fn aguardar_fila_vazia(state: &AppState) {
    for _ in 0..100 {
        if state.offline.pending_count().await == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "pending queue never drained, {} left",
        state.offline.pending_count().await
    );
}

#[tokio::test]
async fn atualizacoes_enfileiradas_aplicam_em_ordem_e_a_ultima_vence() {
    let server = iniciar_servidor().await;
    let state = AppState::with_storage(
        config_para(&server.base_url()),
        Arc::new(MemoryStorage::new()),
    )
    .await
    .unwrap();

    state.escola_store.carregar_escolas().await;
    assert!(state.escola_store.erro().await.is_none());

    state.set_online(false);
    state
        .escola_store
        .atualizar_escola(
            "1",
            &EscolaPatch {
                nome: Some("Escola Interina".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    state
        .escola_store
        .atualizar_escola(
            "1",
            &EscolaPatch {
                nome: Some("Escola Final".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(state.offline.pending_count().await, 2);

    state.set_online(true);
    aguardar_fila_vazia(&state).await;

    let (escolas, _) = common::repositorios(&server.base_url());
    use escolas_core::application::ports::EscolaRepository;
    let no_servidor = escolas.get_by_id("1").await.unwrap();
    assert_eq!(no_servidor.nome, "Escola Final");

    server.stop().await;
}

#[tokio::test]
async fn criacao_offline_chega_ao_servidor_apos_reconectar() {
    let server = iniciar_servidor().await;
    let state = AppState::with_storage(
        config_para(&server.base_url()),
        Arc::new(MemoryStorage::new()),
    )
    .await
    .unwrap();

    state.set_online(false);
    let local = state
        .escola_store
        .criar_escola(&EscolaInput {
            nome: "Escola Criada Offline".to_string(),
            endereco: "Rua Nova, 42".to_string(),
            telefone: None,
            email: None,
        })
        .await
        .unwrap();
    // The optimistic copy is visible immediately.
    assert!(state
        .escola_store
        .escolas()
        .await
        .iter()
        .any(|e| e.id == local.id));
    assert_eq!(state.offline.pending_count().await, 1);

    state.set_online(true);
    aguardar_fila_vazia(&state).await;

    use escolas_core::application::ports::EscolaRepository;
    let (escolas, _) = common::repositorios(&server.base_url());
    let nomes: Vec<String> = escolas
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.nome)
        .collect();
    assert!(nomes.contains(&"Escola Criada Offline".to_string()));

    server.stop().await;
}

#[tokio::test]
async fn sincronizacao_offline_nao_toca_na_fila() {
    let server = iniciar_servidor().await;
    let state = AppState::with_storage(
        config_para(&server.base_url()),
        Arc::new(MemoryStorage::new()),
    )
    .await
    .unwrap();

    state.set_online(false);
    state
        .escola_store
        .criar_escola(&EscolaInput {
            nome: "Escola Pendente".to_string(),
            endereco: "Rua Parada, 7".to_string(),
            telefone: None,
            email: None,
        })
        .await
        .unwrap();

    let report = state.offline.sync_pending_actions().await;
    assert_eq!(report.synced_count, 0);
    assert_eq!(report.pending_count, 1);
    assert_eq!(state.offline.pending_count().await, 1);

    server.stop().await;
}

#[tokio::test]
async fn cache_serve_a_lista_quando_offline() {
    let server = iniciar_servidor().await;
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState::with_storage(config_para(&server.base_url()), storage.clone())
        .await
        .unwrap();

    state.escola_store.carregar_escolas().await;
    let online = state.escola_store.escolas().await;
    assert_eq!(online.len(), 3);

    // A fresh app over the same storage, but with no connectivity.
    drop(state);
    let state = AppState::with_storage(config_para(&server.base_url()), storage)
        .await
        .unwrap();
    state.set_online(false);
    state.escola_store.carregar_escolas().await;
    assert_eq!(state.escola_store.escolas().await, online);
    assert!(state.offline.last_sync().await.is_some());

    server.stop().await;
}
