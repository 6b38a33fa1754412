//! Test server harness.

use std::sync::Arc;

use axum_test::TestServer;
use helios_sorter::prelude::*;
use helios_sorter_rest::{AppState, ServerConfig, create_app_with_state};
use serde_json::json;

/// A running test server plus handles on its shared state.
pub struct TestHarness {
    pub server: TestServer,
    pub sessions: MemorySessionStore,
}

/// Creates a test server over the seeded `items` collection.
///
/// Pages hold two ids unless the config says otherwise.
pub fn create_test_server(config: ServerConfig) -> TestHarness {
    let repository = Arc::new(seeded_repository());
    let sessions = MemorySessionStore::new();

    let state = AppState::with_sessions(repository, Arc::new(sessions.clone()), config);
    let app = create_app_with_state(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestHarness { server, sessions }
}

/// Five items; `d` has no price.
///
/// - price desc: e, a, c, b, d
/// - name asc: e, b, a, d, c
pub fn seeded_repository() -> InMemoryRepository {
    let repository = InMemoryRepository::new();
    repository
        .insert_all(
            "items",
            vec![
                json!({ "_id": "a", "name": "Chair", "price": 30 }),
                json!({ "_id": "b", "name": "Bed", "price": 10 }),
                json!({ "_id": "c", "name": "Lamp", "price": 20 }),
                json!({ "_id": "d", "name": "Desk" }),
                json!({ "_id": "e", "name": "Armchair", "price": 50 }),
            ],
        )
        .expect("seed documents have ids");
    repository.create_collection("empty");
    repository
}
