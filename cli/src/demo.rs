//! Offline store seeded with a sample user, for `--demo`.

use serde_json::json;
use uuid::Uuid;

use pocketbook::model::{BALANCES_TABLE, ITEMS_TABLE, Session, SessionUser, UserId};
use pocketbook::store::memory::MemoryStore;

pub fn demo_store() -> MemoryStore {
    let user_id = UserId(Uuid::new_v4());
    let store = MemoryStore::with_session(Session {
        access_token: "demo".to_owned(),
        user: SessionUser { id: user_id, email: Some("demo@pocketbook.local".to_owned()) },
    });

    // a single balance, so the items view has a default to fund against
    store.seed(BALANCES_TABLE, json!({"id": 1, "user_id": user_id, "name": "Checking", "amount": 1240.5}));
    for (name, price, priority) in [("Road bike", 1899.0, 1), ("Desk lamp", 45.99, 2), ("Headphones", 349.0, 2)] {
        store.seed(
            ITEMS_TABLE,
            json!({"user_id": user_id, "name": name, "price": price, "image": "", "priority": priority}),
        );
    }
    store
}
