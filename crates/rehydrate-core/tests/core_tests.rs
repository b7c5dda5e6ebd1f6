use serde_json::json;

use rehydrate_core::logging;
use rehydrate_core::types::{Backing, EntityType, SearchResponse};

#[test]
fn search_response_keeps_hit_order() {
    let response: SearchResponse = serde_json::from_value(json!({
        "took_ms": 3,
        "total_hits": 3,
        "hits": [
            { "_index": "a", "_type": "foo", "_id": "2" },
            { "_index": "b", "_type": "bar", "_id": "5" },
            { "_index": "a", "_type": "foo", "_id": "1" }
        ]
    }))
    .expect("response");

    let ids: Vec<&str> = response.hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["2", "5", "1"], "hits keep engine relevance order");
    assert!(response.hits.iter().all(|h| h.source.is_null()));
}

#[test]
fn entity_type_round_trips_through_json() {
    let entity = EntityType::new("Note", "notes", "note", Backing::Document { collection: "notes".into() });
    let value = serde_json::to_value(&entity).expect("serialize");
    assert_eq!(value["backing"]["kind"], "document");
    let back: EntityType = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, entity);
}

#[test]
fn logging_init_is_idempotent() {
    logging::init();
    logging::init();
    tracing::info!("logging initialised twice without panicking");
}
