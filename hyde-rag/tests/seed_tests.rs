//! Seeding a store from a manifest on disk.

use std::path::PathBuf;

use hyde_rag::seed::{INLINE_SOURCE, prepare_store, seed_if_empty};
use hyde_rag::{DocumentStore, InMemoryDocumentStore, SeedManifest};

/// A scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hyde-seed-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("docs")).unwrap();
    dir
}

#[tokio::test]
async fn loads_files_relative_to_manifest() {
    let dir = scratch_dir("relative");
    std::fs::write(dir.join("docs/meditation.txt"), "Meditation lowers cortisol.").unwrap();
    std::fs::write(
        dir.join("documents.json"),
        r#"[{"file": "docs/meditation.txt"}, {"content": "Pancakes are ancient."}]"#,
    )
    .unwrap();

    let manifest = SeedManifest::load(dir.join("documents.json")).await.unwrap();
    let store = InMemoryDocumentStore::new();
    assert_eq!(seed_if_empty(&store, &manifest).await.unwrap(), 2);

    let docs = store.all().await.unwrap();
    assert_eq!(docs[0].id, "1");
    assert_eq!(docs[0].content, "Meditation lowers cortisol.");
    assert_eq!(docs[0].source, "docs/meditation.txt");
    assert_eq!(docs[1].id, "2");
    assert_eq!(docs[1].source, INLINE_SOURCE);

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn erase_then_reseed_replaces_documents() {
    let dir = scratch_dir("reseed");
    std::fs::write(dir.join("documents.json"), r#"[{"content": "fresh"}]"#).unwrap();
    let manifest = SeedManifest::load(dir.join("documents.json")).await.unwrap();

    let store = InMemoryDocumentStore::new();
    store.add(hyde_rag::Document::new("1", "stale", INLINE_SOURCE)).await.unwrap();

    // without erase, the populated store is left alone
    prepare_store(&store, false).await.unwrap();
    assert_eq!(seed_if_empty(&store, &manifest).await.unwrap(), 0);
    assert_eq!(store.all().await.unwrap()[0].content, "stale");

    prepare_store(&store, true).await.unwrap();
    assert_eq!(seed_if_empty(&store, &manifest).await.unwrap(), 1);
    assert_eq!(store.all().await.unwrap()[0].content, "fresh");

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn missing_manifest_is_reported_with_path() {
    let err = SeedManifest::load("/nonexistent/documents.json").await.unwrap_err();
    assert!(err.to_string().contains("/nonexistent/documents.json"));
}
