use std::path::Path;
use std::time::{Duration, SystemTime};

use quill::{Article, ArticleStore, Error};

fn set_mtime(dir: &Path, slug: &str, secs_ago: u64) {
    let file = std::fs::File::options()
        .write(true)
        .open(dir.join(format!("{slug}.json")))
        .expect("open article file");
    file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
        .expect("set mtime");
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());

    let article = store.create("Hello, World!", "first post\nsecond line");
    store.save(&article).await.expect("save");

    let loaded = store.load("hello-world").await.expect("load");
    assert_eq!(loaded.title, "Hello, World!");
    assert_eq!(loaded.body, "first post\nsecond line");
    assert_eq!(loaded, article);
}

#[tokio::test]
async fn files_use_capitalised_field_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());
    store.save(&Article::new("On disk", "b")).await.expect("save");

    let raw = std::fs::read_to_string(dir.path().join("on-disk.json")).expect("read");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["Title"], "On disk");
    assert_eq!(json["Body"], "b");
    assert_eq!(json["Slug"], "on-disk");
}

#[tokio::test]
async fn loading_unknown_slug_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());

    let err = store.load("nope").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(ref slug) if slug == "nope"), "{err:?}");
}

#[tokio::test]
async fn slugs_with_separators_are_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path().join("articles"));
    std::fs::create_dir(dir.path().join("articles")).expect("mkdir");
    std::fs::write(dir.path().join("outside.json"), r#"{"Title":"x","Body":"","Slug":"x"}"#)
        .expect("write");

    let err = store.load("../outside").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("broken.json"), "{ not json").expect("write");
    let store = ArticleStore::new(dir.path());

    let err = store.load("broken").await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn list_all_orders_by_modification_time_descending() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());

    for title in ["Alpha", "Beta", "Gamma"] {
        store.save(&Article::new(title, "")).await.expect("save");
    }
    // Creation order is alpha, beta, gamma; modification order is not.
    set_mtime(dir.path(), "alpha", 10);
    set_mtime(dir.path(), "beta", 300);
    set_mtime(dir.path(), "gamma", 120);

    let slugs: Vec<_> = store.list_all().await.expect("list")
        .into_iter()
        .map(|a| a.slug)
        .collect();
    assert_eq!(slugs, ["alpha", "gamma", "beta"]);
}

#[tokio::test]
async fn list_all_ignores_non_article_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());
    store.save(&Article::new("Only one", "")).await.expect("save");
    std::fs::write(dir.path().join("notes.txt"), "not an article").expect("write");
    std::fs::create_dir(dir.path().join("drafts.json")).expect("mkdir");

    let all = store.list_all().await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].slug, "only-one");
}

#[tokio::test]
async fn list_all_fails_fast_on_bad_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());
    store.save(&Article::new("Good", "")).await.expect("save");
    std::fs::write(dir.path().join("bad.json"), "garbage").expect("write");

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn list_all_on_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path().join("missing"));

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err:?}");
}

#[tokio::test]
async fn update_keeps_slug_and_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());
    let article = store.create("Original title", "v1");
    store.save(&article).await.expect("save");

    let mut loaded = store.load("original-title").await.expect("load");
    loaded.update("A brand new title", "v2");
    store.save(&loaded).await.expect("save again");

    let files: Vec<_> = std::fs::read_dir(dir.path()).expect("read_dir").collect();
    assert_eq!(files.len(), 1);

    let reloaded = store.load("original-title").await.expect("reload");
    assert_eq!(reloaded.title, "A brand new title");
    assert_eq!(reloaded.body, "v2");
    assert_eq!(reloaded.slug, "original-title");
}

#[tokio::test]
async fn saving_same_slug_overwrites() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());
    store.save(&Article::new("Same", "first")).await.expect("save");
    store.save(&Article::new("same!", "second")).await.expect("save");

    let all = store.list_all().await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].body, "second");
}

#[tokio::test]
async fn empty_title_gets_empty_slug() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArticleStore::new(dir.path());
    let article = store.create("?!", "body");
    assert_eq!(article.slug, "");

    store.save(&article).await.expect("save");
    assert!(dir.path().join(".json").is_file());
    assert_eq!(store.load("").await.expect("load").body, "body");
    assert_eq!(store.list_all().await.expect("list").len(), 1);
}

#[tokio::test]
async fn open_creates_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a/b/articles");
    let store = ArticleStore::open(&nested).await.expect("open");

    assert!(nested.is_dir());
    assert!(store.list_all().await.expect("list").is_empty());
}
