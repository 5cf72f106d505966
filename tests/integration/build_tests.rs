use sdl_docset::config::Config;
use sdl_docset::crawler::build_docset;
use sdl_docset::output::DocsetLayout;
use sdl_docset::storage::{EntryKind, IndexEntry, IndexStore, SqliteIndex};
use sdl_docset::DocsetError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock wiki
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.crawler.wait_secs = 0; // No surge protection on the mock
    config.crawler.user_agent = "TestDocset/1.0".to_string();
    config.docset.output_dir = output_dir.to_string_lossy().into_owned();
    config.docset.title = "Test API".to_string();
    config
}

/// Wraps content in a wiki page with the `#page` landmark
fn wiki_page(content: &str) -> String {
    format!(
        r#"<html><head><title>Wiki</title></head><body><div id="nav"><a href="/FrontPage">Front</a></div><div id="page">{}</div></body></html>"#,
        content
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves a wiki with one enum, one function and one category
async fn start_wiki() -> MockServer {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/CategoryAPI",
        wiki_page(
            r#"<h2>Enumerations</h2>
            <div class="searchresults"><a href="/SDL_Flag">SDL_Flag</a></div>
            <h2>Functions</h2>
            <div class="searchresults"><a href="/SDL_Init">SDL_Init</a></div>"#,
        ),
    )
    .await;

    mount_page(
        &server,
        "/SDL_Flag",
        wiki_page(
            r#"<h1>SDL_Flag</h1>
            <p>Pass to <a href="/SDL_Init#Remarks">SDL_Init</a>, see also <a href="/SDL_Missing">SDL_Missing</a>.</p>
            <hr><p>Edit this page <a href="/SDL_Flag?action=edit">edit</a></p>"#,
        ),
    )
    .await;

    mount_page(
        &server,
        "/SDL_Init",
        wiki_page(r#"<h1>SDL_Init</h1><p><a href="/CategoryInit">CategoryInit</a></p>"#),
    )
    .await;

    mount_page(
        &server,
        "/APIByCategory",
        wiki_page(
            r#"<table><tr><td><a href="/CategoryInit">Init</a></td><td><a href="https://www.libsdl.org/">SDL</a></td></tr></table>"#,
        ),
    )
    .await;

    mount_page(
        &server,
        "/CategoryInit",
        wiki_page(
            r#"<p>Initialization: <a href="/SDL_Init">SDL_Init</a></p><hr><p>CategoryCategory</p>"#,
        ),
    )
    .await;

    server
}

fn read_page(layout: &DocsetLayout, relative: &str) -> String {
    fs::read_to_string(layout.documents_dir().join(relative))
        .unwrap_or_else(|e| panic!("{} should exist: {}", relative, e))
}

/// Reads every file of the bundle, keyed by path relative to the root
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else if path.extension().map_or(true, |ext| ext != "dsidx") {
                let key = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                out.insert(key, fs::read(&path).unwrap());
            }
        }
    }

    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn index_entries(layout: &DocsetLayout) -> Vec<IndexEntry> {
    SqliteIndex::open(&layout.index_db_path())
        .unwrap()
        .entries()
        .unwrap()
}

#[tokio::test]
async fn test_full_build() {
    let server = start_wiki().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir.path().join("Test.docset"));

    let report = build_docset(&config).await.expect("build should succeed");

    assert_eq!(report.catalog.symbols, 2);
    assert_eq!(report.catalog.categories, 1);
    // index.html, SDL_Flag, SDL_Init and CategoryInit each gain one local link
    assert_eq!(report.relink.files_scanned, 4);
    assert_eq!(report.relink.files_changed, 4);
    assert_eq!(report.relink.links_rewritten, 4);

    let layout = DocsetLayout::new(dir.path().join("Test.docset"));
    assert_eq!(
        index_entries(&layout),
        vec![
            IndexEntry::new(0, "SDL_Flag", EntryKind::Enum, "SDL_Flag.html"),
            IndexEntry::new(1, "SDL_Init", EntryKind::Function, "SDL_Init.html"),
            IndexEntry::new(2, "Init", EntryKind::Category, "CategoryInit.html"),
        ]
    );

    assert!(layout.info_plist_path().is_file());
}

#[tokio::test]
async fn test_every_index_path_exists() {
    let server = start_wiki().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir.path().join("Test.docset"));

    build_docset(&config).await.unwrap();

    let layout = DocsetLayout::new(dir.path().join("Test.docset"));
    for entry in index_entries(&layout) {
        assert!(
            layout.documents_dir().join(&entry.path).is_file(),
            "{} should exist",
            entry.path
        );
    }
}

#[tokio::test]
async fn test_saved_pages_are_sanitized_and_relinked() {
    let server = start_wiki().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir.path().join("Test.docset"));

    build_docset(&config).await.unwrap();

    let layout = DocsetLayout::new(dir.path().join("Test.docset"));

    let flag = read_page(&layout, "Enum/SDL_Flag.html");
    assert!(flag.contains("<title>SDL_Flag</title>"));
    assert!(flag.contains(r#"href="../Function/SDL_Init.html#Remarks""#));
    // Lookup miss keeps the wiki link
    assert!(flag.contains(r#"href="/SDL_Missing""#));
    // Footer after the last rule is gone
    assert!(!flag.contains("Edit this page"));
    assert!(!flag.contains("<hr>"));
    // Navigation outside the landmark is not saved
    assert!(!flag.contains("FrontPage"));

    let init = read_page(&layout, "Function/SDL_Init.html");
    assert!(init.contains(r#"href="../Category/CategoryInit.html#""#));

    let category = read_page(&layout, "Category/CategoryInit.html");
    assert!(category.contains("<title>Init</title>"));
    assert!(category.contains(r#"href="../Function/SDL_Init.html#""#));
    assert!(!category.contains("CategoryCategory"));

    let root = read_page(&layout, "index.html");
    assert!(root.contains("<title>Test API</title>"));
    assert!(root.contains(r#"href="Category/CategoryInit.html#""#));
    assert!(root.contains(r#"href="https://www.libsdl.org/""#));
}

#[tokio::test]
async fn test_rebuild_is_idempotent() {
    let server = start_wiki().await;
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Test.docset");
    let config = create_test_config(&server.uri(), &root);

    build_docset(&config).await.unwrap();
    let first_files = snapshot(&root);
    let first_index = index_entries(&DocsetLayout::new(&root));

    build_docset(&config).await.unwrap();
    let second_files = snapshot(&root);
    let second_index = index_entries(&DocsetLayout::new(&root));

    assert_eq!(first_files, second_files);
    assert_eq!(first_index, second_index);
}

#[tokio::test]
async fn test_previous_output_is_cleared() {
    let server = start_wiki().await;
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Test.docset");
    let layout = DocsetLayout::new(&root);

    layout.prepare().unwrap();
    layout
        .write_page("Function/SDL_Removed.html", "SDL_Removed", "")
        .unwrap();
    {
        let mut index = SqliteIndex::open(&layout.index_db_path()).unwrap();
        index
            .insert(&IndexEntry::new(
                0,
                "SDL_Removed",
                EntryKind::Function,
                "SDL_Removed.html",
            ))
            .unwrap();
    }

    build_docset(&create_test_config(&server.uri(), &root))
        .await
        .unwrap();

    assert!(!layout.kind_dir(EntryKind::Function).join("SDL_Removed.html").exists());
    let index = SqliteIndex::open(&layout.index_db_path()).unwrap();
    assert!(index.find_by_name("SDL_Removed").unwrap().is_none());
    assert_eq!(index.entries().unwrap().len(), 3);
}

#[tokio::test]
async fn test_single_enumeration() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/CategoryAPI",
        wiki_page(
            r#"<h2>Enumerations</h2><div class="searchresults"><a href="/SDL_Flag">SDL_Flag</a></div>"#,
        ),
    )
    .await;
    mount_page(&server, "/SDL_Flag", wiki_page("<p>flags</p>")).await;
    mount_page(&server, "/APIByCategory", wiki_page("")).await;

    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Test.docset");
    build_docset(&create_test_config(&server.uri(), &root))
        .await
        .unwrap();

    let layout = DocsetLayout::new(&root);
    let page = read_page(&layout, "Enum/SDL_Flag.html");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>SDL_Flag</title>"));
    assert!(page.contains("<p>flags</p>"));

    let entries = index_entries(&layout);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "SDL_Flag");
    assert_eq!(entries[0].kind, EntryKind::Enum);
    assert_eq!(entries[0].path, "Enum/SDL_Flag.html");
}

#[tokio::test]
async fn test_unknown_heading_goes_to_category() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/CategoryAPI",
        wiki_page(
            r#"<h2>Widgets</h2><div class="searchresults"><a href="/SDL_Widget">SDL_Widget</a></div>"#,
        ),
    )
    .await;
    mount_page(&server, "/SDL_Widget", wiki_page("<p>widget</p>")).await;
    mount_page(&server, "/APIByCategory", wiki_page("")).await;

    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Test.docset");
    build_docset(&create_test_config(&server.uri(), &root))
        .await
        .unwrap();

    let layout = DocsetLayout::new(&root);
    assert!(layout
        .kind_dir(EntryKind::Category)
        .join("SDL_Widget.html")
        .is_file());
    assert_eq!(index_entries(&layout)[0].path, "Category/SDL_Widget.html");
}

#[tokio::test]
async fn test_missing_landmark_aborts_build() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/CategoryAPI",
        wiki_page(
            r#"<h2>Functions</h2><div class="searchresults"><a href="/SDL_Init">SDL_Init</a><a href="/SDL_Quit">SDL_Quit</a></div>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/SDL_Init",
        "<html><body><p>Checking your browser...</p></body></html>".to_string(),
    )
    .await;
    // Never reached
    Mock::given(method("GET"))
        .and(path("/SDL_Quit"))
        .respond_with(ResponseTemplate::new(200).set_body_string(wiki_page("quit")))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let result = build_docset(&create_test_config(&server.uri(), &dir.path().join("Test.docset"))).await;

    match result {
        Err(DocsetError::MissingLandmark { url, selector }) => {
            assert!(url.ends_with("/SDL_Init"));
            assert_eq!(selector, "#page");
        }
        other => panic!("expected MissingLandmark, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_aborts_build() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/CategoryAPI"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let result = build_docset(&create_test_config(&server.uri(), &dir.path().join("Test.docset"))).await;

    assert!(matches!(
        result,
        Err(DocsetError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_wait_between_requests() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/CategoryAPI",
        wiki_page(
            r#"<h2>Functions</h2><div class="searchresults"><a href="/SDL_Init">SDL_Init</a></div>"#,
        ),
    )
    .await;
    mount_page(&server, "/SDL_Init", wiki_page("<p>init</p>")).await;
    mount_page(
        &server,
        "/APIByCategory",
        wiki_page(r#"<table><tr><td><a href="/CategoryInit">Init</a></td></tr></table>"#),
    )
    .await;
    mount_page(&server, "/CategoryInit", wiki_page("<p>init category</p>")).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), &dir.path().join("Test.docset"));
    config.crawler.wait_secs = 1;

    let start = Instant::now();
    let report = build_docset(&config).await.unwrap();

    assert_eq!(report.catalog.symbols, 1);
    assert_eq!(report.catalog.categories, 1);
    // One wait after the symbol page and one after the category page
    assert!(start.elapsed().as_secs_f64() >= 2.0);
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_output() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Test.docset");
    let mut config = create_test_config(&server.uri(), &root);
    config.source.landmark_selector = "div[[".to_string();

    let result = build_docset(&config).await;

    assert!(matches!(result, Err(DocsetError::Config(_))));
    assert!(!root.exists());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
