use folio::Services;
use folio::config::{Config, SourceConfig};
use folio::error::ErrorKind;
use folio::session::{Role, Theme, keys};
use std::path::Path;
use std::sync::{Arc, Mutex};

fn catalog_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data/books.json"),
        r#"[{"title": "Kindred", "author": "Octavia E. Butler"}, {"title": "Dawn", "author": "Octavia E. Butler"}]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("data/series.json"), r#"[{"title": "Xenogenesis"}]"#).unwrap();
    dir
}

fn config(root: &Path, state: &Path) -> Config {
    let mut config = Config::default();
    config.catalog.source = SourceConfig::Local { root: root.to_path_buf() };
    config.state.path = state.to_path_buf();
    config
}

#[tokio::test]
async fn test_from_config_loads_local_catalog() {
    let catalog = catalog_dir();
    let state = tempfile::tempdir().unwrap();
    let services = Services::from_config(&config(catalog.path(), &state.path().join("state.json"))).unwrap();

    assert!(!services.catalog.is_loaded());
    services.catalog.ensure_loaded().await.unwrap();
    assert_eq!(services.catalog.books().len(), 2);
    assert_eq!(services.catalog.authors()[0].book_count, 2);
    assert_eq!(services.catalog.series()[0].title, "Xenogenesis");
}

#[test]
fn test_state_survives_restart() {
    let catalog = catalog_dir();
    let state = tempfile::tempdir().unwrap();
    let config = config(catalog.path(), &state.path().join("nested/state.json"));

    let mut services = Services::from_config(&config).unwrap();
    services.roles.toggle();
    services.themes.toggle();
    services.history.add("octavia").unwrap();
    services.filters.select_language("English").unwrap();
    drop(services);

    let services = Services::from_config(&config).unwrap();
    assert_eq!(services.roles.role(), Role::Librarian);
    assert_eq!(services.themes.theme(), Theme::Dark);
    assert_eq!(services.history.list(), ["octavia"]);
    assert_eq!(services.filters.selection().language.as_deref(), Some("English"));
}

#[test]
fn test_read_only_state_is_not_written() {
    let catalog = catalog_dir();
    let state = tempfile::tempdir().unwrap();
    let path = state.path().join("state.json");
    std::fs::write(&path, format!(r#"{{"{}": "librarian"}}"#, keys::USER_ROLE)).unwrap();
    let mut config = config(catalog.path(), &path);
    config.state.read_only = true;

    let services = Services::from_config(&config).unwrap();
    assert!(services.roles.is_librarian());
    services.roles.toggle();
    services.history.add("ignored").unwrap();
    assert!(!services.roles.is_librarian());

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("librarian"));
    assert!(!on_disk.contains(keys::PAST_SEARCHES));
}

#[test]
fn test_ephemeral_state_touches_no_files() {
    let catalog = catalog_dir();
    let state = tempfile::tempdir().unwrap();
    let path = state.path().join("state.json");
    let mut config = config(catalog.path(), &path);
    config.state.ephemeral = true;

    let services = Services::from_config(&config).unwrap();
    services.history.add("anything").unwrap();
    assert_eq!(services.history.list(), ["anything"]);
    assert!(!path.exists());
}

#[test]
fn test_history_capacity_from_config() {
    let catalog = catalog_dir();
    let mut config = config(catalog.path(), Path::new("unused.json"));
    config.state.ephemeral = true;
    config.history.capacity = 2;

    let services = Services::from_config(&config).unwrap();
    for query in ["a", "b", "c"] {
        services.history.add(query).unwrap();
    }
    assert_eq!(services.history.list(), ["c", "b"]);
}

#[test]
fn test_missing_catalog_root_fails() {
    let state = tempfile::tempdir().unwrap();
    let missing = state.path().join("no-such-dir");
    let mut config = config(&missing, Path::new("unused.json"));
    config.state.ephemeral = true;

    let err = Services::from_config(&config).err().unwrap();
    assert!(matches!(&*err, ErrorKind::Source));
}

#[cfg(not(feature = "http"))]
#[test]
fn test_http_source_needs_feature() {
    let mut config = Config::default();
    config.catalog.source = SourceConfig::Http { base_url: "https://example.org".to_string() };
    config.state.ephemeral = true;
    let err = Services::from_config(&config).err().unwrap();
    assert!(matches!(&*err, ErrorKind::HttpDisabled));
}

#[test]
fn test_role_broadcast_reaches_every_holder() {
    let catalog = catalog_dir();
    let mut config = config(catalog.path(), Path::new("unused.json"));
    config.state.ephemeral = true;
    let services = Services::from_config(&config).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let roles = Arc::clone(&services.roles);
    let _subscription = roles.subscribe(move |change| sink.lock().unwrap().push(change.value));

    services.roles.toggle();
    services.roles.toggle();
    assert_eq!(*seen.lock().unwrap(), [Role::Librarian, Role::Reader]);
}
