//! Post store selection: `REPOSITORY_TYPE` parsing, env fallbacks and
//! `repository.toml` files.

mod support;

use board::api::{PageRequest, PostId};
use board::db::{RepositoryError, RepositoryFactory, RepositoryType};

const STORE_VARS_CLEARED: [(&str, Option<&str>); 3] = [
    ("REPOSITORY_TYPE", None),
    ("DATABASE_URL", None),
    ("PG_DATABASE_URL", None),
];

#[test]
fn test_store_names_parse_in_any_case() {
    for name in ["postgres", "POSTGRES", "pg", " Pg "] {
        assert_eq!(name.parse::<RepositoryType>().unwrap(), RepositoryType::Postgres);
    }
    for name in ["local", "LOCAL"] {
        assert_eq!(name.parse::<RepositoryType>().unwrap(), RepositoryType::Local);
    }
}

#[test]
fn test_unknown_store_name_is_a_configuration_error() {
    let Err(err) = "mongo".parse::<RepositoryType>() else {
        panic!("'mongo' is not a post store");
    };
    assert!(matches!(err, RepositoryError::Configuration(_)));
    assert!(err.to_string().contains("unknown post store 'mongo'"));
}

#[test]
fn test_no_store_variables_selects_local() {
    support::with_scoped_env(&STORE_VARS_CLEARED, || {
        assert_eq!(RepositoryType::from_env().unwrap(), RepositoryType::Local);
    });
}

#[test]
fn test_database_url_selects_postgres() {
    for url_var in ["DATABASE_URL", "PG_DATABASE_URL"] {
        support::with_scoped_env(
            &[
                ("REPOSITORY_TYPE", None),
                ("DATABASE_URL", None),
                ("PG_DATABASE_URL", None),
                (url_var, Some("postgres://localhost/board")),
            ],
            || {
                assert_eq!(RepositoryType::from_env().unwrap(), RepositoryType::Postgres);
            },
        );
    }
}

#[test]
fn test_explicit_store_type_beats_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/board")),
        ],
        || {
            assert_eq!(RepositoryType::from_env().unwrap(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_misspelled_store_type_is_rejected() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("postgress")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            let Err(err) = RepositoryType::from_env() else {
                panic!("a misspelled REPOSITORY_TYPE must not fall back to a default store");
            };
            assert!(matches!(err, RepositoryError::Configuration(_)));
        },
    );
}

#[test]
fn test_factory_from_env_rejects_misspelled_store_type() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("memory"))], || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(RepositoryFactory::from_env());
        assert!(matches!(result.err(), Some(RepositoryError::Configuration(_))));
    });
}

#[test]
fn test_factory_from_env_builds_empty_local_store() {
    support::with_scoped_env(&STORE_VARS_CLEARED, || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = RepositoryFactory::from_env().await.unwrap();
            assert!(store.health_check().await.unwrap());
            assert!(store.find_by_id(PostId(1)).await.unwrap().is_none());
        });
    });
}

#[tokio::test]
async fn test_postgres_without_settings_is_rejected() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    let Err(err) = result else {
        panic!("postgres needs connection settings");
    };
    assert!(err.to_string().contains("without settings"));
}

#[tokio::test]
async fn test_local_store_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(&path, "[store]\nbackend = \"local\"\n").unwrap();

    let store = RepositoryFactory::from_config_file(&path).await.unwrap();
    assert!(store.health_check().await.unwrap());
    assert_eq!(store.find_all(PageRequest::of(0, 20)).await.unwrap().total_elements, 0);
}

#[tokio::test]
async fn test_config_file_with_unknown_backend_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(&path, "[store]\nbackend = \"sqlite\"\n").unwrap();

    let result = RepositoryFactory::from_config_file(&path).await;
    assert!(matches!(result.err(), Some(RepositoryError::Configuration(_))));
}

#[tokio::test]
async fn test_missing_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = RepositoryFactory::from_config_file(dir.path().join("absent.toml")).await;
    let Err(err) = result else {
        panic!("absent.toml does not exist");
    };
    assert!(err.to_string().contains("cannot read"));
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_postgres_config_file_needs_postgres_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(
        &path,
        "[store]\nbackend = \"postgres\"\n\n[store.postgres]\nurl = \"postgres://localhost/board\"\n",
    )
    .unwrap();

    let result = RepositoryFactory::from_config_file(&path).await;
    let Err(err) = result else {
        panic!("postgres store is not compiled in");
    };
    assert!(err.to_string().contains("built without"));
}
