use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use subdomain_redirect::application::services::{DEFAULT_MAX_ATTEMPTS, TokenService};
use subdomain_redirect::domain::repositories::RedirectRepository;
use subdomain_redirect::domain::token::derive_token;
use subdomain_redirect::infrastructure::persistence::PgRedirectRepository;

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_get(pool: PgPool) {
    let repo = PgRedirectRepository::new(Arc::new(pool));

    let inserted = repo
        .insert_if_absent("abc123", "https://example.com")
        .await
        .unwrap();
    assert!(inserted);

    let record = repo.get("abc123").await.unwrap().unwrap();
    assert_eq!(record.token, "abc123");
    assert_eq!(record.target_url, "https://example.com");
    assert!(record.created_at > 0);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_insert_if_absent_keeps_first_writer(pool: PgPool) {
    let repo = PgRedirectRepository::new(Arc::new(pool));

    assert!(repo.insert_if_absent("abc123", "https://first.example").await.unwrap());
    assert!(!repo.insert_if_absent("abc123", "https://second.example").await.unwrap());

    let record = repo.get("abc123").await.unwrap().unwrap();
    assert_eq!(record.target_url, "https://first.example");
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_exists(pool: PgPool) {
    let repo = PgRedirectRepository::new(Arc::new(pool));

    assert!(!repo.exists("abc123").await.unwrap());
    repo.insert_if_absent("abc123", "https://example.com")
        .await
        .unwrap();
    assert!(repo.exists("abc123").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_get_not_found(pool: PgPool) {
    let repo = PgRedirectRepository::new(Arc::new(pool));

    assert!(repo.get("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_token_length_is_constrained(pool: PgPool) {
    let repo = PgRedirectRepository::new(Arc::new(pool));

    let result = repo
        .insert_if_absent("abcdefghijklm", "https://example.com")
        .await;
    assert!(result.is_err());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_health_check(pool: PgPool) {
    let repo = PgRedirectRepository::new(Arc::new(pool));

    assert!(repo.health_check().await.is_ok());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_forced_collision_resolved_with_salt(pool: PgPool) {
    let url = "https://example.com/page";
    let repo = Arc::new(PgRedirectRepository::new(Arc::new(pool)));
    repo.insert_if_absent(&derive_token(url, ""), "https://squatter.example")
        .await
        .unwrap();

    let service = TokenService::new(repo.clone(), DEFAULT_MAX_ATTEMPTS);
    let token = service.generate_and_register(url).await.unwrap();

    assert_ne!(token, derive_token(url, ""));
    assert_eq!(repo.get(&token).await.unwrap().unwrap().target_url, url);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_registrations(pool: PgPool) {
    const K: usize = 8;
    let url = "https://example.com/page";

    let repo = Arc::new(PgRedirectRepository::new(Arc::new(pool)));
    let service = Arc::new(TokenService::new(repo.clone(), DEFAULT_MAX_ATTEMPTS));

    let handles: Vec<_> = (0..K)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.generate_and_register(url).await })
        })
        .collect();

    let mut tokens = HashSet::new();
    for handle in handles {
        tokens.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(tokens.len(), K);
    assert_eq!(repo.count().await.unwrap(), K as i64);
}
