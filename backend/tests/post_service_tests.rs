//! Service-level tests for the post lifecycle.
//!
//! These tests run the post service against the in-memory repository and
//! check the observable create/read/update/delete/paginate contract.

use std::collections::HashSet;
use std::sync::Arc;

use board::api::{CreatePostRequest, PageRequest, PostId, UpdatePostRequest};
use board::db::repositories::LocalRepository;
use board::services::{PostService, PostServiceImpl, ServiceError};

fn setup() -> (LocalRepository, PostServiceImpl) {
    let repo = LocalRepository::new();
    let service = PostServiceImpl::new(Arc::new(repo.clone()));
    (repo, service)
}

async fn create_n(service: &PostServiceImpl, n: usize) -> Vec<PostId> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let response = service
            .create_post(CreatePostRequest::new(
                format!("title {}", i),
                format!("content {}", i),
            ))
            .await
            .unwrap();
        ids.push(response.post_id);
    }
    ids
}

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let (_, service) = setup();

    let created = service
        .create_post(CreatePostRequest::new("테스트 제목", "테스트 내용"))
        .await
        .unwrap();
    assert_eq!(created.post_id, PostId(1));
    assert_eq!(created.title, "테스트 제목");
    assert_eq!(created.content, "테스트 내용");

    let read = service.read_post_by_id(PostId(1)).await.unwrap();
    assert_eq!(read.post_id, PostId(1));
    assert_eq!(read.title, "테스트 제목");
    assert_eq!(read.content, "테스트 내용");

    let updated = service
        .update_post(PostId(1), UpdatePostRequest::new("수정 제목", "수정 내용"))
        .await
        .unwrap();
    assert_eq!(updated.post_id, PostId(1));
    assert_eq!(updated.title, "수정 제목");
    assert_eq!(updated.content, "수정 내용");

    let deleted = service.delete_post(PostId(1)).await.unwrap();
    assert_eq!(deleted.post_id, PostId(1));

    let err = service.read_post_by_id(PostId(1)).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let (_, service) = setup();
    let inputs = [
        ("", ""),
        ("plain", "text"),
        ("줄바꿈\n제목", "내용 with \"quotes\""),
        ("emoji 👹", "tab\tseparated"),
    ];

    for (title, content) in inputs {
        let created = service
            .create_post(CreatePostRequest::new(title, content))
            .await
            .unwrap();
        let read = service.read_post_by_id(created.post_id).await.unwrap();
        assert_eq!(read.title, title);
        assert_eq!(read.content, content);
    }
}

#[tokio::test]
async fn test_read_unknown_id_does_not_fabricate_post() {
    let (repo, service) = setup();
    create_n(&service, 2).await;

    let err = service.read_post_by_id(PostId(99)).await.unwrap_err();
    match err {
        ServiceError::NotFound(message) => assert!(message.contains("99")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(repo.post_count(), 2);
}

#[tokio::test]
async fn test_update_keeps_id_and_replaces_fields() {
    let (_, service) = setup();
    let ids = create_n(&service, 3).await;

    let updated = service
        .update_post(ids[1], UpdatePostRequest::new("new title", "new content"))
        .await
        .unwrap();
    assert_eq!(updated.post_id, ids[1]);

    let read = service.read_post_by_id(ids[1]).await.unwrap();
    assert_eq!(read.post_id, ids[1]);
    assert_eq!(read.title, "new title");
    assert_eq!(read.content, "new content");

    // Neighbours are untouched.
    let other = service.read_post_by_id(ids[0]).await.unwrap();
    assert_eq!(other.title, "title 0");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (_, service) = setup();
    let err = service
        .update_post(PostId(1), UpdatePostRequest::new("t", "c"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_is_terminal() {
    let (repo, service) = setup();
    let ids = create_n(&service, 2).await;

    let deleted = service.delete_post(ids[0]).await.unwrap();
    assert_eq!(deleted.post_id, ids[0]);
    assert_eq!(repo.post_count(), 1);

    assert!(matches!(
        service.read_post_by_id(ids[0]).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_post(ids[0]).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service
            .update_post(ids[0], UpdatePostRequest::new("t", "c"))
            .await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (_, service) = setup();
    let ids = create_n(&service, 3).await;
    service.delete_post(ids[2]).await.unwrap();

    let next = service
        .create_post(CreatePostRequest::new("again", "again"))
        .await
        .unwrap();
    assert!(!ids.contains(&next.post_id));
    assert_eq!(next.post_id, PostId(4));
}

#[tokio::test]
async fn test_pages_cover_every_post_exactly_once() {
    let (_, service) = setup();
    let ids = create_n(&service, 11).await;
    let size = 4;

    let mut seen = Vec::new();
    for page in 0..3 {
        let result = service
            .read_all_posts(PageRequest::of(page, size))
            .await
            .unwrap();
        assert_eq!(result.total_elements, 11);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.number, page);
        seen.extend(result.content.into_iter().map(|p| p.post_id));
    }

    assert_eq!(seen, ids);
}

#[tokio::test]
async fn test_page_beyond_last_is_empty_not_error() {
    let (_, service) = setup();
    create_n(&service, 5).await;

    let page = service
        .read_all_posts(PageRequest::of(10, 5))
        .await
        .unwrap();
    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 1);
    assert!(page.last);
}

#[tokio::test]
async fn test_empty_store_page() {
    let (_, service) = setup();
    for page in [0, 1, 7] {
        let result = service
            .read_all_posts(PageRequest::of(page, 20))
            .await
            .unwrap();
        assert!(result.content.is_empty());
        assert_eq!(result.total_elements, 0);
        assert!(result.empty);
    }
}

#[tokio::test]
async fn test_page_content_mirrors_posts() {
    let (_, service) = setup();
    service
        .create_post(CreatePostRequest::new("테스트 제목", "테스트 내용"))
        .await
        .unwrap();
    service
        .create_post(CreatePostRequest::new(
            "저장되어 있던 테스트 제목",
            "저장되어 있던 테스트 내용",
        ))
        .await
        .unwrap();

    let page = service.read_all_posts(PageRequest::of(0, 5)).await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].title, "테스트 제목");
    assert_eq!(page.content[0].content, "테스트 내용");
    assert_eq!(page.content[1].title, "저장되어 있던 테스트 제목");
    assert_eq!(page.content[1].content, "저장되어 있던 테스트 내용");
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (repo, service) = setup();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create_post(CreatePostRequest::new(format!("t{}", i), "c"))
                    .await
                    .unwrap()
                    .post_id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 16);
    assert_eq!(repo.post_count(), 16);
}

#[tokio::test]
async fn test_unhealthy_store_surfaces_repository_error() {
    let (repo, service) = setup();
    repo.set_healthy(false);

    let err = service
        .create_post(CreatePostRequest::new("t", "c"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));
}
