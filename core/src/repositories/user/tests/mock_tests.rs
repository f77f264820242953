//! Unit tests for mock user repository

use crate::domain::entities::user::{
    AgentProfile, NewUser, Profile, UserChanges, UserRole,
};
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

fn new_user(email: &str, role: UserRole) -> NewUser {
    NewUser::new(email.to_string(), "hash".to_string(), role)
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();

    let created = repo.create(new_user("a@x.com", UserRole::Agent)).await.unwrap();
    assert_eq!(created.id, 1);
    assert!(!created.is_deleted());

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found.unwrap().email, "a@x.com");

    let second = repo.create(new_user("b@x.com", UserRole::Owner)).await.unwrap();
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_mock_repository_duplicate_email() {
    let repo = MockUserRepository::new();

    repo.create(new_user("a@x.com", UserRole::Agent)).await.unwrap();
    let result = repo.create(new_user("a@x.com", UserRole::Owner)).await;

    assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    assert!(repo.exists_by_email("a@x.com").await.unwrap());
    assert!(!repo.exists_by_email("b@x.com").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_soft_delete_hides_user() {
    let repo = MockUserRepository::new();
    let user = repo.create(new_user("a@x.com", UserRole::Agent)).await.unwrap();

    assert!(repo.soft_delete(user.id).await.unwrap());
    assert!(!repo.soft_delete(user.id).await.unwrap());

    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    // the email stays reserved
    assert!(repo.exists_by_email("a@x.com").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_update() {
    let repo = MockUserRepository::new();
    let user = repo.create(new_user("a@x.com", UserRole::Agent)).await.unwrap();
    repo.create(new_user("b@x.com", UserRole::Agent)).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UserChanges {
                name: Some("Park".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Park"));
    assert_eq!(updated.email, "a@x.com");

    let taken = repo
        .update(
            user.id,
            UserChanges {
                email: Some("b@x.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(taken.unwrap_err(), DomainError::Conflict { .. }));

    let missing = repo.update(99, UserChanges::default()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_mock_repository_profile_roundtrip() {
    let repo = MockUserRepository::new();
    let user = repo.create(new_user("a@x.com", UserRole::Agent)).await.unwrap();
    assert!(repo.find_profile(user.id).await.unwrap().is_none());

    let profile = Profile::Agent(AgentProfile {
        agency_name: Some("Gangnam Realty".to_string()),
        ..Default::default()
    });
    repo.save_profile(user.id, profile.clone()).await.unwrap();

    assert_eq!(repo.find_profile(user.id).await.unwrap(), Some(profile.clone()));
    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(found.profile, Some(profile));
}

#[tokio::test]
async fn test_mock_repository_profile_requires_active_user() {
    let repo = MockUserRepository::new();
    let result = repo
        .save_profile(42, Profile::Agent(AgentProfile::default()))
        .await;
    assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
}
