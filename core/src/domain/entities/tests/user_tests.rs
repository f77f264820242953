//! Unit tests for user entity

use chrono::Utc;

use crate::domain::entities::lifecycle::RecordState;
use crate::domain::entities::user::{
    AgentProfile, NewUser, OwnerProfile, Profile, UserChanges, UserRole,
};
use crate::errors::ValidationError;

fn agent() -> crate::domain::entities::user::User {
    NewUser::new("a@x.com".to_string(), "hash".to_string(), UserRole::Agent)
        .with_name(Some("Kim".to_string()))
        .into_user(1, Utc::now())
}

#[test]
fn test_new_user_materializes_active() {
    let user = agent();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.name.as_deref(), Some("Kim"));
    assert_eq!(user.state, RecordState::Active);
    assert!(user.profile.is_none());
    assert!(user.is_agent());
    assert!(!user.is_franchise());
}

#[test]
fn test_mark_deleted() {
    let mut user = agent();
    assert!(!user.is_deleted());
    user.mark_deleted();
    assert!(user.is_deleted());
}

#[test]
fn test_role_parsing_and_serialization() {
    assert_eq!("franchise".parse::<UserRole>().unwrap(), UserRole::Franchise);
    assert_eq!(UserRole::Owner.to_string(), "owner");
    assert!("admin".parse::<UserRole>().is_err());

    let json = serde_json::to_string(&UserRole::Agent).unwrap();
    assert_eq!(json, "\"agent\"");
}

#[test]
fn test_password_hash_is_never_serialized() {
    let json = serde_json::to_value(agent()).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "agent");
}

#[test]
fn test_profile_is_tagged_by_role() {
    let profile = Profile::Agent(AgentProfile {
        agency_name: Some("Gangnam Realty".to_string()),
        license_number: Some("11-2233".to_string()),
        bio: None,
    });
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["role"], "agent");
    assert_eq!(json["agency_name"], "Gangnam Realty");

    let parsed: Profile =
        serde_json::from_str(r#"{"role":"owner","interests":"retail"}"#).unwrap();
    assert_eq!(
        parsed,
        Profile::Owner(OwnerProfile {
            interests: Some("retail".to_string())
        })
    );
}

#[test]
fn test_profile_role_must_match_user_role() {
    let profile = Profile::Owner(OwnerProfile::default());
    assert!(profile.ensure_role(UserRole::Owner).is_ok());

    let err = profile.ensure_role(UserRole::Agent).unwrap_err();
    assert_eq!(
        err,
        ValidationError::ProfileRoleMismatch {
            profile: "owner".to_string(),
            user: "agent".to_string(),
        }
    );
}

#[test]
fn test_user_changes_apply_only_supplied_fields() {
    let mut user = agent();
    let changes = UserChanges {
        phone: Some("010-1234-5678".to_string()),
        ..Default::default()
    };
    assert!(!changes.is_empty());

    changes.apply_to(&mut user);
    assert_eq!(user.phone.as_deref(), Some("010-1234-5678"));
    assert_eq!(user.name.as_deref(), Some("Kim"));
    assert_eq!(user.email, "a@x.com");
    assert!(UserChanges::default().is_empty());
}
