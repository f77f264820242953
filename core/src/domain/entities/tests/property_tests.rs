//! Unit tests for property entity

use chrono::Utc;

use crate::domain::entities::property::{
    NewProperty, PropertyAttributes, PropertyChanges, PropertyFilter, PropertyStatus,
};
use crate::errors::ValidationError;

#[test]
fn test_new_property_defaults() {
    let property = NewProperty::new(7, PropertyAttributes::new("Flat", "Seoul"))
        .into_property(1, Utc::now());

    assert_eq!(property.agent_id, 7);
    assert_eq!(property.status, PropertyStatus::Available);
    assert!(!property.is_deleted());
    assert!(!property.attributes.renovated);
    assert!(property.is_owned_by(7));
    assert!(!property.is_owned_by(8));
}

#[test]
fn test_missing_area_unit_is_derived() {
    let attrs = PropertyAttributes {
        area_m2: Some(33.06),
        ..PropertyAttributes::new("Flat", "Seoul")
    };
    let new_property = NewProperty::new(1, attrs);
    assert_eq!(new_property.attributes.area_pyeong, Some(10.0));

    let attrs = PropertyAttributes {
        area_pyeong: Some(10.0),
        ..PropertyAttributes::new("Flat", "Seoul")
    };
    let new_property = NewProperty::new(1, attrs);
    assert_eq!(new_property.attributes.area_m2, Some(33.06));
}

#[test]
fn test_supplied_areas_are_kept() {
    let attrs = PropertyAttributes {
        area_m2: Some(50.0),
        area_pyeong: Some(20.0),
        ..PropertyAttributes::new("Flat", "Seoul")
    };
    let new_property = NewProperty::new(1, attrs);
    assert_eq!(new_property.attributes.area_m2, Some(50.0));
    assert_eq!(new_property.attributes.area_pyeong, Some(20.0));
}

#[test]
fn test_attributes_validation() {
    assert!(PropertyAttributes::new("Flat", "Seoul").validate().is_ok());
    assert_eq!(
        PropertyAttributes::new("  ", "Seoul").validate(),
        Err(ValidationError::required("title"))
    );
    assert_eq!(
        PropertyAttributes::new("Flat", "").validate(),
        Err(ValidationError::required("address"))
    );

    let negative = PropertyAttributes {
        area_m2: Some(-1.0),
        ..PropertyAttributes::new("Flat", "Seoul")
    };
    assert!(negative.validate().is_err());
}

#[test]
fn test_status_wire_names() {
    assert_eq!(
        serde_json::to_string(&PropertyStatus::OffMarket).unwrap(),
        "\"offMarket\""
    );
    assert_eq!(
        "offMarket".parse::<PropertyStatus>().unwrap(),
        PropertyStatus::OffMarket
    );
    assert_eq!(PropertyStatus::Available.as_str(), "available");
    assert!("gone".parse::<PropertyStatus>().is_err());
}

#[test]
fn test_changes_apply_partially() {
    let mut property = NewProperty::new(7, PropertyAttributes::new("Flat", "Seoul"))
        .into_property(1, Utc::now());

    let changes = PropertyChanges {
        monthly_rent: Some(900_000),
        status: Some(PropertyStatus::Rented),
        ..Default::default()
    };
    assert!(!changes.is_empty());
    changes.apply_to(&mut property);

    assert_eq!(property.attributes.monthly_rent, Some(900_000));
    assert_eq!(property.status, PropertyStatus::Rented);
    assert_eq!(property.attributes.title, "Flat");
    assert!(PropertyChanges::default().is_empty());
}

#[test]
fn test_changes_reject_blank_title() {
    let changes = PropertyChanges {
        title: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(changes.validate(), Err(ValidationError::required("title")));
}

#[test]
fn test_changes_reject_negative_area() {
    let changes = PropertyChanges {
        area_pyeong: Some(-1.0),
        ..Default::default()
    };
    assert!(matches!(
        changes.validate(),
        Err(ValidationError::OutOfRange { field, .. }) if field == "area_pyeong"
    ));
}

#[test]
fn test_changes_derive_the_other_area_unit() {
    let mut property = NewProperty::new(
        7,
        PropertyAttributes {
            area_m2: Some(33.06),
            ..PropertyAttributes::new("Flat", "Seoul")
        },
    )
    .into_property(1, Utc::now());

    PropertyChanges {
        area_m2: Some(66.12),
        ..Default::default()
    }
    .apply_to(&mut property);
    assert_eq!(property.attributes.area_m2, Some(66.12));
    assert_eq!(property.attributes.area_pyeong, Some(20.0));

    let both = PropertyChanges {
        area_m2: Some(50.0),
        area_pyeong: Some(15.0),
        ..Default::default()
    };
    assert_eq!(both.clone().with_both_areas(), both);
}

#[test]
fn test_filter_matching() {
    let property = NewProperty::new(7, PropertyAttributes::new("Flat", "Seoul"))
        .into_property(1, Utc::now());

    assert!(PropertyFilter::default().matches(&property));
    assert!(PropertyFilter::by_agent(7).matches(&property));
    assert!(!PropertyFilter::by_agent(8).matches(&property));

    let sold = PropertyFilter {
        status: Some(PropertyStatus::Sold),
        ..Default::default()
    };
    assert!(!sold.matches(&property));
}

#[test]
fn test_flattened_serialization() {
    let property = NewProperty::new(7, PropertyAttributes::new("Flat", "Seoul"))
        .into_property(1, Utc::now());
    let json = serde_json::to_value(&property).unwrap();

    assert_eq!(json["title"], "Flat");
    assert_eq!(json["status"], "available");
    assert_eq!(json["agent_id"], 7);
}
