use chrono::NaiveDate;
use dragonfly_core::{
    create_contact, demote_to_contact, promote_to_customer_on, set_status, update_value_on,
    Category, Contact, ContactDraft, ContactKind, ContactMethod, CustomerExtensionPatch,
    CustomerStatus, Tagged, ValidationError,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn jane() -> Contact {
    create_contact(ContactDraft {
        name: "Jane Smith".to_string(),
        email: "jane@x.com".to_string(),
        category: Category::Business,
        ..ContactDraft::default()
    })
    .unwrap()
}

#[test]
fn promote_then_demote_returns_original_contact() {
    let mut contact = jane();
    contact.address = "123 Main St, Springfield".to_string();
    contact.tags = vec!["premium".to_string()];
    contact.kind = ContactKind::individual("Acme Corp", "CEO");

    let patch = CustomerExtensionPatch {
        status: Some(CustomerStatus::Active),
        value: Some(12_500.0),
        preferred_contact_method: Some(ContactMethod::Email),
        ..CustomerExtensionPatch::default()
    };
    let customer = promote_to_customer_on(&contact, Some(patch), day(2024, 6, 1));

    assert_eq!(demote_to_contact(&customer), contact);
}

#[test]
fn promotion_defaults_to_lead_with_zero_value_since_today() {
    let today = day(2024, 6, 1);
    let customer = promote_to_customer_on(&jane(), None, today);

    assert_eq!(customer.status(), CustomerStatus::Lead);
    assert_eq!(customer.value(), 0.0);
    assert_eq!(customer.extension().customer_since, today);
    assert_eq!(customer.extension().last_purchase, None);
    assert_eq!(customer.extension().preferred_contact_method, None);
}

#[test]
fn positive_value_update_stamps_last_purchase_and_negative_does_not() {
    let customer = promote_to_customer_on(&jane(), None, day(2024, 1, 1));
    let purchase_day = day(2024, 3, 5);

    let raised = update_value_on(&customer, 100.0, purchase_day);
    assert_eq!(raised.value(), 100.0);
    assert_eq!(raised.extension().last_purchase, Some(purchase_day));

    let refunded = update_value_on(&raised, -50.0, day(2024, 4, 1));
    assert_eq!(refunded.value(), 50.0);
    assert_eq!(refunded.extension().last_purchase, Some(purchase_day));

    let unchanged = update_value_on(&customer, 0.0, purchase_day);
    assert_eq!(unchanged, customer);
}

#[test]
fn value_can_go_negative() {
    let customer = promote_to_customer_on(&jane(), None, day(2024, 1, 1));
    assert_eq!(update_value_on(&customer, -20.0, day(2024, 1, 2)).value(), -20.0);
}

#[test]
fn status_changes_are_unrestricted() {
    let customer = promote_to_customer_on(&jane(), None, day(2024, 1, 1));
    let inactive = set_status(&customer, CustomerStatus::Inactive);
    assert!(!inactive.is_active());
    assert_eq!(set_status(&inactive, CustomerStatus::Lead).status(), CustomerStatus::Lead);
    assert!(customer.activate().is_active());
}

#[test]
fn tags_are_idempotent_and_removal_of_absent_tag_is_noop() {
    let contact = jane().add_tag("vip").add_tag(" vip ").add_tag("   ");
    assert_eq!(contact.tags, vec!["vip".to_string()]);

    assert_eq!(contact.remove_tag("missing"), contact);
    assert!(contact.remove_tag("vip").tags.is_empty());

    let customer = promote_to_customer_on(&contact, None, day(2024, 1, 1)).add_tag("new");
    assert_eq!(customer.contact().tags, vec!["vip".to_string(), "new".to_string()]);
}

#[test]
fn jane_smith_round_trip_drops_customer_fields_from_wire_shape() {
    let contact = jane();
    let patch = CustomerExtensionPatch {
        status: Some(CustomerStatus::Active),
        value: Some(12_500.0),
        ..CustomerExtensionPatch::default()
    };
    let customer = promote_to_customer_on(&contact, Some(patch), day(2024, 6, 1));
    let customer_json = serde_json::to_value(&customer).unwrap();
    assert_eq!(customer_json["status"], "active");
    assert_eq!(customer_json["value"], 12_500.0);
    assert_eq!(customer_json["customer_since"], "2024-06-01");

    let demoted = demote_to_contact(&customer);
    let json = serde_json::to_value(&demoted).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("status"));
    assert!(!object.contains_key("value"));
    assert!(!object.contains_key("customer_since"));
    assert_eq!(object["name"], "Jane Smith");
    assert_eq!(object["email"], "jane@x.com");
    assert_eq!(object["category"], "business");
    assert_eq!(object["contact_type"], "individual");
}

#[test]
fn customer_deserializes_from_flat_record() {
    let raw = r#"{
        "id": "6f1c2d3e-4b5a-4c7d-8e9f-0a1b2c3d4e5f",
        "name": "Acme Corp",
        "contact_type": "company",
        "customer_since": "2023-01-15",
        "status": "active",
        "value": 12500.0,
        "last_purchase": null,
        "preferred_contact_method": "phone"
    }"#;
    let customer: dragonfly_core::Customer = serde_json::from_str(raw).unwrap();
    assert_eq!(customer.name(), "Acme Corp");
    assert_eq!(customer.contact().kind, ContactKind::Company);
    assert_eq!(customer.contact().company(), "");
    assert_eq!(
        customer.extension().preferred_contact_method,
        Some(ContactMethod::Phone)
    );
}

#[test]
fn create_contact_requires_name_and_valid_email() {
    let missing = create_contact(ContactDraft::default()).unwrap_err();
    assert_eq!(missing, ValidationError::MissingField("name"));

    let bad_email = create_contact(ContactDraft {
        name: "No At".to_string(),
        email: "not-an-email".to_string(),
        ..ContactDraft::default()
    })
    .unwrap_err();
    assert!(matches!(bad_email, ValidationError::InvalidEmail(_)));
}
