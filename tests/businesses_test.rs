mod common;

use crm_backend::error::CrmError;
use crm_backend::models::businesses::{BusinessFilter, BusinessForm};
use crm_backend::models::contacts::ContactForm;
use crm_backend::models::offers::OfferStatus;
use crm_backend::services::{businesses, contacts, leads, offers};

fn contact_form(business_id: Option<uuid::Uuid>) -> ContactForm {
    ContactForm {
        first_name: "Kari".to_string(),
        last_name: "Nordmann".to_string(),
        position: None,
        email: Some("kari@acme.no".to_string()),
        phone: None,
        business_id,
    }
}

#[tokio::test]
async fn business_with_dependents_cannot_be_deleted() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let token = common::csrf(&state, &admin).await;
    contacts::create_contact(&state, &admin, &token, contact_form(Some(business.id)))
        .await
        .unwrap();
    common::lead(&state, &admin, "Website", Some(business.id)).await;
    common::lead(&state, &admin, "Hosting", Some(business.id)).await;

    let token = common::csrf(&state, &admin).await;
    let err = businesses::delete_business(&state, &admin, &token, business.id)
        .await
        .unwrap_err();
    match err {
        CrmError::Conflict(message) => {
            assert!(message.contains("1 contact(s)"), "{message}");
            assert!(message.contains("2 lead(s)"), "{message}");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(businesses::get_business(&state, &admin, business.id).await.is_ok());

    let empty = common::business(&state, &admin, "Empty AS").await;
    let token = common::csrf(&state, &admin).await;
    businesses::delete_business(&state, &admin, &token, empty.id).await.unwrap();
    let gone = businesses::get_business(&state, &admin, empty.id).await;
    assert!(matches!(gone, Err(CrmError::NotFound(_))));
}

#[tokio::test]
async fn business_names_are_unique_ignoring_case() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let acme = common::business(&state, &admin, "Acme AS").await;

    let token = common::csrf(&state, &admin).await;
    let err = businesses::create_business(
        &state,
        &admin,
        &token,
        BusinessForm {
            name: "  ACME as ".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));

    // Saving a business under its own name is not a clash.
    let token = common::csrf(&state, &admin).await;
    let updated = businesses::update_business(
        &state,
        &admin,
        &token,
        acme.id,
        BusinessForm {
            name: "Acme AS".to_string(),
            industry: Some("Retail".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.industry.as_deref(), Some("Retail"));
}

#[tokio::test]
async fn search_ignores_case() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    common::business(&state, &admin, "Acme AS").await;
    common::business(&state, &admin, "Globex").await;

    let page = businesses::list_businesses(
        &state,
        &admin,
        BusinessFilter {
            search: Some("acme".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "Acme AS");
}

#[tokio::test]
async fn deleting_a_contact_keeps_its_leads() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let token = common::csrf(&state, &admin).await;
    let contact = contacts::create_contact(&state, &admin, &token, contact_form(None))
        .await
        .unwrap();

    let mut form = common::lead_form("Website", None);
    form.contact_id = Some(contact.id);
    let token = common::csrf(&state, &admin).await;
    let lead = leads::create_lead(&state, &admin, &token, form).await.unwrap();

    let token = common::csrf(&state, &admin).await;
    contacts::delete_contact(&state, &admin, &token, contact.id).await.unwrap();

    let lead = leads::get_lead(&state, &admin, lead.id).await.unwrap();
    assert_eq!(lead.contact_id, None);
}

#[tokio::test]
async fn invalid_contact_email_is_rejected() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let mut form = contact_form(None);
    form.email = Some("not-an-email".to_string());

    let token = common::csrf(&state, &admin).await;
    let err = contacts::create_contact(&state, &admin, &token, form).await.unwrap_err();
    assert!(matches!(err, CrmError::Validation(_)));
}

#[tokio::test]
async fn offer_alone_blocks_business_delete() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;

    let mut form = common::offer_form("Support deal", None, OfferStatus::Sent);
    form.business_id = Some(business.id);
    let token = common::csrf(&state, &admin).await;
    offers::create_offer(&state, &admin, &token, form).await.unwrap();

    let token = common::csrf(&state, &admin).await;
    let err = businesses::delete_business(&state, &admin, &token, business.id)
        .await
        .unwrap_err();
    match err {
        CrmError::Conflict(message) => assert!(message.contains("1 offer(s)"), "{message}"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(businesses::get_business(&state, &admin, business.id).await.is_ok());
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    common::business(&state, &admin, "50% Off AS").await;
    common::business(&state, &admin, "500 Nordic").await;
    common::business(&state, &admin, "Data_Lab").await;
    common::business(&state, &admin, "DataXLab").await;

    let search = |term: &str| BusinessFilter {
        search: Some(term.to_string()),
        ..Default::default()
    };

    let page = businesses::list_businesses(&state, &admin, search("50%")).await.unwrap();
    let names: Vec<&str> = page.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["50% Off AS"]);

    let page = businesses::list_businesses(&state, &admin, search("a_l")).await.unwrap();
    let names: Vec<&str> = page.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Data_Lab"]);
}
