mod common;

use crm_backend::error::CrmError;
use crm_backend::models::offers::OfferStatus;
use crm_backend::models::projects::{ProjectForm, ProjectStatus};
use crm_backend::services::{offers, projects};

fn form(business_id: Option<uuid::Uuid>) -> ProjectForm {
    ProjectForm {
        name: "Intranet".to_string(),
        description: None,
        status: ProjectStatus::NotStarted,
        start_date: None,
        end_date: None,
        budget: None,
        business_id,
        offer_id: None,
    }
}

#[tokio::test]
async fn end_date_before_start_date_is_rejected() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;

    let mut reversed = form(Some(business.id));
    reversed.start_date = Some(common::date(2025, 1, 10));
    reversed.end_date = Some(common::date(2025, 1, 5));
    let token = common::csrf(&state, &admin).await;
    let err = projects::create_project(&state, &admin, &token, reversed.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Validation(_)));

    reversed.end_date = Some(common::date(2025, 1, 15));
    let token = common::csrf(&state, &admin).await;
    let project = projects::create_project(&state, &admin, &token, reversed).await.unwrap();
    assert_eq!(project.end_date, Some(common::date(2025, 1, 15)));

    let mut update = form(Some(business.id));
    update.start_date = Some(common::date(2025, 1, 10));
    update.end_date = Some(common::date(2025, 1, 9));
    let token = common::csrf(&state, &admin).await;
    let err = projects::update_project(&state, &admin, &token, project.id, update)
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Validation(_)));
}

#[tokio::test]
async fn accepted_offer_fills_business_and_budget() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let lead = common::lead(&state, &admin, "Intranet", Some(business.id)).await;
    let offer = common::offer(&state, &admin, "Intranet v1", Some(lead.id), OfferStatus::Accepted).await;
    // The offer took its business from the lead.
    assert_eq!(offer.business_id, Some(business.id));

    let mut from_offer = form(None);
    from_offer.offer_id = Some(offer.id);
    let token = common::csrf(&state, &admin).await;
    let project = projects::create_project(&state, &admin, &token, from_offer.clone())
        .await
        .unwrap();
    assert_eq!(project.business_id, business.id);
    assert_eq!(project.budget, Some(offer.amount));

    // Explicit values win over the offer.
    let other = common::business(&state, &admin, "Other AS").await;
    from_offer.business_id = Some(other.id);
    from_offer.budget = Some(999.0);
    let token = common::csrf(&state, &admin).await;
    let project = projects::create_project(&state, &admin, &token, from_offer).await.unwrap();
    assert_eq!(project.business_id, other.id);
    assert_eq!(project.budget, Some(999.0));

    // The offer now has projects and cannot be deleted.
    let token = common::csrf(&state, &admin).await;
    let err = offers::delete_offer(&state, &admin, &token, offer.id).await.unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));
}

#[tokio::test]
async fn only_accepted_offers_can_be_linked() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let draft = common::offer(&state, &admin, "Draft", None, OfferStatus::Draft).await;

    let mut linked = form(Some(business.id));
    linked.offer_id = Some(draft.id);
    let token = common::csrf(&state, &admin).await;
    let err = projects::create_project(&state, &admin, &token, linked).await.unwrap_err();
    assert!(matches!(err, CrmError::Validation(_)));
}

#[tokio::test]
async fn business_is_required() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let token = common::csrf(&state, &admin).await;
    let err = projects::create_project(&state, &admin, &token, form(None)).await.unwrap_err();
    assert!(matches!(err, CrmError::Validation(_)));
}

#[tokio::test]
async fn offer_with_projects_stays_accepted() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let lead = common::lead(&state, &admin, "Intranet", Some(business.id)).await;
    let offer = common::offer(&state, &admin, "Intranet v1", Some(lead.id), OfferStatus::Accepted).await;

    let mut from_offer = form(None);
    from_offer.offer_id = Some(offer.id);
    let token = common::csrf(&state, &admin).await;
    projects::create_project(&state, &admin, &token, from_offer).await.unwrap();

    let rejected = common::offer_form("Intranet v1", Some(lead.id), OfferStatus::Rejected);
    let token = common::csrf(&state, &admin).await;
    let err = offers::update_offer(&state, &admin, &token, offer.id, rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));
    let stored = offers::get_offer(&state, &admin, offer.id).await.unwrap();
    assert_eq!(stored.status, OfferStatus::Accepted);

    // Other edits of an accepted offer are still allowed.
    let mut renamed = common::offer_form("Intranet v2", Some(lead.id), OfferStatus::Accepted);
    renamed.amount = 30_000.0;
    let token = common::csrf(&state, &admin).await;
    let updated = offers::update_offer(&state, &admin, &token, offer.id, renamed).await.unwrap();
    assert_eq!(updated.title, "Intranet v2");
}
