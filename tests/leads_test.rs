mod common;

use sea_orm::ConnectionTrait;

use crm_backend::db::{leads as lead_db, offers as offer_db};
use crm_backend::error::CrmError;
use crm_backend::models::leads::{LeadFilter, LeadStatus, LeadTab};
use crm_backend::models::notifications::NotificationKind;
use crm_backend::models::offers::OfferStatus;
use crm_backend::services::{leads, notifications};

#[tokio::test]
async fn deleting_a_lead_detaches_its_offers() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let lead = common::lead(&state, &admin, "Website rebuild", None).await;
    let mut offer_ids = Vec::new();
    for title in ["Basic", "Standard", "Premium"] {
        offer_ids.push(common::offer(&state, &admin, title, Some(lead.id), OfferStatus::Sent).await.id);
    }

    let token = common::csrf(&state, &admin).await;
    leads::delete_lead(&state, &admin, &token, lead.id).await.unwrap();

    assert!(lead_db::get_lead_by_id(&state.db, lead.id).await.unwrap().is_none());
    for id in offer_ids {
        let offer = offer_db::get_offer_by_id(&state.db, id).await.unwrap().unwrap();
        assert_eq!(offer.lead_id, None);
    }
}

#[tokio::test]
async fn failed_delete_leaves_offers_attached() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let lead = common::lead(&state, &admin, "Website rebuild", None).await;
    for title in ["Basic", "Standard", "Premium"] {
        common::offer(&state, &admin, title, Some(lead.id), OfferStatus::Sent).await;
    }

    // Make the second step of the delete fail after offers were already detached.
    state
        .db
        .execute_unprepared(
            "CREATE TRIGGER block_lead_delete BEFORE DELETE ON leads \
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .await
        .unwrap();

    let token = common::csrf(&state, &admin).await;
    let err = leads::delete_lead(&state, &admin, &token, lead.id).await.unwrap_err();
    assert!(matches!(err, CrmError::OperationFailed(_)));

    assert!(lead_db::get_lead_by_id(&state.db, lead.id).await.unwrap().is_some());
    let offers = offer_db::get_offers_by_lead_id(&state.db, lead.id).await.unwrap();
    assert_eq!(offers.len(), 3);
}

#[tokio::test]
async fn missing_lead_is_not_found() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let token = common::csrf(&state, &admin).await;

    let err = leads::delete_lead(&state, &admin, &token, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::NotFound(_)));
}

#[tokio::test]
async fn listing_combines_search_filters_and_tabs() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let acme = common::business(&state, &admin, "Acme AS").await;

    let open = common::lead(&state, &admin, "Website REBUILD", Some(acme.id)).await;
    let mut won_form = common::lead_form("Website hosting", Some(acme.id));
    won_form.status = LeadStatus::Won;
    let token = common::csrf(&state, &admin).await;
    let won = leads::create_lead(&state, &admin, &token, won_form).await.unwrap();
    common::lead(&state, &admin, "Office chairs", None).await;

    let page = leads::list_leads(
        &state,
        &admin,
        LeadFilter {
            search: Some("website".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total_items, 2);
    // Newest first.
    assert_eq!(page.items[0].id, won.id);

    let page = leads::list_leads(
        &state,
        &admin,
        LeadFilter {
            search: Some("rebuild".to_string()),
            business_id: Some(acme.id),
            tab: LeadTab::Open,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, open.id);

    let page = leads::list_leads(
        &state,
        &admin,
        LeadFilter {
            tab: LeadTab::Lost,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn negative_value_and_unknown_references_are_rejected() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let mut form = common::lead_form("Bad value", None);
    form.value = Some(-5.0);
    let token = common::csrf(&state, &admin).await;
    assert!(matches!(
        leads::create_lead(&state, &admin, &token, form).await,
        Err(CrmError::Validation(_))
    ));

    let form = common::lead_form("Ghost business", Some(uuid::Uuid::new_v4()));
    let token = common::csrf(&state, &admin).await;
    assert!(matches!(
        leads::create_lead(&state, &admin, &token, form).await,
        Err(CrmError::Validation(_))
    ));
}

#[tokio::test]
async fn assigning_a_lead_notifies_the_assignee() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let role = common::role_with(&state, "sales", &["view_lead"]).await;
    let seller = common::user_with_role(&state, "seller@example.com", &role).await;

    let mut form = common::lead_form("Website rebuild", None);
    form.assigned_to = Some(seller.id);
    let token = common::csrf(&state, &admin).await;
    let lead = leads::create_lead(&state, &admin, &token, form.clone()).await.unwrap();

    let recent = notifications::list_recent(&state, &seller, 5).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].kind, NotificationKind::LeadAssigned);
    assert_eq!(recent[0].link.as_deref(), Some(format!("/leads/{}", lead.id).as_str()));

    // Saving again with the same assignee does not notify twice.
    let token = common::csrf(&state, &admin).await;
    leads::update_lead(&state, &admin, &token, lead.id, form).await.unwrap();
    assert_eq!(notifications::unread_count(&state, &seller).await.unwrap(), 1);

    // Self-assignment never notifies.
    let mut own = common::lead_form("My own lead", None);
    own.assigned_to = Some(admin.id);
    let token = common::csrf(&state, &admin).await;
    leads::create_lead(&state, &admin, &token, own).await.unwrap();
    assert_eq!(notifications::unread_count(&state, &admin).await.unwrap(), 0);
}

#[tokio::test]
async fn failed_notice_does_not_fail_the_saved_lead() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let role = common::role_with(&state, "sales", &["view_lead"]).await;
    let seller = common::user_with_role(&state, "seller@example.com", &role).await;

    state
        .db
        .execute_unprepared(
            "CREATE TRIGGER block_notifications BEFORE INSERT ON notifications \
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .await
        .unwrap();

    let mut form = common::lead_form("Website rebuild", None);
    form.assigned_to = Some(seller.id);
    let token = common::csrf(&state, &admin).await;
    let lead = leads::create_lead(&state, &admin, &token, form).await.unwrap();

    let stored = leads::list_leads(&state, &admin, LeadFilter::default()).await.unwrap();
    assert_eq!(stored.total_items, 1);
    assert_eq!(stored.items[0].id, lead.id);
    assert_eq!(notifications::unread_count(&state, &seller).await.unwrap(), 0);
}
