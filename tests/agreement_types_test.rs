mod common;

use crm_backend::db::agreement_types as agreement_type_db;
use crm_backend::db::service_agreements as agreement_db;
use crm_backend::error::CrmError;
use crm_backend::models::service_agreements::{AgreementStatus, ServiceAgreementForm};
use crm_backend::services::{agreement_types, service_agreements};

#[tokio::test]
async fn rename_is_ignored_while_in_use() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;

    let token = common::csrf(&state, &admin).await;
    let hosting = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("hosting", "Hosting"),
    )
    .await
    .unwrap();
    for _ in 0..3 {
        common::service_agreement(&state, &admin, business.id, "hosting").await;
    }

    let token = common::csrf(&state, &admin).await;
    let mut form = common::agreement_type_form("web_hosting", "Web hosting");
    form.description = Some("Managed servers".to_string());
    let updated = agreement_types::update_agreement_type(&state, &admin, &token, hosting.id, form)
        .await
        .unwrap();

    assert_eq!(updated.name, "hosting");
    assert_eq!(updated.label, "Web hosting");
    assert_eq!(updated.description.as_deref(), Some("Managed servers"));
    let rows = agreement_db::get_by_agreement_type(&state.db, "hosting").await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(agreement_db::get_by_agreement_type(&state.db, "web_hosting")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unused_type_can_be_renamed() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let token = common::csrf(&state, &admin).await;
    let foo = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("foo", "Foo"),
    )
    .await
    .unwrap();

    let token = common::csrf(&state, &admin).await;
    let renamed = agreement_types::update_agreement_type(
        &state,
        &admin,
        &token,
        foo.id,
        common::agreement_type_form("bar", "Bar"),
    )
    .await
    .unwrap();

    assert_eq!(renamed.name, "bar");
    assert!(agreement_db::get_by_agreement_type(&state.db, "foo")
        .await
        .unwrap()
        .is_empty());
    assert!(agreement_type_db::get_agreement_type_by_name(&state.db, "foo")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn store_rename_rewrites_every_referencing_row() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let token = common::csrf(&state, &admin).await;
    let foo = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("foo", "Foo"),
    )
    .await
    .unwrap();
    common::service_agreement(&state, &admin, business.id, "foo").await;
    common::service_agreement(&state, &admin, business.id, "foo").await;

    let (renamed, rewritten) = agreement_type_db::update_agreement_type(
        &state.db,
        foo,
        common::agreement_type_form("bar", "Bar"),
    )
    .await
    .unwrap();

    assert_eq!(renamed.name, "bar");
    assert_eq!(rewritten, 2);
    assert!(agreement_db::get_by_agreement_type(&state.db, "foo").await.unwrap().is_empty());
    assert_eq!(agreement_db::get_by_agreement_type(&state.db, "bar").await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_reports_usage_count() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let token = common::csrf(&state, &admin).await;
    let support = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("support", "Support"),
    )
    .await
    .unwrap();
    common::service_agreement(&state, &admin, business.id, "support").await;
    common::service_agreement(&state, &admin, business.id, "support").await;

    let token = common::csrf(&state, &admin).await;
    let err = agreement_types::delete_agreement_type(&state, &admin, &token, support.id)
        .await
        .unwrap_err();
    match err {
        CrmError::Conflict(msg) => assert!(msg.contains("2 service agreement"), "{msg}"),
        other => panic!("expected conflict, got {other:?}"),
    }

    let summary = agreement_types::get_agreement_type(&state, &admin, support.id)
        .await
        .unwrap();
    assert_eq!(summary.usage_count, 2);
}

#[tokio::test]
async fn unused_type_is_deleted() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let token = common::csrf(&state, &admin).await;
    let unused = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("unused", "Unused"),
    )
    .await
    .unwrap();

    let token = common::csrf(&state, &admin).await;
    agreement_types::delete_agreement_type(&state, &admin, &token, unused.id)
        .await
        .unwrap();

    assert!(agreement_types::list_agreement_types(&state, &admin)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn names_are_machine_names_and_unique() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let token = common::csrf(&state, &admin).await;
    let bad = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("Web Hosting", "Web hosting"),
    )
    .await;
    assert!(matches!(bad, Err(CrmError::Validation(_))));

    let token = common::csrf(&state, &admin).await;
    agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("hosting", "Hosting"),
    )
    .await
    .unwrap();
    let token = common::csrf(&state, &admin).await;
    let duplicate = agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("hosting", "Hosting again"),
    )
    .await;
    assert!(matches!(duplicate, Err(CrmError::Conflict(_))));
}

#[tokio::test]
async fn new_agreements_need_an_active_type() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let business = common::business(&state, &admin, "Acme AS").await;
    let token = common::csrf(&state, &admin).await;
    let mut form = common::agreement_type_form("legacy", "Legacy");
    form.is_active = false;
    agreement_types::create_agreement_type(&state, &admin, &token, form)
        .await
        .unwrap();
    let token = common::csrf(&state, &admin).await;
    agreement_types::create_agreement_type(
        &state,
        &admin,
        &token,
        common::agreement_type_form("support", "Support"),
    )
    .await
    .unwrap();

    let form = |agreement_type: &str, end| ServiceAgreementForm {
        business_id: business.id,
        agreement_type: agreement_type.to_string(),
        title: "Maintenance".to_string(),
        start_date: common::date(2025, 1, 10),
        end_date: end,
        price: None,
        status: AgreementStatus::Active,
    };

    let token = common::csrf(&state, &admin).await;
    let inactive =
        service_agreements::create_service_agreement(&state, &admin, &token, form("legacy", None)).await;
    assert!(matches!(inactive, Err(CrmError::Validation(_))));

    let token = common::csrf(&state, &admin).await;
    let missing =
        service_agreements::create_service_agreement(&state, &admin, &token, form("nope", None)).await;
    assert!(matches!(missing, Err(CrmError::Validation(_))));

    let token = common::csrf(&state, &admin).await;
    let reversed = service_agreements::create_service_agreement(
        &state,
        &admin,
        &token,
        form("support", Some(common::date(2025, 1, 5))),
    )
    .await;
    assert!(matches!(reversed, Err(CrmError::Validation(_))));

    let token = common::csrf(&state, &admin).await;
    service_agreements::create_service_agreement(
        &state,
        &admin,
        &token,
        form("support", Some(common::date(2025, 12, 31))),
    )
    .await
    .unwrap();
}
