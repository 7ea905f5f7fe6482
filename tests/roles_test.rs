mod common;

use crm_backend::db::permissions as permission_db;
use crm_backend::db::users::{self as user_db, UserChanges};
use crm_backend::error::CrmError;
use crm_backend::models::roles::RoleForm;
use crm_backend::services::roles;

fn form(name: &str, permission_ids: Vec<uuid::Uuid>) -> RoleForm {
    RoleForm {
        name: name.to_string(),
        description: None,
        permission_ids,
    }
}

#[tokio::test]
async fn admin_role_cannot_be_deleted() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let admin_role = common::admin_role(&state).await;

    let token = common::csrf(&state, &admin).await;
    let err = roles::delete_role(&state, &admin, &token, admin_role.id).await.unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));
}

#[tokio::test]
async fn admin_role_cannot_be_deleted_even_when_unused() {
    let state = common::setup().await;
    let admin_role = common::admin_role(&state).await;
    // A role manager outside the admin role, with no users on the admin role.
    let role = common::role_with(&state, "role_manager", &["delete_role"]).await;
    let manager = common::user_with_role(&state, "rm@example.com", &role).await;

    let token = common::csrf(&state, &manager).await;
    let err = roles::delete_role(&state, &manager, &token, admin_role.id).await.unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));
}

#[tokio::test]
async fn role_in_use_reports_user_count() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let sales = common::role_with(&state, "sales", &["view_lead"]).await;
    let support = common::role_with(&state, "support", &[]).await;
    let first = common::user_with_role(&state, "a@example.com", &sales).await;
    let second = common::user_with_role(&state, "b@example.com", &sales).await;

    let token = common::csrf(&state, &admin).await;
    match roles::delete_role(&state, &admin, &token, sales.id).await {
        Err(CrmError::Conflict(msg)) => assert!(msg.contains("2 user"), "{msg}"),
        other => panic!("expected conflict, got {other:?}"),
    }

    for (actor, email) in [(first, "a@example.com"), (second, "b@example.com")] {
        let user = user_db::get_user_by_id(&state.db, actor.id).await.unwrap().unwrap();
        user_db::update_user(
            &state.db,
            user,
            UserChanges {
                name: actor.name.clone(),
                email: email.to_string(),
                role_id: support.id,
                password_hash: None,
            },
        )
        .await
        .unwrap();
    }

    let token = common::csrf(&state, &admin).await;
    roles::delete_role(&state, &admin, &token, sales.id).await.unwrap();
}

#[tokio::test]
async fn admin_role_keeps_name_and_every_permission() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let admin_role = common::admin_role(&state).await;

    let token = common::csrf(&state, &admin).await;
    let updated = roles::update_role(
        &state,
        &admin,
        &token,
        admin_role.id,
        form("superuser", Vec::new()),
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "admin");

    let granted = permission_db::get_permissions_for_role_id(&state.db, admin_role.id)
        .await
        .unwrap();
    let all = permission_db::get_all_permissions(&state.db).await.unwrap();
    assert_eq!(granted.len(), all.len());
}

#[tokio::test]
async fn create_checks_name_and_permissions() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let all = permission_db::get_all_permissions(&state.db).await.unwrap();
    let view_lead = all.iter().find(|p| p.name == "view_lead").unwrap().id;

    let token = common::csrf(&state, &admin).await;
    let reserved = roles::create_role(&state, &admin, &token, form("Admin", vec![])).await;
    assert!(matches!(reserved, Err(CrmError::Conflict(_))));

    let token = common::csrf(&state, &admin).await;
    let forged =
        roles::create_role(&state, &admin, &token, form("sales", vec![uuid::Uuid::new_v4()])).await;
    assert!(matches!(forged, Err(CrmError::Validation(_))));

    // Duplicate ids collapse to one grant.
    let token = common::csrf(&state, &admin).await;
    let sales = roles::create_role(&state, &admin, &token, form("sales", vec![view_lead, view_lead]))
        .await
        .unwrap();
    let detail = roles::get_role(&state, &admin, sales.id).await.unwrap();
    assert_eq!(detail.permissions.len(), 1);
    assert_eq!(detail.user_count, 0);

    let token = common::csrf(&state, &admin).await;
    let duplicate = roles::create_role(&state, &admin, &token, form("SALES", vec![])).await;
    assert!(matches!(duplicate, Err(CrmError::Conflict(_))));
}

/// Known race: concurrent edits of one role are not detected. Whichever update
/// commits last decides the stored name and permission set.
#[tokio::test]
async fn concurrent_role_edits_last_write_wins() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let mut other_admin = admin.clone();
    other_admin.session_id = "second-browser".to_string();
    let role = common::role_with(&state, "sales", &["view_lead"]).await;
    let all = permission_db::get_all_permissions(&state.db).await.unwrap();
    let id_of = |key: &str| all.iter().find(|p| p.name == key).unwrap().id;

    let first_token = common::csrf(&state, &admin).await;
    let second_token = common::csrf(&state, &other_admin).await;
    let (first, second) = tokio::join!(
        roles::update_role(
            &state,
            &admin,
            &first_token,
            role.id,
            form("sales_team", vec![id_of("create_lead")]),
        ),
        roles::update_role(
            &state,
            &other_admin,
            &second_token,
            role.id,
            form("sales_crew", vec![id_of("edit_lead"), id_of("delete_lead")]),
        ),
    );
    first.unwrap();
    second.unwrap();

    let stored = roles::get_role(&state, &admin, role.id).await.unwrap();
    let names: Vec<String> = stored.permissions.iter().map(|p| p.name.clone()).collect();
    // Exactly one of the two submissions survives intact; no mix of both.
    let survived_first = stored.role.name == "sales_team" && names == ["create_lead"];
    let survived_second = stored.role.name == "sales_crew"
        && names.len() == 2
        && names.contains(&"edit_lead".to_string())
        && names.contains(&"delete_lead".to_string());
    assert!(survived_first || survived_second, "{} {names:?}", stored.role.name);
}
