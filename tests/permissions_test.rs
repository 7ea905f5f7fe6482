mod common;

use crm_backend::db::permissions as permission_db;
use crm_backend::error::CrmError;
use crm_backend::models::businesses::{BusinessFilter, BusinessForm};
use crm_backend::models::permissions::{Action, Module, PermissionKey};
use crm_backend::models::roles::RoleForm;
use crm_backend::services::{businesses, roles};

fn form(name: &str) -> BusinessForm {
    BusinessForm {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn catalog_is_synced_once() {
    let state = common::setup().await;

    let all = permission_db::get_all_permissions(&state.db).await.unwrap();
    assert_eq!(all.len(), PermissionKey::catalog().len());
    assert!(all.iter().all(|p| p.name == p.key().to_string()));

    assert_eq!(permission_db::sync_catalog(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn admin_is_authorized_for_everything() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    for key in PermissionKey::catalog() {
        assert!(state.authorize(&admin, key.module, key.action).await.is_ok());
    }
}

#[tokio::test]
async fn other_roles_only_get_what_they_were_granted() {
    let state = common::setup().await;
    let role = common::role_with(&state, "viewer", &["view_business"]).await;
    let viewer = common::user_with_role(&state, "viewer@example.com", &role).await;

    assert!(businesses::list_businesses(&state, &viewer, BusinessFilter::default())
        .await
        .is_ok());

    let token = common::csrf(&state, &viewer).await;
    let denied = businesses::create_business(&state, &viewer, &token, form("Acme AS")).await;
    assert!(matches!(denied, Err(CrmError::Forbidden)));

    assert!(matches!(
        state.authorize(&viewer, Module::Lead, Action::View).await,
        Err(CrmError::Forbidden)
    ));
}

#[tokio::test]
async fn denial_happens_before_csrf_and_keeps_the_token() {
    let state = common::setup().await;
    let role = common::role_with(&state, "viewer", &["view_business"]).await;
    let viewer = common::user_with_role(&state, "viewer@example.com", &role).await;
    let token = common::csrf(&state, &viewer).await;

    let denied = businesses::create_business(&state, &viewer, "wrong-token", form("Acme AS")).await;
    assert!(matches!(denied, Err(CrmError::Forbidden)));

    // Never reached the CSRF guard, so the issued token is still valid.
    assert!(state.csrf.validate(&viewer.session_id, &token).await);
}

#[tokio::test]
async fn role_edit_takes_effect_on_next_check() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let role = common::role_with(&state, "sales", &["view_lead"]).await;
    let seller = common::user_with_role(&state, "seller@example.com", &role).await;

    // Warm the cached grant set.
    assert!(state.authorize(&seller, Module::Lead, Action::View).await.is_ok());
    assert!(state.authorize(&seller, Module::Lead, Action::Create).await.is_err());

    let all = permission_db::get_all_permissions(&state.db).await.unwrap();
    let ids = all
        .iter()
        .filter(|p| p.name == "view_lead" || p.name == "create_lead")
        .map(|p| p.id)
        .collect();
    let token = common::csrf(&state, &admin).await;
    roles::update_role(
        &state,
        &admin,
        &token,
        role.id,
        RoleForm {
            name: "sales".to_string(),
            description: None,
            permission_ids: ids,
        },
    )
    .await
    .unwrap();

    assert!(state.authorize(&seller, Module::Lead, Action::Create).await.is_ok());
}

#[tokio::test]
async fn permissions_are_grouped_by_module() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let groups = roles::list_permissions(&state, &admin).await.unwrap();

    assert_eq!(groups.first().map(|g| g.module), Some(Module::Business));
    let setting = groups.iter().find(|g| g.module == Module::Setting).unwrap();
    assert_eq!(setting.permissions.len(), 2);
    for group in &groups {
        assert!(group.permissions.iter().all(|p| p.module == group.module));
    }
}
