//! Shared setup for integration tests: a migrated in-memory SQLite store with the
//! permission catalog and the `admin` role in place.
#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

use crm_backend::auth::Actor;
use crm_backend::config::AppConfig;
use crm_backend::db::{permissions as permission_db, roles as role_db, users as user_db};
use crm_backend::models::agreement_types::AgreementTypeForm;
use crm_backend::models::businesses::{self, BusinessForm};
use crm_backend::models::leads::{self, LeadForm, LeadSource, LeadStatus};
use crm_backend::models::offers::{self, OfferForm, OfferStatus};
use crm_backend::models::roles;
use crm_backend::models::service_agreements::{self, AgreementStatus, ServiceAgreementForm};
use crm_backend::models::users;
use crm_backend::services;
use crm_backend::state::AppState;
use migration::{Migrator, MigratorTrait};

pub const MASTER_ADMIN_EMAIL: &str = "admin@example.com";

/// One pooled connection: every SQLite `:memory:` connection is its own database.
pub async fn connect() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Migrations failed");
    permission_db::sync_catalog(&db)
        .await
        .expect("Failed to sync permission catalog");
    role_db::ensure_admin_role(&db)
        .await
        .expect("Failed to create admin role");
    db
}

pub async fn setup() -> AppState {
    AppState::new(connect().await, AppConfig::for_database("sqlite::memory:"))
}

pub async fn admin_role(state: &AppState) -> roles::Model {
    role_db::get_role_by_name(&state.db, roles::ADMIN_ROLE)
        .await
        .unwrap()
        .expect("admin role exists")
}

/// A role holding exactly the named permission keys (e.g. `"view_business"`).
pub async fn role_with(state: &AppState, name: &str, keys: &[&str]) -> roles::Model {
    let ids: Vec<Uuid> = permission_db::get_all_permissions(&state.db)
        .await
        .unwrap()
        .into_iter()
        .filter(|p| keys.contains(&p.name.as_str()))
        .map(|p| p.id)
        .collect();
    assert_eq!(ids.len(), keys.len(), "unknown permission key in {keys:?}");

    role_db::insert_role(&state.db, name.to_string(), None, &ids)
        .await
        .unwrap()
}

/// Store a user with the given role and return the matching actor.
pub async fn user_with_role(state: &AppState, email: &str, role: &roles::Model) -> Actor {
    let user = user_db::insert_user(
        &state.db,
        email.split('@').next().unwrap_or(email).to_string(),
        email.to_string(),
        role.id,
        "not-a-real-hash".to_string(),
    )
    .await
    .unwrap();
    actor(&user, role)
}

pub fn actor(user: &users::Model, role: &roles::Model) -> Actor {
    Actor {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role_id: role.id,
        role: role.name.clone(),
        session_id: Uuid::new_v4().simple().to_string(),
    }
}

/// An administrator that is not the master admin.
pub async fn admin(state: &AppState) -> Actor {
    let role = admin_role(state).await;
    user_with_role(state, "manager@example.com", &role).await
}

pub async fn csrf(state: &AppState, actor: &Actor) -> String {
    state.csrf.issue(&actor.session_id).await
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn business(state: &AppState, actor: &Actor, name: &str) -> businesses::Model {
    let token = csrf(state, actor).await;
    services::businesses::create_business(
        state,
        actor,
        &token,
        BusinessForm {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub fn lead_form(title: &str, business_id: Option<Uuid>) -> LeadForm {
    LeadForm {
        title: title.to_string(),
        description: None,
        source: LeadSource::Website,
        status: LeadStatus::New,
        value: Some(10_000.0),
        business_id,
        contact_id: None,
        assigned_to: None,
    }
}

pub async fn lead(state: &AppState, actor: &Actor, title: &str, business_id: Option<Uuid>) -> leads::Model {
    let token = csrf(state, actor).await;
    services::leads::create_lead(state, actor, &token, lead_form(title, business_id))
        .await
        .unwrap()
}

pub fn offer_form(title: &str, lead_id: Option<Uuid>, status: OfferStatus) -> OfferForm {
    OfferForm {
        title: title.to_string(),
        description: None,
        amount: 25_000.0,
        status,
        valid_until: None,
        lead_id,
        business_id: None,
    }
}

pub async fn offer(
    state: &AppState,
    actor: &Actor,
    title: &str,
    lead_id: Option<Uuid>,
    status: OfferStatus,
) -> offers::Model {
    let token = csrf(state, actor).await;
    services::offers::create_offer(state, actor, &token, offer_form(title, lead_id, status))
        .await
        .unwrap()
}

pub fn agreement_type_form(name: &str, label: &str) -> AgreementTypeForm {
    AgreementTypeForm {
        name: name.to_string(),
        label: label.to_string(),
        description: None,
        is_active: true,
    }
}

pub async fn service_agreement(
    state: &AppState,
    actor: &Actor,
    business_id: Uuid,
    agreement_type: &str,
) -> service_agreements::Model {
    let token = csrf(state, actor).await;
    services::service_agreements::create_service_agreement(
        state,
        actor,
        &token,
        ServiceAgreementForm {
            business_id,
            agreement_type: agreement_type.to_string(),
            title: format!("{agreement_type} agreement"),
            start_date: date(2025, 1, 1),
            end_date: None,
            price: Some(1_200.0),
            status: AgreementStatus::Active,
        },
    )
    .await
    .unwrap()
}
