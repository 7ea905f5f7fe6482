pub mod agreement_types;
pub mod auth;
pub mod businesses;
pub mod contacts;
pub mod leads;
pub mod notifications;
pub mod offers;
pub mod projects;
pub mod roles;
pub mod service_agreements;
pub mod settings;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (login is public; the rest require a valid token) ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me))
            .route("/csrf", web::get().to(auth::csrf)),
    );

    // ── Access control ──
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users::get_users))
            .route("", web::post().to(users::create_user))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user)),
    );
    cfg.service(
        web::scope("/roles")
            .route("", web::get().to(roles::get_roles))
            .route("", web::post().to(roles::create_role))
            .route("/{id}", web::get().to(roles::get_role))
            .route("/{id}", web::put().to(roles::update_role))
            .route("/{id}", web::delete().to(roles::delete_role)),
    );
    cfg.route("/permissions", web::get().to(roles::get_permissions));

    // ── CRM records ──
    cfg.service(
        web::scope("/businesses")
            .route("", web::get().to(businesses::get_businesses))
            .route("", web::post().to(businesses::create_business))
            .route("/{id}", web::get().to(businesses::get_business))
            .route("/{id}", web::put().to(businesses::update_business))
            .route("/{id}", web::delete().to(businesses::delete_business)),
    );
    cfg.service(
        web::scope("/contacts")
            .route("", web::get().to(contacts::get_contacts))
            .route("", web::post().to(contacts::create_contact))
            .route("/{id}", web::get().to(contacts::get_contact))
            .route("/{id}", web::put().to(contacts::update_contact))
            .route("/{id}", web::delete().to(contacts::delete_contact)),
    );
    cfg.service(
        web::scope("/leads")
            .route("", web::get().to(leads::get_leads))
            .route("", web::post().to(leads::create_lead))
            .route("/{id}", web::get().to(leads::get_lead))
            .route("/{id}", web::put().to(leads::update_lead))
            .route("/{id}", web::delete().to(leads::delete_lead))
            .route("/{id}/offers", web::get().to(offers::get_offers_for_lead)),
    );
    cfg.service(
        web::scope("/offers")
            .route("", web::get().to(offers::get_offers))
            .route("", web::post().to(offers::create_offer))
            .route("/{id}", web::get().to(offers::get_offer))
            .route("/{id}", web::put().to(offers::update_offer))
            .route("/{id}", web::delete().to(offers::delete_offer)),
    );
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project)),
    );
    cfg.service(
        web::scope("/agreement-types")
            .route("", web::get().to(agreement_types::get_agreement_types))
            .route("", web::post().to(agreement_types::create_agreement_type))
            .route("/{id}", web::get().to(agreement_types::get_agreement_type))
            .route("/{id}", web::put().to(agreement_types::update_agreement_type))
            .route("/{id}", web::delete().to(agreement_types::delete_agreement_type)),
    );
    cfg.service(
        web::scope("/service-agreements")
            .route("", web::get().to(service_agreements::get_service_agreements))
            .route("", web::post().to(service_agreements::create_service_agreement))
            .route("/{id}", web::get().to(service_agreements::get_service_agreement))
            .route("/{id}", web::put().to(service_agreements::update_service_agreement))
            .route("/{id}", web::delete().to(service_agreements::delete_service_agreement)),
    );

    // ── Settings and notifications ──
    cfg.service(
        web::resource("/settings")
            .route(web::get().to(settings::get_settings))
            .route(web::put().to(settings::update_settings)),
    );
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::get_notifications))
            .route("/recent", web::get().to(notifications::get_recent))
            .route("/read-all", web::post().to(notifications::mark_all_read)),
    );
}
