pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, guard, web, HttpRequest};

use crate::{auth::AuthGate, error::AppError, state::AppState};

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

/// Registers the shared state and every route.
///
/// Read routes are public; create, update, delete and clear are wrapped in `AuthGate`.
/// `GET /{filter}` is registered ahead of the gated resources, so a GET on `/new` is answered
/// as an unknown filter (400) instead of reaching the gate; other methods fall through.
pub fn config(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let gate = AuthGate::new(state.tokens.clone());

        cfg.app_data(state)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(health::health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login))
                            .route("/logout", web::post().to(auth::logout))
                            .service(
                                web::resource("/me")
                                    .wrap(gate.clone())
                                    .route(web::get().to(auth::me)),
                            ),
                    )
                    .service(
                        web::scope("/task")
                            .service(web::resource(["", "/"]).route(web::get().to(tasks::get_list)))
                            .service(
                                web::resource("/{filter}")
                                    .guard(guard::Get())
                                    .route(web::get().to(tasks::get_part_list)),
                            )
                            .service(
                                web::resource("/new")
                                    .wrap(gate.clone())
                                    .route(web::post().to(tasks::create)),
                            )
                            .service(
                                web::resource("/update/{id}")
                                    .wrap(gate.clone())
                                    .route(web::put().to(tasks::update)),
                            )
                            .service(
                                web::resource("/delete/{id}")
                                    .wrap(gate.clone())
                                    .route(web::delete().to(tasks::delete)),
                            )
                            .service(
                                web::resource("/clear/{filter}")
                                    .wrap(gate)
                                    .route(web::delete().to(tasks::clear)),
                            ),
                    ),
            );
    }
}
