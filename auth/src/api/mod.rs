use std::net::ToSocketAddrs;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::Logger,
    web::{post, Data},
    App, HttpServer,
};
use common::error::HeResult;

use crate::service::credentials::CredentialService;

pub mod auth;

/// Run the platform auth API server, creating the two auth endpoints over the provided
/// [CredentialService] implementation.
/// # Errors
/// This function will return an error if the server is unable to bind to the specified `address`
/// or the server's `run` method returns an error
pub async fn spawn_api_server<A, C>(credentials_service: C, address: A) -> HeResult<()>
where
    A: ToSocketAddrs,
    C: CredentialService + 'static,
{
    let credentials_service_data: Data<C> = Data::new(credentials_service);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allowed_origin("http://127.0.0.1:3000")
                    .allowed_methods(vec!["GET", "POST"])
                    .allowed_headers(vec![
                        header::AUTHORIZATION,
                        header::ACCEPT,
                        header::CONTENT_TYPE,
                    ])
                    .supports_credentials()
                    .max_age(3600),
            )
            .app_data(credentials_service_data.clone())
            .route("/auth/login", post().to(auth::login::<C>))
            .route("/auth/logout", post().to(auth::logout))
    })
    .bind(address)?
    .run()
    .await?;
    Ok(())
}

#[cfg(test)]
mod test {
    use actix_web::{
        http::StatusCode,
        test,
        web::{post, Data},
        App,
    };
    use rstest::rstest;
    use serde_json::json;

    use crate::{
        api::auth::{self, LoginResponse},
        service::credentials::DemoCredentialService,
    };

    /// Issue a login request against a freshly initialized auth application
    async fn login_response(email: &str, password: &str) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(DemoCredentialService::demo()))
                .route(
                    "/auth/login",
                    post().to(auth::login::<DemoCredentialService>),
                )
                .route("/auth/logout", post().to(auth::logout)),
        )
        .await;
        let request = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        test::call_service(&app, request).await
    }

    #[rstest]
    #[case::lender("lender@healthera.ai", "lender0101", "lender", "1")]
    #[case::applicant("applicant@healthera.ai", "applicant0101", "applicant", "2")]
    #[case::mixed_case_email("LENDER@healthera.ai", "lender0101", "lender", "1")]
    #[actix_web::test]
    async fn login_should_return_user_when_valid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: &str,
        #[case] id: &str,
    ) {
        let response = login_response(email, password).await;

        assert_eq!(response.status(), StatusCode::OK);
        let auth_cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "auth")
            .expect("login response is missing the auth cookie");
        assert_eq!(auth_cookie.value(), "true");
        assert_eq!(auth_cookie.http_only(), Some(true));
        let role_cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "userRole")
            .expect("login response is missing the userRole cookie");
        assert_eq!(role_cookie.value(), role);

        let body: LoginResponse = test::read_body_json(response).await;
        assert_eq!(body.user.id(), id);
        assert_eq!(body.user.role().as_ref(), role);
        assert_eq!(body.user.email(), email.to_lowercase());
    }

    #[rstest]
    #[case::wrong_password("lender@healthera.ai", "wrong-password")]
    #[case::unknown_email("nobody@healthera.ai", "lender0101")]
    #[actix_web::test]
    async fn login_should_return_unauthorized_when_invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let response = login_response(email, password).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "error": "Invalid credentials" }));
    }

    #[actix_web::test]
    async fn logout_should_always_succeed_and_remove_cookies() {
        let app = test::init_service(
            App::new().route("/auth/logout", post().to(auth::logout)),
        )
        .await;
        let request = test::TestRequest::post().uri("/auth/logout").to_request();

        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        for name in ["auth", "userRole"] {
            let cookie = response
                .response()
                .cookies()
                .find(|cookie| cookie.name() == name)
                .expect("logout response is missing a removal cookie");
            assert!(cookie.value().is_empty());
        }
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "success": true }));
    }
}
