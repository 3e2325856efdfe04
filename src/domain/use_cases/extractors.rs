use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use crate::{auth::gate::AdminIdentity, errors::AppError};

/// Extractor for the identity the access gate attached to the request.
/// Returns 401 if the request never passed the gate.
/// Usage: Add `admin: AdminSession` as a parameter to your handler function.
#[derive(Debug)]
pub struct AdminSession(pub AdminIdentity);

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AdminIdentity>() {
            Some(identity) => ready(Ok(AdminSession(identity.clone()))),
            None => ready(Err(AppError::UnauthorizedAccess.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::gate::GrantSource;
    use actix_web::test::TestRequest;

    #[actix_rt::test]
    async fn reads_identity_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AdminIdentity {
            source: GrantSource::BasicAuth,
            username: Some("admin".into()),
        });

        let session = AdminSession::extract(&req).await.unwrap();
        assert_eq!(session.0.username.as_deref(), Some("admin"));
    }

    #[actix_rt::test]
    async fn missing_identity_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = AdminSession::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
