use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{auth::gate::AdminIdentity, errors::AppError, AppState};

/// Challenges every request under the configured admin prefixes.
pub struct AdminGate;

impl<S> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGateService {
            service: Rc::new(service),
        })
    }
}

pub struct AdminGateService<S> {
    service: Rc<S>,
}

enum Verdict {
    Open,
    Granted(AdminIdentity),
    Denied,
    MissingState,
}

impl<S> Service<ServiceRequest> for AdminGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return service.call(req).await;
            }

            let verdict = match req.app_data::<web::Data<AppState>>() {
                None => Verdict::MissingState,
                Some(state) if !state.access_gate.guards(req.path()) => Verdict::Open,
                Some(state) => match state.access_gate.authorize(req.request()) {
                    Some(identity) => Verdict::Granted(identity),
                    None => Verdict::Denied,
                },
            };

            match verdict {
                Verdict::Open => service.call(req).await,
                Verdict::Granted(identity) => {
                    tracing::debug!("Admin access to {} via {}", req.path(), identity.source);
                    req.extensions_mut().insert(identity);
                    service.call(req).await
                }
                Verdict::Denied => {
                    tracing::warn!("Unauthenticated request to {}", req.path());
                    Ok(req.into_response(AppError::UnauthorizedAccess.error_response()))
                }
                Verdict::MissingState => {
                    tracing::error!("AppState missing in middleware");
                    let err = AppError::Storage("application state not registered".to_string());
                    Ok(req.into_response(err.error_response()))
                }
            }
        })
    }
}
