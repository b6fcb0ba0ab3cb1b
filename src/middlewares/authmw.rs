use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    error::ErrorUnauthorized,
    http::header,
};
use futures_util::future::LocalBoxFuture;

use crate::utils::jwt::{AuthUser, validate_token};

pub struct JwtAuth {
    secret: Rc<str>,
}

impl JwtAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Rc::from(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service,
            secret: Rc::clone(&self.secret),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: S,
    secret: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Health probes stay public
        if req.path().starts_with("/api/health/check") {
            return Box::pin(self.service.call(req));
        }

        let token = match req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str())
        {
            None => {
                return Box::pin(async move { Err(ErrorUnauthorized("No authorization header")) });
            }
            Some(Err(_)) => {
                return Box::pin(
                    async move { Err(ErrorUnauthorized("Invalid authorization header")) },
                );
            }
            Some(Ok(value)) => match value.strip_prefix("Bearer ") {
                Some(token) => token.to_string(),
                None => {
                    return Box::pin(
                        async move { Err(ErrorUnauthorized("Invalid authorization format")) },
                    );
                }
            },
        };

        let claims = match validate_token(&token, &self.secret) {
            Ok(claims) => claims,
            Err(_) => {
                return Box::pin(async move { Err(ErrorUnauthorized("Invalid token")) });
            }
        };

        // Handlers read the member through web::ReqData<AuthUser>
        req.extensions_mut().insert(AuthUser::from(claims));

        Box::pin(self.service.call(req))
    }
}
