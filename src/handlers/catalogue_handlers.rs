use actix_web::{HttpResponse, Result, web};

use crate::errors::QrError;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{EventOption, ProjectOption};
use crate::utils::jwt::AuthUser;

pub async fn list_projects(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, QrError> {
    let projects = app_state.catalogue.published_projects(&user.id).await?;
    let options: Vec<ProjectOption> = projects.into_iter().map(ProjectOption::from).collect();
    Ok(HttpResponse::Ok().json(options))
}

pub async fn list_events(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
) -> Result<HttpResponse, QrError> {
    let events = app_state.catalogue.published_events(&user.id).await?;
    let options: Vec<EventOption> = events.into_iter().map(EventOption::from).collect();
    Ok(HttpResponse::Ok().json(options))
}
