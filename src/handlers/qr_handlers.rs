use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Result, web};
use validator::Validate;

use crate::errors::QrError;
use crate::models::catalogue::{Event, Project};
use crate::models::form_state::{QrFormState, UploadState};
use crate::models::qr_code::InternalKind;
use crate::render::{ExportArtifact, ExportFormat};
use crate::resolver::target::{ResolveContext, resolve, resolve_target};
use crate::services::registry::CopySource;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{
    AdhocExportRequest, CopyRequest, CreateQrRequest, CreateQrResponse,
    DeactivateParams, ListQrParams, PreviewParams, QrCodeResponse, RasterResponse, ResolveResponse,
};
use crate::utils::jwt::AuthUser;

/// Catalogue entries matching the form's current selection.
async fn load_selection(
    app_state: &AppState,
    user: &AuthUser,
    form: &QrFormState,
) -> Result<(Option<Project>, Option<Event>), QrError> {
    let catalogue = &app_state.catalogue;
    match form {
        QrFormState::InternalLink {
            category: InternalKind::Project,
            project_id: Some(id),
            ..
        } => Ok((catalogue.project(&user.id, id).await?, None)),
        QrFormState::InternalLink {
            category: InternalKind::Event,
            event_id: Some(id),
            ..
        } => Ok((None, catalogue.event(&user.id, id).await?)),
        _ => Ok((None, None)),
    }
}

fn attachment(artifact: ExportArtifact) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(artifact.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(artifact.filename)],
        })
        .body(artifact.bytes)
}

/// Resolve the form without persisting anything
pub async fn resolve_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    web::Json(form): web::Json<QrFormState>,
) -> Result<HttpResponse, QrError> {
    let (project, event) = load_selection(&app_state, &user, &form).await?;
    let ctx = ResolveContext {
        base_url: &app_state.base_url,
        username: &user.username,
        project: project.as_ref(),
        event: event.as_ref(),
    };
    let target = resolve_target(&form, &ctx);

    Ok(HttpResponse::Ok().json(ResolveResponse {
        resolvable: !target.is_empty(),
        target,
    }))
}

/// Small on-screen preview, no label band
pub async fn preview_qr(
    app_state: web::Data<AppState>,
    query: web::Query<PreviewParams>,
) -> Result<HttpResponse, QrError> {
    let svg = app_state.pipeline.preview(&query.target)?;
    Ok(HttpResponse::Ok().content_type("image/svg+xml").body(svg))
}

pub async fn create_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    web::Json(req): web::Json<CreateQrRequest>,
) -> Result<HttpResponse, QrError> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }
    // Rejected here so a blank title never reaches the catalogue or the store
    if req.title.trim().is_empty() {
        return Err(QrError::validation("Title is required"));
    }

    if let QrFormState::Document {
        upload: UploadState {
            document_url: Some(url),
            ..
        },
    } = &req.form
    {
        app_state.uploader.verify_document(&user.id, url).await?;
    }

    let (project, event) = load_selection(&app_state, &user, &req.form).await?;
    let ctx = ResolveContext {
        base_url: &app_state.base_url,
        username: &user.username,
        project: project.as_ref(),
        event: event.as_ref(),
    };
    let target = resolve(&req.form, &ctx)?;

    let record = app_state
        .registry
        .create(&user.id, &req.title, req.description.as_deref(), target)
        .await?;

    Ok(HttpResponse::Created().json(CreateQrResponse {
        qr_code: QrCodeResponse::from(record),
        form: req.form.reset(),
    }))
}

pub async fn list_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    query: web::Query<ListQrParams>,
) -> Result<HttpResponse, QrError> {
    let records = app_state.registry.list(&user.id, query.filter).await?;
    let response: Vec<QrCodeResponse> = records.into_iter().map(QrCodeResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Soft-delete a QR code and return what is still listed
pub async fn deactivate_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<String>,
    query: web::Query<DeactivateParams>,
) -> Result<HttpResponse, QrError> {
    if !query.confirm {
        return Err(QrError::validation("Deactivation must be confirmed"));
    }
    let id = path.into_inner();
    let mut listing = app_state.registry.listing(&user.id).await?;
    app_state
        .registry
        .deactivate_in(&mut listing, &user.id, &id, query.confirm)
        .await?;

    let response: Vec<QrCodeResponse> = listing
        .into_filtered(query.filter)
        .into_iter()
        .map(QrCodeResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(response))
}

pub async fn export_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<(String, ExportFormat)>,
) -> Result<HttpResponse, QrError> {
    let (id, format) = path.into_inner();
    let record = app_state.registry.find(&user.id, &id).await?;

    app_state
        .pipeline
        .export(format, &record.target_url, &record.title)
        .await
        .map(attachment)
        .ok_or_else(|| QrError::render(format!("{} export failed for {}", format.extension(), id)))
}

/// Labelled raster as a data URL, `null` if it could not be rendered
pub async fn raster_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<String>,
) -> Result<HttpResponse, QrError> {
    let record = app_state.registry.find(&user.id, &path.into_inner()).await?;
    let data_url = app_state.pipeline.raster_data_url(&record.target_url).await;
    Ok(HttpResponse::Ok().json(RasterResponse { data_url }))
}

/// Download before the code is saved
pub async fn export_adhoc(
    app_state: web::Data<AppState>,
    path: web::Path<ExportFormat>,
    web::Json(req): web::Json<AdhocExportRequest>,
) -> Result<HttpResponse, QrError> {
    let format = path.into_inner();
    app_state
        .pipeline
        .export(format, &req.target, &req.title)
        .await
        .map(attachment)
        .ok_or_else(|| QrError::render(format!("{} export failed", format.extension())))
}

pub async fn copy_qr(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    path: web::Path<String>,
) -> Result<HttpResponse, QrError> {
    let outcome = app_state
        .registry
        .copy_target(&user.id, CopySource::Record(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

pub async fn copy_adhoc(
    app_state: web::Data<AppState>,
    user: web::ReqData<AuthUser>,
    web::Json(req): web::Json<CopyRequest>,
) -> Result<HttpResponse, QrError> {
    let outcome = app_state
        .registry
        .copy_target(&user.id, CopySource::Adhoc(req.text))
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}
