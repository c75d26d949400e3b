//! Stub of the job portal's company endpoints.
//!
//! Companies live in memory and every update request is recorded so tests
//! can inspect exactly what the client sent.

use std::collections::BTreeMap;
use std::sync::Mutex;

use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use jiff::Timestamp;
use payloads::{Company, CompanyId, responses};
use uuid::Uuid;

pub const NOT_FOUND_MESSAGE: &str = "Company not found.";
pub const MISSING_MESSAGE: &str = "Something is missing.";
pub const NAME_TAKEN_MESSAGE: &str = "Company name already taken.";
pub const UPDATED_MESSAGE: &str = "Company information updated.";

/// What the stub saw for one update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub company_id: CompanyId,
    pub content_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub file: Option<RecordedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

/// A canned answer for the next update request.
#[derive(Debug, Clone)]
struct ForcedResponse {
    status: u16,
    body: String,
}

#[derive(Default)]
pub struct StubState {
    companies: Mutex<BTreeMap<CompanyId, Company>>,
    updates: Mutex<Vec<RecordedUpdate>>,
    next_update_response: Mutex<Option<ForcedResponse>>,
}

impl StubState {
    /// Store a new company, assigning it a fresh id.
    pub fn insert_company(
        &self,
        name: &str,
        description: &str,
        website: &str,
        location: &str,
    ) -> Company {
        let company = Company {
            id: CompanyId(Uuid::new_v4().simple().to_string()),
            name: name.to_string(),
            description: description.to_string(),
            website: website.to_string(),
            location: location.to_string(),
            logo: None,
            updated_at: Some(Timestamp::now()),
        };
        self.companies
            .lock()
            .unwrap()
            .insert(company.id.clone(), company.clone());
        company
    }

    pub fn company(&self, company_id: &CompanyId) -> Option<Company> {
        self.companies.lock().unwrap().get(company_id).cloned()
    }

    pub fn companies(&self) -> Vec<Company> {
        self.companies.lock().unwrap().values().cloned().collect()
    }

    pub fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Answer the next update request with `status` and a raw `body`,
    /// without touching the stored company.
    pub fn force_next_update(&self, status: u16, body: impl Into<String>) {
        *self.next_update_response.lock().unwrap() = Some(ForcedResponse {
            status,
            body: body.into(),
        });
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/company")
            .route("/get", web::get().to(list_companies))
            .route("/get/{company_id}", web::get().to(get_company))
            .route("/update/{company_id}", web::put().to(update_company)),
    );
}

#[derive(MultipartForm)]
pub struct UpdateCompanyForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub website: Option<Text<String>>,
    pub location: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub file: Option<Bytes>,
}

fn envelope(status: StatusCode, success: bool, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(responses::SuccessEnvelope {
        success,
        message: message.to_string(),
    })
}

async fn list_companies(stub: web::Data<StubState>) -> HttpResponse {
    HttpResponse::Ok().json(responses::CompaniesResponse {
        success: true,
        companies: stub.companies(),
    })
}

async fn get_company(
    path: web::Path<String>,
    stub: web::Data<StubState>,
) -> HttpResponse {
    let company_id = CompanyId(path.into_inner());
    match stub.company(&company_id) {
        Some(company) => HttpResponse::Ok().json(responses::CompanyResponse {
            success: true,
            company,
        }),
        None => envelope(StatusCode::NOT_FOUND, false, NOT_FOUND_MESSAGE),
    }
}

#[tracing::instrument(skip_all, fields(company_id = %path.as_str()))]
async fn update_company(
    req: HttpRequest,
    path: web::Path<String>,
    stub: web::Data<StubState>,
    form: MultipartForm<UpdateCompanyForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let recorded = RecordedUpdate {
        company_id: CompanyId(path.into_inner()),
        content_type: req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        name: form.name.map(Text::into_inner),
        description: form.description.map(Text::into_inner),
        website: form.website.map(Text::into_inner),
        location: form.location.map(Text::into_inner),
        file: form.file.map(|file| RecordedFile {
            file_name: file.file_name,
            content_type: file.content_type.map(|mime| mime.to_string()),
            len: file.data.len(),
        }),
    };
    stub.updates.lock().unwrap().push(recorded.clone());
    tracing::debug!(has_file = recorded.file.is_some(), "update recorded");

    if let Some(forced) = stub.next_update_response.lock().unwrap().take() {
        let status = StatusCode::from_u16(forced.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return HttpResponse::build(status).body(forced.body);
    }

    let (Some(name), Some(description), Some(website), Some(location)) = (
        recorded.name,
        recorded.description,
        recorded.website,
        recorded.location,
    ) else {
        return envelope(StatusCode::BAD_REQUEST, false, MISSING_MESSAGE);
    };

    let mut companies = stub.companies.lock().unwrap();
    let name_taken = companies
        .values()
        .any(|other| other.id != recorded.company_id && other.name == name);
    if name_taken {
        return envelope(StatusCode::BAD_REQUEST, false, NAME_TAKEN_MESSAGE);
    }
    let Some(company) = companies.get_mut(&recorded.company_id) else {
        return envelope(StatusCode::NOT_FOUND, false, NOT_FOUND_MESSAGE);
    };

    company.name = name;
    company.description = description;
    company.website = website;
    company.location = location;
    if let Some(file) = recorded.file {
        let file_name = file.file_name.unwrap_or_else(|| "logo".to_string());
        company.logo = Some(format!("/logos/{}/{file_name}", company.id));
    }
    company.updated_at = Some(Timestamp::now());

    envelope(StatusCode::OK, true, UPDATED_MESSAGE)
}
