//! `job.v1.JobService` handlers.
//!
//! `total_count` is serialized as a decimal string — the proto3 int64 JSON
//! form the production backend emits — so client-side coercion gets
//! exercised end-to-end. Job and application views embed the same
//! restaurant/job/chef summaries the real backend joins in.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::profile::{ChefProfileRecord, RestaurantProfileRecord};
use crate::{authenticate, intersects, new_id, now_rfc3339, rpc_error, Db, RpcError, Store};

const APPLICATION_STATUSES: [&str; 3] = [
    "APPLICATION_STATUS_PENDING",
    "APPLICATION_STATUS_ACCEPTED",
    "APPLICATION_STATUS_REJECTED",
];

#[derive(Clone, Debug, Default, Serialize)]
pub struct JobRecord {
    pub id: String,
    pub restaurant_id: String,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub job_id: String,
    pub chef_profile_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct RestaurantSummary {
    pub id: String,
    pub display_name: String,
    pub tagline: String,
    pub location: String,
}

#[derive(Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: JobRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RestaurantSummary>,
}

#[derive(Serialize)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
}

#[derive(Serialize)]
pub struct ChefSummary {
    pub profile_id: String,
    pub full_name: String,
    pub location: String,
}

#[derive(Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chef: Option<ChefSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateJobInput {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub employment_type: Option<String>,
    pub status: Option<String>,
    pub metadata_json: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateJobInput {
    pub job_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub employment_type: Option<String>,
    pub status: Option<String>,
    pub metadata_json: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetJobRequest {
    pub job_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListInput {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchJobsInput {
    pub keyword: Option<String>,
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateApplicationInput {
    pub job_id: String,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateApplicationStatusInput {
    pub application_id: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobView,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobView>,
    /// Decimal string, proto3 int64 JSON form.
    pub total_count: String,
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub application: ApplicationView,
}

#[derive(Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationView>,
}

pub async fn create_job(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateJobInput>,
) -> Result<Json<JobResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    if input.title.is_empty() || input.description.is_empty() {
        return Err(rpc_error(
            StatusCode::BAD_REQUEST,
            "invalid_argument",
            "title and description are required",
        ));
    }

    let mut store = db.write().await;
    let restaurant = my_restaurant(&store, &user.id)?;

    let now = now_rfc3339();
    let record = JobRecord {
        id: new_id(),
        restaurant_id: restaurant.id,
        title: input.title,
        description: input.description,
        required_skills: input.required_skills,
        location: input.location,
        salary_range: input.salary_range,
        employment_type: input.employment_type,
        status: input
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "JOB_STATUS_DRAFT".to_string()),
        metadata_json: input.metadata_json,
        created_at: now.clone(),
        updated_at: now,
    };
    store.jobs.insert(record.id.clone(), record.clone());
    let view = job_view(&store, record);
    Ok(Json(JobResponse { job: view }))
}

pub async fn update_job(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<JobResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    let restaurant = my_restaurant(&store, &user.id)?;

    let job = store
        .jobs
        .get_mut(&input.job_id)
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "job not found"))?;
    if job.restaurant_id != restaurant.id {
        return Err(rpc_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "not your job",
        ));
    }

    if let Some(title) = input.title {
        job.title = title;
    }
    if let Some(description) = input.description {
        job.description = description;
    }
    if let Some(required_skills) = input.required_skills {
        job.required_skills = required_skills;
    }
    if let Some(location) = input.location {
        job.location = Some(location);
    }
    if let Some(salary_range) = input.salary_range {
        job.salary_range = Some(salary_range);
    }
    if let Some(employment_type) = input.employment_type {
        job.employment_type = Some(employment_type);
    }
    if let Some(status) = input.status {
        job.status = status;
    }
    if let Some(metadata_json) = input.metadata_json {
        job.metadata_json = Some(metadata_json);
    }
    job.updated_at = now_rfc3339();

    let record = job.clone();
    let view = job_view(&store, record);
    Ok(Json(JobResponse { job: view }))
}

pub async fn get_job(
    State(db): State<Db>,
    Json(input): Json<GetJobRequest>,
) -> Result<Json<JobResponse>, RpcError> {
    let store = db.read().await;
    let record = store
        .jobs
        .get(&input.job_id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "job not found"))?;
    let view = job_view(&store, record);
    Ok(Json(JobResponse { job: view }))
}

pub async fn list_my_jobs(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ListInput>,
) -> Result<Json<JobListResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    let restaurant = my_restaurant(&store, &user.id)?;

    let mut records: Vec<_> = store
        .jobs
        .values()
        .filter(|j| j.restaurant_id == restaurant.id)
        .cloned()
        .collect();
    sort_jobs(&mut records);
    Ok(Json(paginate_jobs(&store, records, input.limit, input.offset)))
}

pub async fn search_jobs(
    State(db): State<Db>,
    Json(input): Json<SearchJobsInput>,
) -> Result<Json<JobListResponse>, RpcError> {
    let keyword = input.keyword.unwrap_or_default().to_lowercase();
    let location = input.location.unwrap_or_default().to_lowercase();

    let store = db.read().await;
    let mut records: Vec<_> = store
        .jobs
        .values()
        .filter(|j| j.status == "JOB_STATUS_PUBLISHED")
        .filter(|j| {
            keyword.is_empty()
                || j.title.to_lowercase().contains(&keyword)
                || j.description.to_lowercase().contains(&keyword)
        })
        .filter(|j| intersects(&input.required_skills, &j.required_skills))
        .filter(|j| {
            location.is_empty()
                || j.location
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains(&location))
        })
        .cloned()
        .collect();
    sort_jobs(&mut records);
    Ok(Json(paginate_jobs(&store, records, input.limit, input.offset)))
}

pub async fn create_application(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateApplicationInput>,
) -> Result<Json<ApplicationResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    let chef = my_chef_profile(&store, &user.id)?;

    if !store.jobs.contains_key(&input.job_id) {
        return Err(rpc_error(StatusCode::NOT_FOUND, "not_found", "job not found"));
    }
    if store
        .applications
        .values()
        .any(|a| a.job_id == input.job_id && a.chef_profile_id == chef.id)
    {
        return Err(rpc_error(
            StatusCode::CONFLICT,
            "already_exists",
            "already applied to this job",
        ));
    }

    let now = now_rfc3339();
    let record = ApplicationRecord {
        id: new_id(),
        job_id: input.job_id,
        chef_profile_id: chef.id,
        status: "APPLICATION_STATUS_PENDING".to_string(),
        cover_letter: input.cover_letter,
        created_at: now.clone(),
        updated_at: now,
    };
    store.applications.insert(record.id.clone(), record.clone());
    let view = application_view(&store, record);
    Ok(Json(ApplicationResponse { application: view }))
}

pub async fn list_applications_for_chef(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ListInput>,
) -> Result<Json<ApplicationListResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    let chef = my_chef_profile(&store, &user.id)?;

    let mut records: Vec<_> = store
        .applications
        .values()
        .filter(|a| a.chef_profile_id == chef.id)
        .cloned()
        .collect();
    Ok(Json(paginate_applications(
        &store,
        &mut records,
        input.limit,
        input.offset,
    )))
}

pub async fn list_applications_for_restaurant(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ListInput>,
) -> Result<Json<ApplicationListResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    let restaurant = my_restaurant(&store, &user.id)?;

    let mut records: Vec<_> = store
        .applications
        .values()
        .filter(|a| {
            store
                .jobs
                .get(&a.job_id)
                .is_some_and(|j| j.restaurant_id == restaurant.id)
        })
        .cloned()
        .collect();
    Ok(Json(paginate_applications(
        &store,
        &mut records,
        input.limit,
        input.offset,
    )))
}

pub async fn update_application_status(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UpdateApplicationStatusInput>,
) -> Result<Json<ApplicationResponse>, RpcError> {
    if !APPLICATION_STATUSES.contains(&input.status.as_str()) {
        return Err(rpc_error(
            StatusCode::BAD_REQUEST,
            "invalid_argument",
            "unknown application status",
        ));
    }

    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    let restaurant = my_restaurant(&store, &user.id)?;

    let existing = store
        .applications
        .get(&input.application_id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "application not found"))?;
    let owns_job = store
        .jobs
        .get(&existing.job_id)
        .is_some_and(|j| j.restaurant_id == restaurant.id);
    if !owns_job {
        return Err(rpc_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "not your job",
        ));
    }

    let record = {
        let application = store
            .applications
            .get_mut(&input.application_id)
            .ok_or_else(|| {
                rpc_error(StatusCode::NOT_FOUND, "not_found", "application not found")
            })?;
        application.status = input.status;
        application.updated_at = now_rfc3339();
        application.clone()
    };
    let view = application_view(&store, record);
    Ok(Json(ApplicationResponse { application: view }))
}

fn my_restaurant(store: &Store, user_id: &str) -> Result<RestaurantProfileRecord, RpcError> {
    store
        .restaurant_profiles
        .values()
        .find(|p| p.user_id == user_id)
        .cloned()
        .ok_or_else(|| {
            rpc_error(
                StatusCode::PRECONDITION_FAILED,
                "failed_precondition",
                "restaurant profile required",
            )
        })
}

fn my_chef_profile(store: &Store, user_id: &str) -> Result<ChefProfileRecord, RpcError> {
    store
        .chef_profiles
        .values()
        .find(|p| p.user_id == user_id)
        .cloned()
        .ok_or_else(|| {
            rpc_error(
                StatusCode::PRECONDITION_FAILED,
                "failed_precondition",
                "chef profile required",
            )
        })
}

fn job_view(store: &Store, record: JobRecord) -> JobView {
    let restaurant = store
        .restaurant_profiles
        .get(&record.restaurant_id)
        .map(|p| RestaurantSummary {
            id: p.id.clone(),
            display_name: p.display_name.clone(),
            tagline: p.tagline.clone(),
            location: p.location.clone(),
        });
    JobView {
        job: record,
        restaurant,
    }
}

fn application_view(store: &Store, record: ApplicationRecord) -> ApplicationView {
    let job = store.jobs.get(&record.job_id).map(|j| JobSummary {
        id: j.id.clone(),
        title: j.title.clone(),
        status: j.status.clone(),
        restaurant_name: store
            .restaurant_profiles
            .get(&j.restaurant_id)
            .map(|p| p.display_name.clone()),
    });
    let chef = store
        .chef_profiles
        .get(&record.chef_profile_id)
        .map(|p| ChefSummary {
            profile_id: p.id.clone(),
            full_name: p.full_name.clone(),
            location: p.location.clone(),
        });
    ApplicationView {
        application: record,
        job,
        chef,
    }
}

fn sort_jobs(records: &mut [JobRecord]) {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

fn paginate_jobs(
    store: &Store,
    records: Vec<JobRecord>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> JobListResponse {
    let total = records.len();
    let jobs = records
        .into_iter()
        .skip(offset.unwrap_or(0) as usize)
        .take(limit.unwrap_or(50) as usize)
        .map(|record| job_view(store, record))
        .collect();
    JobListResponse {
        jobs,
        total_count: total.to_string(),
    }
}

fn paginate_applications(
    store: &Store,
    records: &mut Vec<ApplicationRecord>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> ApplicationListResponse {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    let applications = records
        .iter()
        .skip(offset.unwrap_or(0) as usize)
        .take(limit.unwrap_or(50) as usize)
        .map(|record| application_view(store, record.clone()))
        .collect();
    ApplicationListResponse { applications }
}
