//! Client for `job.v1.JobService`: job postings and applications.
//!
//! # Design
//! Two wire quirks live here. `metadata` travels as an opaque JSON string
//! (`metadata_json`); it is stringified on the way out and parsed
//! leniently on the way in, so the caller always sees a plain object.
//! `total_count` arrives as a JSON number or a decimal string (the proto3
//! int64 JSON form) and is coerced to a number, non-numeric input counting
//! as zero. Embedded job/chef summaries are mapped only when present —
//! the one place optional mapping, not defaulting, is used.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{ClientOptions, Transport};
use crate::types::{
    ApplicationStatus, ChefSummary, CreateApplicationParams, CreateJobParams, Job, JobApplication,
    JobListResult, JobSearchParams, JobStatus, JobSummary, ListParams, Metadata,
    UpdateApplicationStatusParams, UpdateJobParams,
};

const SERVICE: &str = "job.v1.JobService";

#[derive(Serialize)]
struct WireCreateJobRequest<'a> {
    title: &'a str,
    description: &'a str,
    required_skills: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salary_range: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    employment_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata_json: Option<String>,
}

#[derive(Serialize)]
struct WireUpdateJobRequest<'a> {
    job_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_skills: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salary_range: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    employment_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata_json: Option<String>,
}

#[derive(Serialize)]
struct WireGetJobRequest<'a> {
    job_id: &'a str,
}

#[derive(Serialize)]
struct WireListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[derive(Serialize)]
struct WireSearchJobsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_skills: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[derive(Serialize)]
struct WireCreateApplicationRequest<'a> {
    job_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_letter: Option<&'a str>,
}

#[derive(Serialize)]
struct WireUpdateApplicationStatusRequest<'a> {
    application_id: &'a str,
    status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRestaurantSummary {
    display_name: Option<String>,
    tagline: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireJob {
    id: String,
    restaurant_id: String,
    title: String,
    description: String,
    required_skills: Vec<String>,
    location: Option<String>,
    salary_range: Option<String>,
    employment_type: Option<String>,
    status: String,
    metadata_json: Option<String>,
    created_at: String,
    updated_at: String,
    restaurant: Option<WireRestaurantSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireJobResponse {
    job: WireJob,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireJobListResponse {
    jobs: Vec<WireJob>,
    total_count: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireJobSummary {
    id: String,
    title: String,
    status: String,
    restaurant_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireChefSummary {
    profile_id: String,
    full_name: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireApplication {
    id: String,
    job_id: String,
    chef_profile_id: String,
    status: String,
    cover_letter: Option<String>,
    created_at: String,
    updated_at: String,
    job: Option<WireJobSummary>,
    chef: Option<WireChefSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireApplicationResponse {
    application: WireApplication,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireApplicationListResponse {
    applications: Vec<WireApplication>,
}

/// Client for job posting and application operations.
#[derive(Debug, Clone)]
pub struct JobClient {
    transport: Transport,
}

impl JobClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            transport: Transport::new(options),
        }
    }

    pub fn create_job(
        &self,
        params: &CreateJobParams,
        access_token: &str,
    ) -> Result<Job, ApiError> {
        let request = WireCreateJobRequest {
            title: &params.title,
            description: &params.description,
            required_skills: &params.required_skills,
            location: params.location.as_deref(),
            salary_range: params.salary_range.as_deref(),
            employment_type: params.employment_type.as_deref(),
            status: params.status.map(JobStatus::to_wire),
            metadata_json: stringify_metadata(params.metadata.as_ref()),
        };
        let response: WireJobResponse = self.transport.invoke(
            &format!("{SERVICE}/CreateJob"),
            Some(&request),
            Some(access_token),
        )?;
        Ok(from_wire_job(response.job))
    }

    pub fn update_job(
        &self,
        params: &UpdateJobParams,
        access_token: &str,
    ) -> Result<Job, ApiError> {
        let request = WireUpdateJobRequest {
            job_id: &params.job_id,
            title: params.title.as_deref(),
            description: params.description.as_deref(),
            required_skills: params.required_skills.as_deref(),
            location: params.location.as_deref(),
            salary_range: params.salary_range.as_deref(),
            employment_type: params.employment_type.as_deref(),
            status: params.status.map(JobStatus::to_wire),
            metadata_json: stringify_metadata(params.metadata.as_ref()),
        };
        let response: WireJobResponse = self.transport.invoke(
            &format!("{SERVICE}/UpdateJob"),
            Some(&request),
            Some(access_token),
        )?;
        Ok(from_wire_job(response.job))
    }

    pub fn get_job(&self, job_id: &str, access_token: Option<&str>) -> Result<Job, ApiError> {
        let response: WireJobResponse = self.transport.invoke(
            &format!("{SERVICE}/GetJob"),
            Some(&WireGetJobRequest { job_id }),
            access_token,
        )?;
        Ok(from_wire_job(response.job))
    }

    /// Jobs owned by the bearer token's restaurant, with the server's
    /// total match count.
    pub fn list_my_jobs(
        &self,
        params: &ListParams,
        access_token: &str,
    ) -> Result<JobListResult, ApiError> {
        let response: WireJobListResponse = self.transport.invoke(
            &format!("{SERVICE}/ListMyJobs"),
            Some(&WireListRequest {
                limit: params.limit,
                offset: params.offset,
            }),
            Some(access_token),
        )?;
        Ok(to_list_result(response))
    }

    pub fn search_jobs(
        &self,
        params: &JobSearchParams,
        access_token: Option<&str>,
    ) -> Result<JobListResult, ApiError> {
        let request = WireSearchJobsRequest {
            keyword: params.keyword.as_deref(),
            required_skills: params.required_skills.as_deref(),
            location: params.location.as_deref(),
            limit: params.limit,
            offset: params.offset,
        };
        let response: WireJobListResponse = self.transport.invoke(
            &format!("{SERVICE}/SearchJobs"),
            Some(&request),
            access_token,
        )?;
        Ok(to_list_result(response))
    }

    pub fn create_application(
        &self,
        params: &CreateApplicationParams,
        access_token: &str,
    ) -> Result<JobApplication, ApiError> {
        let response: WireApplicationResponse = self.transport.invoke(
            &format!("{SERVICE}/CreateApplication"),
            Some(&WireCreateApplicationRequest {
                job_id: &params.job_id,
                cover_letter: params.cover_letter.as_deref(),
            }),
            Some(access_token),
        )?;
        Ok(from_wire_application(response.application))
    }

    pub fn list_applications_for_chef(
        &self,
        params: &ListParams,
        access_token: &str,
    ) -> Result<Vec<JobApplication>, ApiError> {
        let response: WireApplicationListResponse = self.transport.invoke(
            &format!("{SERVICE}/ListApplicationsForChef"),
            Some(&WireListRequest {
                limit: params.limit,
                offset: params.offset,
            }),
            Some(access_token),
        )?;
        Ok(response
            .applications
            .into_iter()
            .map(from_wire_application)
            .collect())
    }

    pub fn list_applications_for_restaurant(
        &self,
        params: &ListParams,
        access_token: &str,
    ) -> Result<Vec<JobApplication>, ApiError> {
        let response: WireApplicationListResponse = self.transport.invoke(
            &format!("{SERVICE}/ListApplicationsForRestaurant"),
            Some(&WireListRequest {
                limit: params.limit,
                offset: params.offset,
            }),
            Some(access_token),
        )?;
        Ok(response
            .applications
            .into_iter()
            .map(from_wire_application)
            .collect())
    }

    pub fn update_application_status(
        &self,
        params: &UpdateApplicationStatusParams,
        access_token: &str,
    ) -> Result<JobApplication, ApiError> {
        let response: WireApplicationResponse = self.transport.invoke(
            &format!("{SERVICE}/UpdateApplicationStatus"),
            Some(&WireUpdateApplicationStatusRequest {
                application_id: &params.application_id,
                status: params.status.to_wire(),
            }),
            Some(access_token),
        )?;
        Ok(from_wire_application(response.application))
    }
}

fn to_list_result(response: WireJobListResponse) -> JobListResult {
    JobListResult {
        total: parse_total(response.total_count.as_ref()),
        jobs: response.jobs.into_iter().map(from_wire_job).collect(),
    }
}

fn from_wire_job(job: WireJob) -> Job {
    let summary = job.restaurant.unwrap_or_default();
    Job {
        id: job.id,
        restaurant_id: job.restaurant_id,
        restaurant_name: summary.display_name,
        restaurant_location: summary.location,
        restaurant_tagline: summary.tagline,
        title: job.title,
        description: job.description,
        required_skills: job.required_skills,
        location: job.location,
        salary_range: job.salary_range,
        employment_type: job.employment_type,
        status: JobStatus::from_wire(&job.status),
        metadata: parse_metadata(job.metadata_json.as_deref()),
        created_at: job.created_at,
        updated_at: job.updated_at,
    }
}

fn from_wire_application(application: WireApplication) -> JobApplication {
    JobApplication {
        id: application.id,
        job_id: application.job_id,
        chef_profile_id: application.chef_profile_id,
        status: ApplicationStatus::from_wire(&application.status),
        cover_letter: application.cover_letter,
        created_at: application.created_at,
        updated_at: application.updated_at,
        job: application.job.map(|job| JobSummary {
            id: job.id,
            title: job.title,
            status: JobStatus::from_wire(&job.status),
            restaurant_name: job.restaurant_name,
        }),
        chef: application.chef.map(|chef| ChefSummary {
            profile_id: chef.profile_id,
            full_name: chef.full_name,
            location: chef.location,
        }),
    }
}

/// Serialize caller metadata for the wire. `None` stays omitted; a map
/// that cannot serialize degrades to `"{}"` rather than failing the call.
fn stringify_metadata(metadata: Option<&Metadata>) -> Option<String> {
    metadata.map(|map| serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string()))
}

/// Parse wire `metadata_json` leniently. Absent, empty, invalid JSON, and
/// JSON that is not an object all decode to an empty map.
fn parse_metadata(raw: Option<&str>) -> Metadata {
    let Some(raw) = raw else {
        return Metadata::new();
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => Metadata::new(),
    }
}

/// Coerce `total_count`, which arrives as a JSON number or a decimal
/// string (proto3 int64 JSON form). Anything else counts as zero.
fn parse_total(value: Option<&serde_json::Value>) -> u32 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0) as u32,
        Some(serde_json::Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}
