//! Domain model for the Brigade services.
//!
//! # Design
//! These are the caller-facing shapes: Rust-native field names and closed
//! enums, defined independently of the snake_case/proto-string wire schema
//! each client keeps private. Every enumerated field always resolves to a
//! value in its closed set — unknown wire strings are coerced to a fixed
//! default by `from_wire`, never left dangling. `from_wire_strict` exists
//! so tests and callers that care about server/client drift can detect
//! what the lenient decode absorbs.

use serde::{Deserialize, Serialize};

/// Free-form job metadata; always a plain JSON object on the domain side.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Enums and their wire translation tables
// ---------------------------------------------------------------------------

/// Account role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Chef,
    Restaurant,
}

impl UserRole {
    /// Wire encoding. Total: every role has one.
    pub fn to_wire(self) -> &'static str {
        match self {
            UserRole::Chef => "USER_ROLE_CHEF",
            UserRole::Restaurant => "USER_ROLE_RESTAURANT",
        }
    }

    /// Strict decode: `None` for unrecognized wire strings.
    pub fn from_wire_strict(wire: &str) -> Option<Self> {
        match wire {
            "USER_ROLE_CHEF" => Some(UserRole::Chef),
            "USER_ROLE_RESTAURANT" => Some(UserRole::Restaurant),
            _ => None,
        }
    }

    /// Lenient decode: unrecognized or missing wire strings fall back to
    /// `Chef`, so a newer server never breaks an older client.
    pub fn from_wire(wire: &str) -> Self {
        Self::from_wire_strict(wire).unwrap_or(UserRole::Chef)
    }
}

/// Publication state of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
}

impl JobStatus {
    pub fn to_wire(self) -> &'static str {
        match self {
            JobStatus::Draft => "JOB_STATUS_DRAFT",
            JobStatus::Published => "JOB_STATUS_PUBLISHED",
            JobStatus::Closed => "JOB_STATUS_CLOSED",
        }
    }

    pub fn from_wire_strict(wire: &str) -> Option<Self> {
        match wire {
            "JOB_STATUS_DRAFT" => Some(JobStatus::Draft),
            "JOB_STATUS_PUBLISHED" => Some(JobStatus::Published),
            "JOB_STATUS_CLOSED" => Some(JobStatus::Closed),
            _ => None,
        }
    }

    /// Lenient decode; falls back to `Draft`.
    pub fn from_wire(wire: &str) -> Self {
        Self::from_wire_strict(wire).unwrap_or(JobStatus::Draft)
    }
}

/// Review state of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn to_wire(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "APPLICATION_STATUS_PENDING",
            ApplicationStatus::Accepted => "APPLICATION_STATUS_ACCEPTED",
            ApplicationStatus::Rejected => "APPLICATION_STATUS_REJECTED",
        }
    }

    pub fn from_wire_strict(wire: &str) -> Option<Self> {
        match wire {
            "APPLICATION_STATUS_PENDING" => Some(ApplicationStatus::Pending),
            "APPLICATION_STATUS_ACCEPTED" => Some(ApplicationStatus::Accepted),
            "APPLICATION_STATUS_REJECTED" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// Lenient decode; falls back to `Pending`.
    pub fn from_wire(wire: &str) -> Self {
        Self::from_wire_strict(wire).unwrap_or(ApplicationStatus::Pending)
    }
}

/// Normalize a proto3 string id: empty means unset.
pub(crate) fn optional_id(id: String) -> Option<String> {
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// An authenticated account. IDs are opaque server-assigned strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

/// Access/refresh token pair issued at register, login, and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of `register` and `login`: the account plus its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub tokens: AuthTokens,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterParams {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Chef profiles
// ---------------------------------------------------------------------------

/// A portfolio entry. `id` is `None` for items not yet saved server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: Option<String>,
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChefProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub headline: String,
    pub summary: String,
    pub location: String,
    pub years_experience: u32,
    pub availability: String,
    pub specialties: Vec<String>,
    pub work_areas: Vec<String>,
    pub languages: Vec<String>,
    pub bio: String,
    pub learning_focus: Vec<String>,
    /// Opaque serialized skill-tree JSON; round-trips untouched.
    pub skill_tree_json: String,
    pub portfolio_items: Vec<PortfolioItem>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChefProfileParams {
    pub full_name: String,
    pub headline: String,
    pub summary: String,
    pub location: String,
    pub years_experience: u32,
    pub availability: String,
    pub specialties: Vec<String>,
    pub work_areas: Vec<String>,
    pub languages: Vec<String>,
    pub bio: String,
    pub learning_focus: Vec<String>,
    pub skill_tree_json: String,
    /// Items with `id: None` are created; items with an id are kept.
    pub portfolio_items: Vec<PortfolioItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChefProfileParams {
    pub profile_id: String,
    pub profile: CreateChefProfileParams,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChefSearchParams {
    pub specialties: Option<Vec<String>>,
    pub work_areas: Option<Vec<String>>,
    /// Defaults to 10 when unset.
    pub limit: Option<u32>,
    /// Defaults to 0 when unset.
    pub offset: Option<u32>,
}

// ---------------------------------------------------------------------------
// Restaurant profiles
// ---------------------------------------------------------------------------

/// A mentorship/learning highlight offered by a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningHighlight {
    pub id: Option<String>,
    pub title: String,
    pub duration: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantProfile {
    pub id: String,
    pub user_id: String,
    pub display_name: String,
    pub tagline: String,
    pub location: String,
    pub seats: u32,
    pub cuisine_types: Vec<String>,
    pub mentorship_style: String,
    pub description: String,
    pub culture_keywords: Vec<String>,
    pub benefits: Vec<String>,
    pub support_programs: Vec<String>,
    pub learning_highlights: Vec<LearningHighlight>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantProfileParams {
    pub display_name: String,
    pub tagline: String,
    pub location: String,
    pub seats: u32,
    pub cuisine_types: Vec<String>,
    pub mentorship_style: String,
    pub description: String,
    pub culture_keywords: Vec<String>,
    pub benefits: Vec<String>,
    pub support_programs: Vec<String>,
    pub learning_highlights: Vec<LearningHighlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRestaurantProfileParams {
    pub profile_id: String,
    pub profile: CreateRestaurantProfileParams,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantSearchParams {
    pub cuisine_types: Option<Vec<String>>,
    /// Substring match on the display name.
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ---------------------------------------------------------------------------
// Jobs and applications
// ---------------------------------------------------------------------------

/// A job posting. The optional `restaurant_*` fields are flattened from
/// the restaurant summary the server may embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub restaurant_id: String,
    pub restaurant_name: Option<String>,
    pub restaurant_location: Option<String>,
    pub restaurant_tagline: Option<String>,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub employment_type: Option<String>,
    pub status: JobStatus,
    /// Always present and always a plain object; unparsable wire metadata
    /// decodes to an empty map.
    pub metadata: Metadata,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial projection of a job embedded inside an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub status: JobStatus,
    pub restaurant_name: Option<String>,
}

/// Partial projection of a chef profile embedded inside an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChefSummary {
    pub profile_id: String,
    pub full_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub job_id: String,
    pub chef_profile_id: String,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Mapped only when the server embeds it; genuinely optional.
    pub job: Option<JobSummary>,
    pub chef: Option<ChefSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobParams {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub employment_type: Option<String>,
    /// Omitted from the request when `None`; the server defaults it.
    pub status: Option<JobStatus>,
    pub metadata: Option<Metadata>,
}

/// Only the supplied fields are sent; omitted fields stay unchanged
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobParams {
    pub job_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub employment_type: Option<String>,
    pub status: Option<JobStatus>,
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSearchParams {
    pub keyword: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub location: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplicationParams {
    pub job_id: String,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusParams {
    pub application_id: String,
    pub status: ApplicationStatus,
}

/// Page of jobs plus the total match count reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListResult {
    pub jobs: Vec<Job>,
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_round_trip() {
        for role in [UserRole::Chef, UserRole::Restaurant] {
            assert_eq!(UserRole::from_wire(role.to_wire()), role);
            assert_eq!(UserRole::from_wire_strict(role.to_wire()), Some(role));
        }
    }

    #[test]
    fn job_status_wire_round_trip() {
        for status in [JobStatus::Draft, JobStatus::Published, JobStatus::Closed] {
            assert_eq!(JobStatus::from_wire(status.to_wire()), status);
        }
    }

    #[test]
    fn application_status_wire_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::from_wire(status.to_wire()), status);
        }
    }

    #[test]
    fn unrecognized_wire_strings_fall_back_to_documented_defaults() {
        assert_eq!(UserRole::from_wire("USER_ROLE_ADMIN"), UserRole::Chef);
        assert_eq!(UserRole::from_wire(""), UserRole::Chef);
        assert_eq!(JobStatus::from_wire("JOB_STATUS_ARCHIVED"), JobStatus::Draft);
        assert_eq!(
            ApplicationStatus::from_wire("APPLICATION_STATUS_WITHDRAWN"),
            ApplicationStatus::Pending
        );
    }

    #[test]
    fn strict_decode_reports_drift_instead_of_defaulting() {
        assert_eq!(UserRole::from_wire_strict("USER_ROLE_ADMIN"), None);
        assert_eq!(JobStatus::from_wire_strict(""), None);
        assert_eq!(
            ApplicationStatus::from_wire_strict("APPLICATION_STATUS_WITHDRAWN"),
            None
        );
    }

    #[test]
    fn empty_proto_id_normalizes_to_none() {
        assert_eq!(optional_id(String::new()), None);
        assert_eq!(optional_id("p1".to_string()), Some("p1".to_string()));
    }
}
