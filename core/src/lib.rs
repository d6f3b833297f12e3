//! Typed clients for the Brigade talent-marketplace RPC services.
//!
//! # Overview
//! Four service clients — identity, chef profiles, restaurant profiles,
//! jobs/applications — speak a Connect-style JSON-over-HTTP protocol:
//! every remote method is an HTTP POST to
//! `{base_url}/{package.Service}/{Method}` with snake_case JSON bodies and
//! protobuf-style enum strings. The clients translate that wire schema to
//! and from the Rust-native domain model in `types`.
//!
//! # Design
//! - One shared `Transport` (URL building, auth header, lenient decode,
//!   error normalization) is owned by every client; the clients themselves
//!   contain only wire↔domain mapping.
//! - Clients are stateless and cheap to clone: a base URL plus an
//!   `Arc<dyn HttpExecutor>`. No caching, retries, or cancellation — each
//!   method is exactly one round trip.
//! - The executor is injectable (`ClientOptions::http`), so tests run
//!   against scripted responses without a network.
//! - Decoding favors availability: unknown enum strings fall back to
//!   documented defaults and unparsable 2xx bodies decode as empty
//!   responses. Strict enum decode variants exist for drift detection.

pub mod chef;
pub mod error;
pub mod http;
pub mod identity;
pub mod job;
pub mod restaurant;
pub mod transport;
pub mod types;

pub use chef::ChefProfileClient;
pub use error::ApiError;
pub use http::{HttpExecutor, HttpRequest, HttpResponse, TransportError, UreqExecutor};
pub use identity::IdentityClient;
pub use job::JobClient;
pub use restaurant::RestaurantProfileClient;
pub use transport::{ClientOptions, DEFAULT_BASE_URL};
pub use types::{
    ApplicationStatus, AuthSession, AuthTokens, AuthUser, ChefProfile, ChefSearchParams,
    ChefSummary, CreateApplicationParams, CreateChefProfileParams, CreateJobParams,
    CreateRestaurantProfileParams, Job, JobApplication, JobListResult, JobSearchParams, JobStatus,
    JobSummary, LearningHighlight, ListParams, LoginParams, Metadata, PortfolioItem,
    RegisterParams, RestaurantProfile, RestaurantSearchParams, UpdateApplicationStatusParams,
    UpdateChefProfileParams, UpdateJobParams, UpdateRestaurantProfileParams, UserRole,
};
