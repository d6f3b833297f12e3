//! `chef.v1.ChefProfileService` and `restaurant.v1.RestaurantProfileService`
//! handlers. One profile per user; sub-items (portfolio entries, learning
//! highlights) arriving with an empty or missing id are minted fresh ids,
//! matching the proto3 "empty means new" convention the clients encode.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::{authenticate, intersects, new_id, now_rfc3339, rpc_error, Db, RpcError};

// ---------------------------------------------------------------------------
// Chef profiles
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize)]
pub struct PortfolioItemRecord {
    pub id: String,
    pub url: String,
    pub caption: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ChefProfileRecord {
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
    pub skill_tree_json: String,
    pub portfolio_items: Vec<PortfolioItemRecord>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioItemInput {
    pub id: String,
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChefProfileInput {
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
    pub portfolio_items: Vec<PortfolioItemInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateChefProfileInput {
    pub profile_id: String,
    #[serde(flatten)]
    pub profile: ChefProfileInput,
}

#[derive(Debug, Deserialize)]
pub struct GetProfileRequest {
    pub profile_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChefSearchInput {
    pub specialties: Vec<String>,
    pub work_areas: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Serialize)]
pub struct ChefProfileResponse {
    pub profile: ChefProfileRecord,
}

#[derive(Serialize)]
pub struct ChefSearchResponse {
    pub profiles: Vec<ChefProfileRecord>,
}

pub async fn chef_create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ChefProfileInput>,
) -> Result<Json<ChefProfileResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    if user.role != "USER_ROLE_CHEF" {
        return Err(rpc_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "chef account required",
        ));
    }

    let mut store = db.write().await;
    if store.chef_profiles.values().any(|p| p.user_id == user.id) {
        return Err(rpc_error(
            StatusCode::CONFLICT,
            "already_exists",
            "profile already exists",
        ));
    }

    let now = now_rfc3339();
    let record = ChefProfileRecord {
        id: new_id(),
        user_id: user.id,
        created_at: now.clone(),
        updated_at: now,
        ..chef_fields(input)
    };
    store.chef_profiles.insert(record.id.clone(), record.clone());
    Ok(Json(ChefProfileResponse { profile: record }))
}

pub async fn chef_get(
    State(db): State<Db>,
    Json(input): Json<GetProfileRequest>,
) -> Result<Json<ChefProfileResponse>, RpcError> {
    let store = db.read().await;
    let profile = store
        .chef_profiles
        .get(&input.profile_id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "profile not found"))?;
    Ok(Json(ChefProfileResponse { profile }))
}

pub async fn chef_get_my(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<ChefProfileResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    let profile = store
        .chef_profiles
        .values()
        .find(|p| p.user_id == user.id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "no profile"))?;
    Ok(Json(ChefProfileResponse { profile }))
}

pub async fn chef_update(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UpdateChefProfileInput>,
) -> Result<Json<ChefProfileResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    let existing = store
        .chef_profiles
        .get(&input.profile_id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "profile not found"))?;
    if existing.user_id != user.id {
        return Err(rpc_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "not your profile",
        ));
    }

    let record = ChefProfileRecord {
        id: existing.id.clone(),
        user_id: existing.user_id,
        created_at: existing.created_at,
        updated_at: now_rfc3339(),
        ..chef_fields(input.profile)
    };
    store.chef_profiles.insert(record.id.clone(), record.clone());
    Ok(Json(ChefProfileResponse { profile: record }))
}

pub async fn chef_search(
    State(db): State<Db>,
    Json(input): Json<ChefSearchInput>,
) -> Result<Json<ChefSearchResponse>, RpcError> {
    let store = db.read().await;
    let mut profiles: Vec<_> = store
        .chef_profiles
        .values()
        .filter(|p| intersects(&input.specialties, &p.specialties))
        .filter(|p| intersects(&input.work_areas, &p.work_areas))
        .cloned()
        .collect();
    profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    let offset = input.offset.unwrap_or(0) as usize;
    let limit = input.limit.unwrap_or(10) as usize;
    let profiles = profiles.into_iter().skip(offset).take(limit).collect();
    Ok(Json(ChefSearchResponse { profiles }))
}

/// Field carry-over shared by create and update; ids, owner, and
/// timestamps are set by the caller.
fn chef_fields(input: ChefProfileInput) -> ChefProfileRecord {
    ChefProfileRecord {
        full_name: input.full_name,
        headline: input.headline,
        summary: input.summary,
        location: input.location,
        years_experience: input.years_experience,
        availability: input.availability,
        specialties: input.specialties,
        work_areas: input.work_areas,
        languages: input.languages,
        bio: input.bio,
        learning_focus: input.learning_focus,
        skill_tree_json: input.skill_tree_json,
        portfolio_items: input
            .portfolio_items
            .into_iter()
            .map(|item| PortfolioItemRecord {
                id: if item.id.is_empty() { new_id() } else { item.id },
                url: item.url,
                caption: item.caption,
            })
            .collect(),
        ..ChefProfileRecord::default()
    }
}

// ---------------------------------------------------------------------------
// Restaurant profiles
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize)]
pub struct LearningHighlightRecord {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub detail: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RestaurantProfileRecord {
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
    pub learning_highlights: Vec<LearningHighlightRecord>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LearningHighlightInput {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub detail: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantProfileInput {
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
    pub learning_highlights: Vec<LearningHighlightInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRestaurantProfileInput {
    pub profile_id: String,
    #[serde(flatten)]
    pub profile: RestaurantProfileInput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantSearchInput {
    pub cuisine_types: Vec<String>,
    pub name: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Serialize)]
pub struct RestaurantProfileResponse {
    pub profile: RestaurantProfileRecord,
}

#[derive(Serialize)]
pub struct RestaurantSearchResponse {
    pub profiles: Vec<RestaurantProfileRecord>,
}

pub async fn restaurant_create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<RestaurantProfileInput>,
) -> Result<Json<RestaurantProfileResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    if user.role != "USER_ROLE_RESTAURANT" {
        return Err(rpc_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "restaurant account required",
        ));
    }

    let mut store = db.write().await;
    if store
        .restaurant_profiles
        .values()
        .any(|p| p.user_id == user.id)
    {
        return Err(rpc_error(
            StatusCode::CONFLICT,
            "already_exists",
            "profile already exists",
        ));
    }

    let now = now_rfc3339();
    let record = RestaurantProfileRecord {
        id: new_id(),
        user_id: user.id,
        created_at: now.clone(),
        updated_at: now,
        ..restaurant_fields(input)
    };
    store
        .restaurant_profiles
        .insert(record.id.clone(), record.clone());
    Ok(Json(RestaurantProfileResponse { profile: record }))
}

pub async fn restaurant_get(
    State(db): State<Db>,
    Json(input): Json<GetProfileRequest>,
) -> Result<Json<RestaurantProfileResponse>, RpcError> {
    let store = db.read().await;
    let profile = store
        .restaurant_profiles
        .get(&input.profile_id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "profile not found"))?;
    Ok(Json(RestaurantProfileResponse { profile }))
}

pub async fn restaurant_get_my(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<RestaurantProfileResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let store = db.read().await;
    let profile = store
        .restaurant_profiles
        .values()
        .find(|p| p.user_id == user.id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "no profile"))?;
    Ok(Json(RestaurantProfileResponse { profile }))
}

pub async fn restaurant_update(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UpdateRestaurantProfileInput>,
) -> Result<Json<RestaurantProfileResponse>, RpcError> {
    let user = authenticate(&db, &headers).await?;
    let mut store = db.write().await;
    let existing = store
        .restaurant_profiles
        .get(&input.profile_id)
        .cloned()
        .ok_or_else(|| rpc_error(StatusCode::NOT_FOUND, "not_found", "profile not found"))?;
    if existing.user_id != user.id {
        return Err(rpc_error(
            StatusCode::FORBIDDEN,
            "permission_denied",
            "not your profile",
        ));
    }

    let record = RestaurantProfileRecord {
        id: existing.id.clone(),
        user_id: existing.user_id,
        created_at: existing.created_at,
        updated_at: now_rfc3339(),
        ..restaurant_fields(input.profile)
    };
    store
        .restaurant_profiles
        .insert(record.id.clone(), record.clone());
    Ok(Json(RestaurantProfileResponse { profile: record }))
}

pub async fn restaurant_search(
    State(db): State<Db>,
    Json(input): Json<RestaurantSearchInput>,
) -> Result<Json<RestaurantSearchResponse>, RpcError> {
    let name = input.name.to_lowercase();
    let store = db.read().await;
    let mut profiles: Vec<_> = store
        .restaurant_profiles
        .values()
        .filter(|p| intersects(&input.cuisine_types, &p.cuisine_types))
        .filter(|p| name.is_empty() || p.display_name.to_lowercase().contains(&name))
        .cloned()
        .collect();
    profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    let offset = input.offset.unwrap_or(0) as usize;
    let limit = input.limit.unwrap_or(10) as usize;
    let profiles = profiles.into_iter().skip(offset).take(limit).collect();
    Ok(Json(RestaurantSearchResponse { profiles }))
}

fn restaurant_fields(input: RestaurantProfileInput) -> RestaurantProfileRecord {
    RestaurantProfileRecord {
        display_name: input.display_name,
        tagline: input.tagline,
        location: input.location,
        seats: input.seats,
        cuisine_types: input.cuisine_types,
        mentorship_style: input.mentorship_style,
        description: input.description,
        culture_keywords: input.culture_keywords,
        benefits: input.benefits,
        support_programs: input.support_programs,
        learning_highlights: input
            .learning_highlights
            .into_iter()
            .map(|item| LearningHighlightRecord {
                id: if item.id.is_empty() { new_id() } else { item.id },
                title: item.title,
                duration: item.duration,
                detail: item.detail,
            })
            .collect(),
        ..RestaurantProfileRecord::default()
    }
}
