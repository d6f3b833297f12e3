//! Client for `restaurant.v1.RestaurantProfileService`.
//!
//! Mirrors the chef profile client: create requests serialize learning
//! highlights without ids, update requests carry each highlight's id with
//! empty string meaning "new".

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{ClientOptions, EmptyBody, Transport};
use crate::types::{
    optional_id, CreateRestaurantProfileParams, LearningHighlight, RestaurantProfile,
    RestaurantSearchParams, UpdateRestaurantProfileParams,
};

const SERVICE: &str = "restaurant.v1.RestaurantProfileService";

#[derive(Serialize)]
struct WireNewHighlight<'a> {
    title: &'a str,
    duration: &'a str,
    detail: &'a str,
}

#[derive(Serialize)]
struct WireKeptHighlight<'a> {
    id: &'a str,
    title: &'a str,
    duration: &'a str,
    detail: &'a str,
}

#[derive(Serialize)]
struct WireCreateProfileRequest<'a> {
    display_name: &'a str,
    tagline: &'a str,
    location: &'a str,
    seats: u32,
    cuisine_types: &'a [String],
    mentorship_style: &'a str,
    description: &'a str,
    culture_keywords: &'a [String],
    benefits: &'a [String],
    support_programs: &'a [String],
    learning_highlights: Vec<WireNewHighlight<'a>>,
}

#[derive(Serialize)]
struct WireUpdateProfileRequest<'a> {
    profile_id: &'a str,
    display_name: &'a str,
    tagline: &'a str,
    location: &'a str,
    seats: u32,
    cuisine_types: &'a [String],
    mentorship_style: &'a str,
    description: &'a str,
    culture_keywords: &'a [String],
    benefits: &'a [String],
    support_programs: &'a [String],
    learning_highlights: Vec<WireKeptHighlight<'a>>,
}

#[derive(Serialize)]
struct WireGetProfileRequest<'a> {
    profile_id: &'a str,
}

#[derive(Serialize)]
struct WireSearchProfilesRequest<'a> {
    cuisine_types: &'a [String],
    name: &'a str,
    limit: u32,
    offset: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireLearningHighlight {
    id: String,
    title: String,
    duration: String,
    detail: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRestaurantProfile {
    id: String,
    user_id: String,
    display_name: String,
    tagline: String,
    location: String,
    seats: u32,
    cuisine_types: Vec<String>,
    mentorship_style: String,
    description: String,
    culture_keywords: Vec<String>,
    benefits: Vec<String>,
    support_programs: Vec<String>,
    learning_highlights: Vec<WireLearningHighlight>,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProfileResponse {
    profile: WireRestaurantProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSearchProfilesResponse {
    profiles: Vec<WireRestaurantProfile>,
}

/// Client for restaurant profile operations.
#[derive(Debug, Clone)]
pub struct RestaurantProfileClient {
    transport: Transport,
}

impl RestaurantProfileClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            transport: Transport::new(options),
        }
    }

    pub fn create_profile(
        &self,
        params: &CreateRestaurantProfileParams,
        access_token: &str,
    ) -> Result<RestaurantProfile, ApiError> {
        let request = WireCreateProfileRequest {
            display_name: &params.display_name,
            tagline: &params.tagline,
            location: &params.location,
            seats: params.seats,
            cuisine_types: &params.cuisine_types,
            mentorship_style: &params.mentorship_style,
            description: &params.description,
            culture_keywords: &params.culture_keywords,
            benefits: &params.benefits,
            support_programs: &params.support_programs,
            learning_highlights: params
                .learning_highlights
                .iter()
                .map(|item| WireNewHighlight {
                    title: &item.title,
                    duration: &item.duration,
                    detail: &item.detail,
                })
                .collect(),
        };
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/CreateProfile"),
            Some(&request),
            Some(access_token),
        )?;
        Ok(from_wire_profile(response.profile))
    }

    pub fn get_profile(
        &self,
        profile_id: &str,
        access_token: Option<&str>,
    ) -> Result<RestaurantProfile, ApiError> {
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/GetProfile"),
            Some(&WireGetProfileRequest { profile_id }),
            access_token,
        )?;
        Ok(from_wire_profile(response.profile))
    }

    /// Resolve the profile owned by the bearer token's subject; a
    /// `"not_found"` error code means "not yet created" and passes through
    /// for the caller to branch on.
    pub fn get_my_profile(&self, access_token: &str) -> Result<RestaurantProfile, ApiError> {
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/GetMyProfile"),
            Some(&EmptyBody {}),
            Some(access_token),
        )?;
        Ok(from_wire_profile(response.profile))
    }

    pub fn update_profile(
        &self,
        params: &UpdateRestaurantProfileParams,
        access_token: &str,
    ) -> Result<RestaurantProfile, ApiError> {
        let profile = &params.profile;
        let request = WireUpdateProfileRequest {
            profile_id: &params.profile_id,
            display_name: &profile.display_name,
            tagline: &profile.tagline,
            location: &profile.location,
            seats: profile.seats,
            cuisine_types: &profile.cuisine_types,
            mentorship_style: &profile.mentorship_style,
            description: &profile.description,
            culture_keywords: &profile.culture_keywords,
            benefits: &profile.benefits,
            support_programs: &profile.support_programs,
            learning_highlights: profile
                .learning_highlights
                .iter()
                .map(|item| WireKeptHighlight {
                    id: item.id.as_deref().unwrap_or(""),
                    title: &item.title,
                    duration: &item.duration,
                    detail: &item.detail,
                })
                .collect(),
        };
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/UpdateProfile"),
            Some(&request),
            Some(access_token),
        )?;
        Ok(from_wire_profile(response.profile))
    }

    /// Search with optional cuisine filters and a display-name substring;
    /// limit defaults to 10 and offset to 0 when unset.
    pub fn search_profiles(
        &self,
        params: &RestaurantSearchParams,
        access_token: Option<&str>,
    ) -> Result<Vec<RestaurantProfile>, ApiError> {
        let request = WireSearchProfilesRequest {
            cuisine_types: params.cuisine_types.as_deref().unwrap_or(&[]),
            name: params.name.as_deref().unwrap_or(""),
            limit: params.limit.unwrap_or(10),
            offset: params.offset.unwrap_or(0),
        };
        let response: WireSearchProfilesResponse = self.transport.invoke(
            &format!("{SERVICE}/SearchProfiles"),
            Some(&request),
            access_token,
        )?;
        Ok(response
            .profiles
            .into_iter()
            .map(from_wire_profile)
            .collect())
    }
}

fn from_wire_profile(wire: WireRestaurantProfile) -> RestaurantProfile {
    RestaurantProfile {
        id: wire.id,
        user_id: wire.user_id,
        display_name: wire.display_name,
        tagline: wire.tagline,
        location: wire.location,
        seats: wire.seats,
        cuisine_types: wire.cuisine_types,
        mentorship_style: wire.mentorship_style,
        description: wire.description,
        culture_keywords: wire.culture_keywords,
        benefits: wire.benefits,
        support_programs: wire.support_programs,
        learning_highlights: wire
            .learning_highlights
            .into_iter()
            .map(|item| LearningHighlight {
                id: optional_id(item.id),
                title: item.title,
                duration: item.duration,
                detail: item.detail,
            })
            .collect(),
        created_at: wire.created_at,
        updated_at: wire.updated_at,
    }
}
