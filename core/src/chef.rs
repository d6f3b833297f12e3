//! Client for `chef.v1.ChefProfileService`.
//!
//! Create requests serialize portfolio items without ids; update requests
//! carry each item's id as a plain string, empty meaning "new item", so
//! the server can distinguish kept items from additions.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{ClientOptions, EmptyBody, Transport};
use crate::types::{
    optional_id, ChefProfile, ChefSearchParams, CreateChefProfileParams, PortfolioItem,
    UpdateChefProfileParams,
};

const SERVICE: &str = "chef.v1.ChefProfileService";

#[derive(Serialize)]
struct WireNewPortfolioItem<'a> {
    url: &'a str,
    caption: &'a str,
}

#[derive(Serialize)]
struct WireKeptPortfolioItem<'a> {
    id: &'a str,
    url: &'a str,
    caption: &'a str,
}

#[derive(Serialize)]
struct WireCreateProfileRequest<'a> {
    full_name: &'a str,
    headline: &'a str,
    summary: &'a str,
    location: &'a str,
    years_experience: u32,
    availability: &'a str,
    specialties: &'a [String],
    work_areas: &'a [String],
    languages: &'a [String],
    bio: &'a str,
    learning_focus: &'a [String],
    skill_tree_json: &'a str,
    portfolio_items: Vec<WireNewPortfolioItem<'a>>,
}

#[derive(Serialize)]
struct WireUpdateProfileRequest<'a> {
    profile_id: &'a str,
    full_name: &'a str,
    headline: &'a str,
    summary: &'a str,
    location: &'a str,
    years_experience: u32,
    availability: &'a str,
    specialties: &'a [String],
    work_areas: &'a [String],
    languages: &'a [String],
    bio: &'a str,
    learning_focus: &'a [String],
    skill_tree_json: &'a str,
    portfolio_items: Vec<WireKeptPortfolioItem<'a>>,
}

#[derive(Serialize)]
struct WireGetProfileRequest<'a> {
    profile_id: &'a str,
}

#[derive(Serialize)]
struct WireSearchProfilesRequest<'a> {
    specialties: &'a [String],
    work_areas: &'a [String],
    limit: u32,
    offset: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WirePortfolioItem {
    id: String,
    url: String,
    caption: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireChefProfile {
    id: String,
    user_id: String,
    full_name: String,
    headline: String,
    summary: String,
    location: String,
    years_experience: u32,
    availability: String,
    specialties: Vec<String>,
    work_areas: Vec<String>,
    languages: Vec<String>,
    bio: String,
    learning_focus: Vec<String>,
    skill_tree_json: String,
    portfolio_items: Vec<WirePortfolioItem>,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProfileResponse {
    profile: WireChefProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSearchProfilesResponse {
    profiles: Vec<WireChefProfile>,
}

/// Client for chef profile operations.
#[derive(Debug, Clone)]
pub struct ChefProfileClient {
    transport: Transport,
}

impl ChefProfileClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            transport: Transport::new(options),
        }
    }

    pub fn create_profile(
        &self,
        params: &CreateChefProfileParams,
        access_token: &str,
    ) -> Result<ChefProfile, ApiError> {
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/CreateProfile"),
            Some(&to_create_request(params)),
            Some(access_token),
        )?;
        Ok(from_wire_profile(response.profile))
    }

    pub fn get_profile(
        &self,
        profile_id: &str,
        access_token: Option<&str>,
    ) -> Result<ChefProfile, ApiError> {
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/GetProfile"),
            Some(&WireGetProfileRequest { profile_id }),
            access_token,
        )?;
        Ok(from_wire_profile(response.profile))
    }

    /// Resolve the profile owned by the bearer token's subject. A server
    /// answering with a `"not_found"` code means "not yet created"; that
    /// error passes through untouched for the caller to branch on.
    pub fn get_my_profile(&self, access_token: &str) -> Result<ChefProfile, ApiError> {
        let response: WireProfileResponse = self.transport.invoke(
            &format!("{SERVICE}/GetMyProfile"),
            Some(&EmptyBody {}),
            Some(access_token),
        )?;
        Ok(from_wire_profile(response.profile))
    }

    pub fn update_profile(
        &self,
        params: &UpdateChefProfileParams,
        access_token: &str,
    ) -> Result<ChefProfile, ApiError> {
        let profile = &params.profile;
        let request = WireUpdateProfileRequest {
            profile_id: &params.profile_id,
            full_name: &profile.full_name,
            headline: &profile.headline,
            summary: &profile.summary,
            location: &profile.location,
            years_experience: profile.years_experience,
            availability: &profile.availability,
            specialties: &profile.specialties,
            work_areas: &profile.work_areas,
            languages: &profile.languages,
            bio: &profile.bio,
            learning_focus: &profile.learning_focus,
            skill_tree_json: &profile.skill_tree_json,
            portfolio_items: profile
                .portfolio_items
                .iter()
                .map(|item| WireKeptPortfolioItem {
                    id: item.id.as_deref().unwrap_or(""),
                    url: &item.url,
                    caption: &item.caption,
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

    /// Search with optional specialty/work-area filters; limit defaults to
    /// 10 and offset to 0 when unset.
    pub fn search_profiles(
        &self,
        params: &ChefSearchParams,
        access_token: Option<&str>,
    ) -> Result<Vec<ChefProfile>, ApiError> {
        let request = WireSearchProfilesRequest {
            specialties: params.specialties.as_deref().unwrap_or(&[]),
            work_areas: params.work_areas.as_deref().unwrap_or(&[]),
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

fn to_create_request(params: &CreateChefProfileParams) -> WireCreateProfileRequest<'_> {
    WireCreateProfileRequest {
        full_name: &params.full_name,
        headline: &params.headline,
        summary: &params.summary,
        location: &params.location,
        years_experience: params.years_experience,
        availability: &params.availability,
        specialties: &params.specialties,
        work_areas: &params.work_areas,
        languages: &params.languages,
        bio: &params.bio,
        learning_focus: &params.learning_focus,
        skill_tree_json: &params.skill_tree_json,
        portfolio_items: params
            .portfolio_items
            .iter()
            .map(|item| WireNewPortfolioItem {
                url: &item.url,
                caption: &item.caption,
            })
            .collect(),
    }
}

fn from_wire_profile(wire: WireChefProfile) -> ChefProfile {
    ChefProfile {
        id: wire.id,
        user_id: wire.user_id,
        full_name: wire.full_name,
        headline: wire.headline,
        summary: wire.summary,
        location: wire.location,
        years_experience: wire.years_experience,
        availability: wire.availability,
        specialties: wire.specialties,
        work_areas: wire.work_areas,
        languages: wire.languages,
        bio: wire.bio,
        learning_focus: wire.learning_focus,
        skill_tree_json: wire.skill_tree_json,
        portfolio_items: wire
            .portfolio_items
            .into_iter()
            .map(|item| PortfolioItem {
                id: optional_id(item.id),
                url: item.url,
                caption: item.caption,
            })
            .collect(),
        created_at: wire.created_at,
        updated_at: wire.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::testing::ScriptedExecutor;

    fn client(executor: Arc<ScriptedExecutor>) -> ChefProfileClient {
        ChefProfileClient::new(ClientOptions {
            base_url: Some("http://api.test".to_string()),
            http: Some(executor),
        })
    }

    fn sample_params() -> CreateChefProfileParams {
        CreateChefProfileParams {
            full_name: "Ana Ruiz".to_string(),
            headline: "Pastry chef".to_string(),
            summary: "Laminated doughs".to_string(),
            location: "Lyon".to_string(),
            years_experience: 6,
            availability: "full-time".to_string(),
            specialties: vec!["pastry".to_string()],
            work_areas: vec!["bakery".to_string()],
            languages: vec!["fr".to_string(), "es".to_string()],
            bio: "Trained in Lyon".to_string(),
            learning_focus: vec!["chocolate".to_string()],
            skill_tree_json: r#"{"root":"pastry"}"#.to_string(),
            portfolio_items: vec![PortfolioItem {
                id: None,
                url: "https://example.com/tart.jpg".to_string(),
                caption: "Citrus tart".to_string(),
            }],
        }
    }

    #[test]
    fn create_request_omits_portfolio_item_ids() {
        let executor = Arc::new(ScriptedExecutor::reply(200, r#"{"profile":{"id":"c1"}}"#));
        client(executor.clone())
            .create_profile(&sample_params(), "tok")
            .unwrap();

        let requests = executor.take_requests();
        assert_eq!(
            requests[0].url,
            "http://api.test/chef.v1.ChefProfileService/CreateProfile"
        );
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["full_name"], "Ana Ruiz");
        assert_eq!(body["years_experience"], 6);
        assert!(body["portfolio_items"][0].get("id").is_none());
        assert_eq!(body["portfolio_items"][0]["caption"], "Citrus tart");
    }

    #[test]
    fn update_request_sends_empty_id_for_new_items() {
        let executor = Arc::new(ScriptedExecutor::reply(200, r#"{"profile":{"id":"c1"}}"#));
        let mut params = sample_params();
        params.portfolio_items.push(PortfolioItem {
            id: Some("p9".to_string()),
            url: "https://example.com/bread.jpg".to_string(),
            caption: "Sourdough".to_string(),
        });
        client(executor.clone())
            .update_profile(
                &UpdateChefProfileParams {
                    profile_id: "c1".to_string(),
                    profile: params,
                },
                "tok",
            )
            .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(executor.take_requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["profile_id"], "c1");
        assert_eq!(body["portfolio_items"][0]["id"], "");
        assert_eq!(body["portfolio_items"][1]["id"], "p9");
    }

    #[test]
    fn absent_wire_arrays_map_to_empty_vecs() {
        let executor = Arc::new(ScriptedExecutor::reply(
            200,
            r#"{"profile":{"id":"c1","user_id":"u1","full_name":"Ana Ruiz"}}"#,
        ));
        let profile = client(executor).get_profile("c1", None).unwrap();

        assert_eq!(profile.id, "c1");
        assert!(profile.specialties.is_empty());
        assert!(profile.languages.is_empty());
        assert!(profile.portfolio_items.is_empty());
    }

    #[test]
    fn response_item_empty_id_becomes_none() {
        let executor = Arc::new(ScriptedExecutor::reply(
            200,
            r#"{"profile":{"id":"c1","portfolio_items":[{"id":"","url":"u","caption":"c"},{"id":"p1","url":"u","caption":"c"}]}}"#,
        ));
        let profile = client(executor).get_my_profile("tok").unwrap();

        assert_eq!(profile.portfolio_items[0].id, None);
        assert_eq!(profile.portfolio_items[1].id.as_deref(), Some("p1"));
    }

    #[test]
    fn search_applies_documented_defaults() {
        let executor = Arc::new(ScriptedExecutor::reply(200, r#"{"profiles":[]}"#));
        let profiles = client(executor.clone())
            .search_profiles(&ChefSearchParams::default(), None)
            .unwrap();
        assert!(profiles.is_empty());

        let requests = executor.take_requests();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["specialties"], serde_json::json!([]));
        assert_eq!(body["work_areas"], serde_json::json!([]));
        assert_eq!(body["limit"], 10);
        assert_eq!(body["offset"], 0);
        // Unauthenticated search sends no bearer header.
        assert!(!requests[0].headers.iter().any(|(n, _)| n == "authorization"));
    }

    #[test]
    fn missing_profile_error_passes_through() {
        let executor = Arc::new(ScriptedExecutor::reply(
            404,
            r#"{"code":"not_found","message":"no profile"}"#,
        ));
        let err = client(executor).get_my_profile("tok").unwrap_err();

        assert_eq!(err.code(), Some("not_found"));
        assert_eq!(err.status(), Some(404));
    }
}
