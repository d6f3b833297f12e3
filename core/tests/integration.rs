//! Full marketplace lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every service
//! client over real HTTP through the default executor: registration and
//! token lifecycle, chef and restaurant profiles, job postings, and the
//! application flow between the two accounts.

use std::net::SocketAddr;

use brigade_core::{
    ApplicationStatus, ChefProfileClient, ChefSearchParams, ClientOptions,
    CreateApplicationParams, CreateChefProfileParams, CreateJobParams,
    CreateRestaurantProfileParams, IdentityClient, JobClient, JobSearchParams, JobStatus,
    LearningHighlight, ListParams, LoginParams, PortfolioItem, RegisterParams,
    RestaurantProfileClient, RestaurantSearchParams, UpdateApplicationStatusParams,
    UpdateChefProfileParams, UpdateJobParams, UserRole,
};

/// Spawn the mock server on a random port and return its address.
fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn options(addr: SocketAddr) -> ClientOptions {
    ClientOptions {
        base_url: Some(format!("http://{addr}")),
        http: None,
    }
}

fn chef_profile_params() -> CreateChefProfileParams {
    CreateChefProfileParams {
        full_name: "Ana Ruiz".to_string(),
        headline: "Pastry chef".to_string(),
        summary: "Laminated doughs and plated desserts".to_string(),
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

fn restaurant_profile_params() -> CreateRestaurantProfileParams {
    CreateRestaurantProfileParams {
        display_name: "Chez Louis".to_string(),
        tagline: "Classic bistro".to_string(),
        location: "Lyon".to_string(),
        seats: 40,
        cuisine_types: vec!["french".to_string()],
        mentorship_style: "hands-on".to_string(),
        description: "Family-run bistro".to_string(),
        culture_keywords: vec!["calm".to_string()],
        benefits: vec!["staff meals".to_string()],
        support_programs: vec!["stage".to_string()],
        learning_highlights: vec![LearningHighlight {
            id: None,
            title: "Butchery basics".to_string(),
            duration: "6 weeks".to_string(),
            detail: "Whole animal work".to_string(),
        }],
    }
}

#[test]
fn marketplace_lifecycle() {
    let addr = spawn_server();
    let identity = IdentityClient::new(options(addr));
    let chefs = ChefProfileClient::new(options(addr));
    let restaurants = RestaurantProfileClient::new(options(addr));
    let jobs = JobClient::new(options(addr));

    // Step 1: register one account per role.
    let chef_session = identity
        .register(&RegisterParams {
            email: "ana@example.com".to_string(),
            password: "secret123".to_string(),
            role: UserRole::Chef,
        })
        .unwrap();
    assert_eq!(chef_session.user.role, UserRole::Chef);
    let chef_token = chef_session.tokens.access_token.clone();

    let restaurant_session = identity
        .register(&RegisterParams {
            email: "louis@example.com".to_string(),
            password: "secret123".to_string(),
            role: UserRole::Restaurant,
        })
        .unwrap();
    let restaurant_token = restaurant_session.tokens.access_token.clone();

    // Step 2: the access token resolves back to the same identity.
    let me = identity.get_me(&chef_token).unwrap();
    assert_eq!(me.id, chef_session.user.id);
    assert_eq!(me.email, "ana@example.com");

    // Step 3: no chef profile yet — callers branch on the error code.
    let err = chefs.get_my_profile(&chef_token).unwrap_err();
    assert_eq!(err.code(), Some("not_found"));
    assert_eq!(err.status(), Some(404));

    // Step 4: create the chef profile; the new portfolio item gets an id.
    let chef_profile = chefs
        .create_profile(&chef_profile_params(), &chef_token)
        .unwrap();
    assert_eq!(chef_profile.user_id, chef_session.user.id);
    assert_eq!(chef_profile.years_experience, 6);
    assert!(chef_profile.portfolio_items[0].id.is_some());
    assert_eq!(chef_profile.skill_tree_json, r#"{"root":"pastry"}"#);

    let mine = chefs.get_my_profile(&chef_token).unwrap();
    assert_eq!(mine.id, chef_profile.id);

    // Step 5: update keeps the existing item and adds a new one.
    let mut updated_params = chef_profile_params();
    updated_params.headline = "Head pastry chef".to_string();
    updated_params.portfolio_items = vec![
        PortfolioItem {
            id: chef_profile.portfolio_items[0].id.clone(),
            url: "https://example.com/tart.jpg".to_string(),
            caption: "Citrus tart".to_string(),
        },
        PortfolioItem {
            id: None,
            url: "https://example.com/bread.jpg".to_string(),
            caption: "Sourdough".to_string(),
        },
    ];
    let updated = chefs
        .update_profile(
            &UpdateChefProfileParams {
                profile_id: chef_profile.id.clone(),
                profile: updated_params,
            },
            &chef_token,
        )
        .unwrap();
    assert_eq!(updated.headline, "Head pastry chef");
    assert_eq!(updated.portfolio_items.len(), 2);
    assert_eq!(
        updated.portfolio_items[0].id,
        chef_profile.portfolio_items[0].id
    );
    assert!(updated.portfolio_items[1].id.is_some());

    // Step 6: search finds the profile by specialty but not by a miss.
    let found = chefs
        .search_profiles(
            &ChefSearchParams {
                specialties: Some(vec!["pastry".to_string()]),
                ..Default::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(found.len(), 1);
    let missed = chefs
        .search_profiles(
            &ChefSearchParams {
                specialties: Some(vec!["sushi".to_string()]),
                ..Default::default()
            },
            None,
        )
        .unwrap();
    assert!(missed.is_empty());

    // Step 7: restaurant profile.
    let restaurant_profile = restaurants
        .create_profile(&restaurant_profile_params(), &restaurant_token)
        .unwrap();
    assert_eq!(restaurant_profile.seats, 40);
    assert!(restaurant_profile.learning_highlights[0].id.is_some());

    let by_name = restaurants
        .search_profiles(
            &RestaurantSearchParams {
                name: Some("chez".to_string()),
                ..Default::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].display_name, "Chez Louis");

    // Step 8: publish a job with metadata.
    let mut metadata = brigade_core::Metadata::new();
    metadata.insert(
        "team".to_string(),
        serde_json::Value::String("pastry".to_string()),
    );
    let job = jobs
        .create_job(
            &CreateJobParams {
                title: "Chef de partie".to_string(),
                description: "Sauce station, classic technique".to_string(),
                required_skills: vec!["saucier".to_string()],
                location: Some("Lyon".to_string()),
                salary_range: Some("2400-2800 EUR".to_string()),
                employment_type: Some("full-time".to_string()),
                status: Some(JobStatus::Published),
                metadata: Some(metadata.clone()),
            },
            &restaurant_token,
        )
        .unwrap();
    assert_eq!(job.status, JobStatus::Published);
    assert_eq!(job.restaurant_id, restaurant_profile.id);
    assert_eq!(job.restaurant_name.as_deref(), Some("Chez Louis"));
    assert_eq!(job.metadata, metadata);

    let listed = jobs
        .list_my_jobs(&ListParams::default(), &restaurant_token)
        .unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.jobs[0].id, job.id);

    // Step 9: public search sees the published job.
    let search = jobs
        .search_jobs(
            &JobSearchParams {
                keyword: Some("sauce".to_string()),
                ..Default::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(search.total, 1);
    assert_eq!(search.jobs[0].title, "Chef de partie");

    // Step 10: the chef applies; both sides see the application with its
    // embedded summaries.
    let application = jobs
        .create_application(
            &CreateApplicationParams {
                job_id: job.id.clone(),
                cover_letter: Some("Six years of pastry work".to_string()),
            },
            &chef_token,
        )
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.chef_profile_id, updated.id);

    let chef_side = jobs
        .list_applications_for_chef(&ListParams::default(), &chef_token)
        .unwrap();
    assert_eq!(chef_side.len(), 1);
    let job_summary = chef_side[0].job.as_ref().unwrap();
    assert_eq!(job_summary.title, "Chef de partie");
    assert_eq!(job_summary.restaurant_name.as_deref(), Some("Chez Louis"));

    let restaurant_side = jobs
        .list_applications_for_restaurant(&ListParams::default(), &restaurant_token)
        .unwrap();
    assert_eq!(restaurant_side.len(), 1);
    let chef_summary = restaurant_side[0].chef.as_ref().unwrap();
    assert_eq!(chef_summary.full_name.as_deref(), Some("Ana Ruiz"));

    // Step 11: accept the application.
    let accepted = jobs
        .update_application_status(
            &UpdateApplicationStatusParams {
                application_id: application.id.clone(),
                status: ApplicationStatus::Accepted,
            },
            &restaurant_token,
        )
        .unwrap();
    assert_eq!(accepted.status, ApplicationStatus::Accepted);

    // Step 12: close the job; it drops out of public search.
    let closed = jobs
        .update_job(
            &UpdateJobParams {
                job_id: job.id.clone(),
                title: None,
                description: None,
                required_skills: None,
                location: None,
                salary_range: None,
                employment_type: None,
                status: Some(JobStatus::Closed),
                metadata: None,
            },
            &restaurant_token,
        )
        .unwrap();
    assert_eq!(closed.status, JobStatus::Closed);
    assert_eq!(closed.metadata, metadata);

    let search_after_close = jobs
        .search_jobs(&JobSearchParams::default(), None)
        .unwrap();
    assert_eq!(search_after_close.total, 0);

    // Step 13: token lifecycle — refresh rotates, logout invalidates.
    let refreshed = identity
        .refresh(&chef_session.tokens.refresh_token)
        .unwrap();
    assert!(!refreshed.access_token.is_empty());

    identity.logout(&refreshed.refresh_token).unwrap();
    let err = identity.refresh(&refreshed.refresh_token).unwrap_err();
    assert_eq!(err.code(), Some("unauthenticated"));

    // Step 14: logging back in works with the original credentials.
    let relogin = identity
        .login(&LoginParams {
            email: "ana@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .unwrap();
    assert_eq!(relogin.user.id, chef_session.user.id);
}

#[test]
fn auth_errors_surface_code_and_status() {
    let addr = spawn_server();
    let identity = IdentityClient::new(options(addr));

    let err = identity
        .login(&LoginParams {
            email: "nobody@example.com".to_string(),
            password: "whatever1".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.code(), Some("unauthenticated"));
    assert_eq!(err.status(), Some(401));

    let err = identity.get_me("bogus-token").unwrap_err();
    assert_eq!(err.code(), Some("unauthenticated"));
    assert_eq!(err.status(), Some(401));
}
