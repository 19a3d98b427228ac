use chrono::Utc;
use estimator::domain::client::{NewClient, UpdateClient};
use estimator::domain::estimate::{EstimateStatus, NewEstimate};
use estimator::domain::pricing_settings::NewTradePricingSettings;
use estimator::domain::profile::{NewProfile, Profile};
use estimator::domain::project::NewProject;
use estimator::domain::types::{ClientId, EstimateTitle, ProfileId};
use estimator::pricing::{
    Complexity, Measurements, PricingInput, PricingSettings, RateOverrides, Trade, calculate,
};
use estimator::repository::errors::RepositoryError;
use estimator::repository::{
    ClientListQuery, ClientReader, ClientWriter, DieselRepository, EstimateListQuery,
    EstimateReader, EstimateWriter, PricingSettingsReader, PricingSettingsWriter, ProfileReader,
    ProfileWriter, ProjectReader, ProjectWriter,
};

mod common;

fn profile(repo: &DieselRepository, sub: &str) -> Profile {
    let new_profile =
        NewProfile::try_new(sub, format!("{}@example.com", sub.replace('|', "-")), None).unwrap();
    repo.create_or_update_profile(&new_profile).unwrap()
}

fn client(profile_id: ProfileId, name: &str) -> NewClient {
    NewClient::try_new(
        profile_id,
        name,
        Some(format!("{}@example.com", name.to_lowercase())),
        None,
        Some("12 Oak St".into()),
        None,
    )
    .unwrap()
}

fn wall_estimate(profile_id: ProfileId, client_id: ClientId) -> NewEstimate {
    let measurements: Measurements = [("wall_sqft".to_string(), 1000.0)].into_iter().collect();
    let breakdown = calculate(PricingInput {
        trade: Trade::DrywallHanging,
        measurements: &measurements,
        complexity: Complexity::Simple,
        addons: &[],
        settings: &PricingSettings::default(),
    })
    .unwrap();

    NewEstimate {
        profile_id,
        client_id,
        project_id: None,
        title: EstimateTitle::new("Basement walls").unwrap(),
        measurements,
        addons: vec![],
        notes: None,
        breakdown,
    }
}

#[test]
fn test_profile_upsert_refreshes_email() {
    let test_db = common::TestDb::new("test_profile_upsert_refreshes_email.db");
    let repo = test_db.repo();

    let created = repo
        .create_or_update_profile(
            &NewProfile::try_new("auth0|1", "old@example.com", Some("Pat's Drywall".into()))
                .unwrap(),
        )
        .unwrap();
    let refreshed = repo
        .create_or_update_profile(
            &NewProfile::try_new("auth0|1", "new@example.com", Some("Other".into())).unwrap(),
        )
        .unwrap();

    assert_eq!(created.id, refreshed.id);
    assert_eq!(refreshed.email.as_str(), "new@example.com");
    assert_eq!(
        refreshed.business_name.as_ref().map(|n| n.as_str()),
        Some("Pat's Drywall")
    );

    let loaded = repo
        .get_profile_by_user_id(&created.user_id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(
        repo.get_profile_by_id(created.id).unwrap().map(|p| p.user_id),
        Some(created.user_id)
    );
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");

    let inserted = repo
        .create_clients(&[
            client(owner.id, "Alice"),
            client(owner.id, "Bob"),
        ])
        .unwrap();
    assert_eq!(inserted, 2);

    let (total, mut items) = repo.list_clients(ClientListQuery::new(owner.id)).unwrap();
    assert_eq!(total, 2);
    items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
    let alice = items[0].clone();
    let bob = items[1].clone();

    let (search_total, search_items) = repo
        .list_clients(ClientListQuery::new(owner.id).search("bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name.as_str(), "Bob");

    let updates = UpdateClient::try_new(
        "Bobby",
        bob.email.clone().map(|e| e.into_inner()),
        None,
        bob.address.clone(),
        Some("Prefers mornings".into()),
    )
    .unwrap();
    let updated = repo.update_client(bob.id, owner.id, &updates).unwrap();
    assert_eq!(updated.name.as_str(), "Bobby");
    assert_eq!(updated.notes.as_ref().map(|n| n.as_str()), Some("Prefers mornings"));

    repo.delete_client(alice.id, owner.id).unwrap();
    assert!(repo.get_client_by_id(alice.id, owner.id).unwrap().is_none());

    let (total_after, items_after) = repo.list_clients(ClientListQuery::new(owner.id)).unwrap();
    assert_eq!(total_after, 1);
    assert_eq!(items_after[0].name.as_str(), "Bobby");
}

#[test]
fn test_clients_are_scoped_to_profile() {
    let test_db = common::TestDb::new("test_clients_are_scoped_to_profile.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");
    let other = profile(&repo, "auth0|other");

    let alice = repo.create_client(&client(owner.id, "Alice")).unwrap();

    assert!(repo.get_client_by_id(alice.id, other.id).unwrap().is_none());
    let (total, _) = repo.list_clients(ClientListQuery::new(other.id)).unwrap();
    assert_eq!(total, 0);
    assert!(matches!(
        repo.delete_client(alice.id, other.id),
        Err(RepositoryError::NotFound)
    ));

    let updates = UpdateClient::try_new("Mallory", None, None, None, None).unwrap();
    assert!(matches!(
        repo.update_client(alice.id, other.id, &updates),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_client_pagination() {
    let test_db = common::TestDb::new("test_client_pagination.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");

    let clients = (0..5)
        .map(|i| client(owner.id, &format!("Client{i}")))
        .collect::<Vec<_>>();
    repo.create_clients(&clients).unwrap();

    let (total, page) = repo
        .list_clients(ClientListQuery::new(owner.id).paginate(2, 2))
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);

    let (_, last) = repo
        .list_clients(ClientListQuery::new(owner.id).paginate(3, 2))
        .unwrap();
    assert_eq!(last.len(), 1);
}

#[test]
fn test_project_repository_crud() {
    let test_db = common::TestDb::new("test_project_repository_crud.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");
    let alice = repo.create_client(&client(owner.id, "Alice")).unwrap();

    let project = repo
        .create_project(
            &NewProject::try_new(owner.id, alice.id, "Kitchen", Some("12 Oak St".into()), None)
                .unwrap(),
        )
        .unwrap();

    let listed = repo.list_projects(alice.id, owner.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name.as_str(), "Kitchen");

    // Projects go away with their client.
    repo.delete_client(alice.id, owner.id).unwrap();
    assert!(repo.get_project_by_id(project.id, owner.id).unwrap().is_none());
}

#[test]
fn test_pricing_settings_upsert() {
    let test_db = common::TestDb::new("test_pricing_settings_upsert.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");

    assert!(
        repo.get_pricing_settings(owner.id, Trade::Painting)
            .unwrap()
            .is_none()
    );

    let mut settings = PricingSettings {
        rates: RateOverrides::new([("paint_wall".to_string(), 1.5)].into_iter().collect()),
        range_percent: 15.0,
        minimum_charge: 500.0,
    };
    repo.save_pricing_settings(&NewTradePricingSettings {
        profile_id: owner.id,
        trade: Trade::Painting,
        settings: settings.clone(),
    })
    .unwrap();

    settings.minimum_charge = 750.0;
    let saved = repo
        .save_pricing_settings(&NewTradePricingSettings {
            profile_id: owner.id,
            trade: Trade::Painting,
            settings: settings.clone(),
        })
        .unwrap();
    assert_eq!(saved.settings, settings);

    let loaded = repo
        .get_pricing_settings(owner.id, Trade::Painting)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.settings.minimum_charge, 750.0);
    assert_eq!(loaded.settings.rates.get("paint_wall"), Some(1.5));
    assert!(loaded.updated_at.is_some());

    assert!(
        repo.get_pricing_settings(owner.id, Trade::Framing)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_estimate_lifecycle() {
    let test_db = common::TestDb::new("test_estimate_lifecycle.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");
    let alice = repo.create_client(&client(owner.id, "Alice")).unwrap();

    let estimate = repo
        .create_estimate(&wall_estimate(owner.id, alice.id))
        .unwrap();
    assert_eq!(estimate.status, EstimateStatus::Draft);
    assert_eq!(estimate.trade, Trade::DrywallHanging);
    assert_eq!(estimate.total, 1000.0);
    assert_eq!(estimate.low, 900.0);
    assert_eq!(estimate.high, 1100.0);
    assert_eq!(estimate.breakdown.line_items.len(), 2);
    assert!(estimate.sent_at.is_none());

    let sent_at = Utc::now().naive_utc();
    let sent = repo
        .update_estimate_status(estimate.id, owner.id, EstimateStatus::Sent, Some(sent_at))
        .unwrap();
    assert_eq!(sent.status, EstimateStatus::Sent);
    assert!(sent.sent_at.is_some());

    let accepted = repo
        .update_estimate_status(estimate.id, owner.id, EstimateStatus::Accepted, None)
        .unwrap();
    assert_eq!(accepted.status, EstimateStatus::Accepted);
    assert_eq!(accepted.sent_at, sent.sent_at);

    let (total, _) = repo
        .list_estimates(EstimateListQuery::new(owner.id).status(EstimateStatus::Draft))
        .unwrap();
    assert_eq!(total, 0);
    let (total, items) = repo
        .list_estimates(EstimateListQuery::new(owner.id).client(alice.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, estimate.id);

    repo.delete_estimate(estimate.id, owner.id).unwrap();
    assert!(
        repo.get_estimate_by_id(estimate.id, owner.id)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_estimates_are_scoped_to_profile() {
    let test_db = common::TestDb::new("test_estimates_are_scoped_to_profile.db");
    let repo = test_db.repo();
    let owner = profile(&repo, "auth0|owner");
    let other = profile(&repo, "auth0|other");
    let alice = repo.create_client(&client(owner.id, "Alice")).unwrap();
    let estimate = repo
        .create_estimate(&wall_estimate(owner.id, alice.id))
        .unwrap();

    assert!(
        repo.get_estimate_by_id(estimate.id, other.id)
            .unwrap()
            .is_none()
    );
    assert!(matches!(
        repo.update_estimate_status(estimate.id, other.id, EstimateStatus::Draft, None),
        Err(RepositoryError::NotFound)
    ));
    let (total, _) = repo.list_estimates(EstimateListQuery::new(other.id)).unwrap();
    assert_eq!(total, 0);
}
