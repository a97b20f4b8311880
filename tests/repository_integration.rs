//! Integration tests for the repository layer
//!
//! These tests verify the Postgres repositories against a live database,
//! with the team-join transaction as the main subject: cap enforcement,
//! precondition failures, and behavior under concurrent joins.
//!
//! Tests are skipped when DATABASE_URL is not set.

use sqlx::PgPool;
use uuid::Uuid;

use toycathon_api::auth::password::hash_password;
use toycathon_api::domain::repositories::team_repository::TeamRepository;
use toycathon_api::domain::repositories::user_repository::UserRepository;
use toycathon_api::domain::team::{JoinError, Team};
use toycathon_api::infrastructure::repositories::{
    PostgresTeamRepository, PostgresUserRepository,
};

/// Connects to the test database and applies migrations, or returns None
/// (skipping the test) when DATABASE_URL is not configured.
async fn try_setup_db() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping integration test");
            return None;
        }
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Insert a user directly; unique email derived from a fresh uuid.
async fn create_test_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    let email = format!("user-{}@test.example", user_id);
    let password_hash = hash_password("testpass-123").expect("hash password");

    sqlx::query(
        "INSERT INTO users (id, email, password_hash, full_name, phone, institute, is_admin)
         VALUES ($1, $2, $3, $4, $5, $6, FALSE)",
    )
    .bind(user_id)
    .bind(email)
    .bind(password_hash)
    .bind("Test User")
    .bind("9876543210")
    .bind("Test Institute")
    .execute(pool)
    .await
    .expect("Failed to create test user");

    user_id
}

/// Create a team through the repository so the leader is assigned in the
/// same transaction, exactly as production does.
async fn create_test_team(pool: &PgPool, leader_id: Uuid) -> Uuid {
    let team = Team::new(
        format!("team-{}", Uuid::new_v4()),
        leader_id,
        "leader@test.example".to_string(),
        "9876543210".to_string(),
    )
    .expect("valid team");

    let repo = PostgresTeamRepository::new(pool.clone());
    repo.create(&team).await.expect("Failed to create team");

    team.id()
}

async fn member_count(pool: &PgPool, team_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE team_id = $1")
        .bind(team_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count members")
}

/// Deletes a team and everyone who was on it. The team row goes first
/// (its leader FK blocks deleting the leader while it exists); the FK on
/// users.team_id nulls out memberships, so member ids are captured up
/// front.
async fn cleanup_team(pool: &PgPool, team_id: Uuid) {
    let member_ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE team_id = $1")
        .bind(team_id)
        .fetch_all(pool)
        .await
        .expect("Failed to list members");
    sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup team");
    sqlx::query("DELETE FROM users WHERE id = ANY($1)")
        .bind(&member_ids)
        .execute(pool)
        .await
        .expect("Failed to cleanup users");
}

async fn cleanup_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup user");
}

#[tokio::test]
async fn test_create_team_assigns_leader() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let team_id = create_test_team(&pool, leader_id).await;

    let user_repo = PostgresUserRepository::new(pool.clone());
    let leader = user_repo
        .find_by_id(leader_id)
        .await
        .expect("query leader")
        .expect("leader exists");

    assert_eq!(leader.team_id, Some(team_id), "leader joined at creation");
    assert_eq!(member_count(&pool, team_id).await, 1);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
async fn test_create_team_with_taken_name_fails() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let other_leader_id = create_test_user(&pool).await;

    let name = format!("team-{}", Uuid::new_v4());
    let repo = PostgresTeamRepository::new(pool.clone());

    let team = Team::new(
        name.clone(),
        leader_id,
        "leader@test.example".to_string(),
        "9876543210".to_string(),
    )
    .unwrap();
    repo.create(&team).await.expect("first create succeeds");

    let dup = Team::new(
        name,
        other_leader_id,
        "leader@test.example".to_string(),
        "9876543210".to_string(),
    )
    .unwrap();
    let err = repo.create(&dup).await.expect_err("duplicate name rejected");
    assert!(err.contains("already taken"), "got: {}", err);

    cleanup_team(&pool, team.id()).await;
    cleanup_user(&pool, other_leader_id).await;
}

#[tokio::test]
async fn test_join_succeeds_below_cap() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let team_id = create_test_team(&pool, leader_id).await;
    let joiner_id = create_test_user(&pool).await;

    let team_repo = PostgresTeamRepository::new(pool.clone());
    let team_name = team_repo
        .join(team_id, joiner_id)
        .await
        .expect("join should succeed");

    assert!(team_name.starts_with("team-"));
    assert_eq!(member_count(&pool, team_id).await, 2);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
async fn test_join_at_three_members_fills_team_then_rejects() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let team_id = create_test_team(&pool, leader_id).await;
    let team_repo = PostgresTeamRepository::new(pool.clone());

    // Bring the team to 3 members (leader + 2).
    for _ in 0..2 {
        let joiner = create_test_user(&pool).await;
        team_repo.join(team_id, joiner).await.expect("join succeeds");
    }
    assert_eq!(member_count(&pool, team_id).await, 3);

    // Joining at exactly 3 succeeds and brings the team to 4.
    let fourth = create_test_user(&pool).await;
    team_repo
        .join(team_id, fourth)
        .await
        .expect("fourth member fits under the cap");
    assert_eq!(member_count(&pool, team_id).await, 4);

    // Joining at 4 fails and leaves the count at 4.
    let fifth = create_test_user(&pool).await;
    let err = team_repo.join(team_id, fifth).await.expect_err("team full");
    assert_eq!(err, JoinError::TeamFull);
    assert_eq!(member_count(&pool, team_id).await, 4);

    cleanup_team(&pool, team_id).await;
    cleanup_user(&pool, fifth).await;
}

#[tokio::test]
async fn test_join_nonexistent_team_fails_without_side_effects() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let user_id = create_test_user(&pool).await;
    let team_repo = PostgresTeamRepository::new(pool.clone());

    let err = team_repo
        .join(Uuid::new_v4(), user_id)
        .await
        .expect_err("unknown team");
    assert_eq!(err, JoinError::TeamNotFound);

    let user_repo = PostgresUserRepository::new(pool.clone());
    let user = user_repo
        .find_by_id(user_id)
        .await
        .expect("query user")
        .expect("user exists");
    assert_eq!(user.team_id, None, "user document was not modified");

    cleanup_user(&pool, user_id).await;
}

#[tokio::test]
async fn test_join_nonexistent_user_fails() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let team_id = create_test_team(&pool, leader_id).await;

    let team_repo = PostgresTeamRepository::new(pool.clone());
    let err = team_repo
        .join(team_id, Uuid::new_v4())
        .await
        .expect_err("unknown user");
    assert_eq!(err, JoinError::UserNotFound);

    cleanup_team(&pool, team_id).await;
}

#[tokio::test]
async fn test_assigned_user_cannot_join_even_when_target_has_space() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_a = create_test_user(&pool).await;
    let team_a = create_test_team(&pool, leader_a).await;
    let leader_b = create_test_user(&pool).await;
    let team_b = create_test_team(&pool, leader_b).await;

    let team_repo = PostgresTeamRepository::new(pool.clone());
    let member = create_test_user(&pool).await;
    team_repo.join(team_a, member).await.expect("first join");

    // Target team_b is nearly empty; the user is still rejected.
    let err = team_repo
        .join(team_b, member)
        .await
        .expect_err("already assigned");
    assert_eq!(err, JoinError::AlreadyOnTeam);
    assert_eq!(member_count(&pool, team_b).await, 1);

    cleanup_team(&pool, team_a).await;
    cleanup_team(&pool, team_b).await;
}

#[tokio::test]
async fn test_concurrent_joins_never_overshoot_cap() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let team_id = create_test_team(&pool, leader_id).await;
    let team_repo = PostgresTeamRepository::new(pool.clone());

    // Fill to exactly 3 members.
    for _ in 0..2 {
        let joiner = create_test_user(&pool).await;
        team_repo.join(team_id, joiner).await.expect("join succeeds");
    }
    assert_eq!(member_count(&pool, team_id).await, 3);

    let racer_a = create_test_user(&pool).await;
    let racer_b = create_test_user(&pool).await;

    let repo_a = PostgresTeamRepository::new(pool.clone());
    let repo_b = PostgresTeamRepository::new(pool.clone());
    let (res_a, res_b) = tokio::join!(repo_a.join(team_id, racer_a), repo_b.join(team_id, racer_b));

    let successes = [&res_a, &res_b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one racer wins the last slot");

    let loser = if res_a.is_err() { res_a } else { res_b };
    assert_eq!(loser.expect_err("one racer loses"), JoinError::TeamFull);
    assert_eq!(member_count(&pool, team_id).await, 4, "cap never exceeded");

    cleanup_team(&pool, team_id).await;
    cleanup_user(&pool, racer_a).await;
    cleanup_user(&pool, racer_b).await;
}

#[tokio::test]
async fn test_failed_join_can_be_retried_after_condition_clears() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_a = create_test_user(&pool).await;
    let team_a = create_test_team(&pool, leader_a).await;
    let leader_b = create_test_user(&pool).await;
    let team_b = create_test_team(&pool, leader_b).await;

    let team_repo = PostgresTeamRepository::new(pool.clone());
    let member = create_test_user(&pool).await;
    team_repo.join(team_a, member).await.expect("first join");

    let err = team_repo
        .join(team_b, member)
        .await
        .expect_err("still on team A");
    assert_eq!(err, JoinError::AlreadyOnTeam);

    // Admin removal clears the blocking condition; the identical retry
    // then succeeds.
    team_repo
        .remove_member(team_a, member)
        .await
        .expect("member removed");
    team_repo
        .join(team_b, member)
        .await
        .expect("retry succeeds after unassignment");
    assert_eq!(member_count(&pool, team_b).await, 2);

    cleanup_team(&pool, team_a).await;
    cleanup_team(&pool, team_b).await;
}

#[tokio::test]
async fn test_leader_cannot_be_removed_from_own_team() {
    let Some(pool) = try_setup_db().await else {
        return;
    };

    let leader_id = create_test_user(&pool).await;
    let team_id = create_test_team(&pool, leader_id).await;

    let team_repo = PostgresTeamRepository::new(pool.clone());
    let err = team_repo
        .remove_member(team_id, leader_id)
        .await
        .expect_err("leader is not removable");
    assert!(err.contains("not a removable member"), "got: {}", err);
    assert_eq!(member_count(&pool, team_id).await, 1);

    cleanup_team(&pool, team_id).await;
}
