//! Diesel repositories against embedded PostgreSQL.
//!
//! Each test provisions its own migrated database; see `support/pg_embed.rs`
//! for the skip policy when no cluster is available.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use diet_backend::domain::ports::{MealRepository, UserInsertOutcome, UserRepository};
use diet_backend::domain::{
    EmailAddress, Meal, MealContent, MealDate, MealDraft, MealId, MealName, MealPatch, SessionId,
    User, UserDraft, UserId, UserName,
};
use diet_backend::outbound::persistence::{
    DbPool, DieselMealRepository, DieselUserRepository, PoolConfig,
};

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::migrated_database_url;

const DAY_MILLIS: i64 = 86_400_000;
const JUNE_FIRST_MILLIS: i64 = 1_717_200_000_000;

struct Repositories {
    users: DieselUserRepository,
    meals: DieselMealRepository,
}

#[fixture]
fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid start time")
}

/// Provision a database and run `body` against fresh repositories.
///
/// Returns without running `body` when the cluster is unavailable.
fn with_repositories<F, Fut>(body: F)
where
    F: FnOnce(Repositories) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let Some(url) = migrated_database_url() else {
        return;
    };
    actix_rt::System::new().block_on(async move {
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
            .await
            .expect("pool builds");
        body(Repositories {
            users: DieselUserRepository::new(pool.clone()),
            meals: DieselMealRepository::new(pool),
        })
        .await;
    });
}

fn user(session_id: SessionId, email: &str, at: DateTime<Utc>) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        session_id,
        name: UserName::new("Ada").expect("valid name"),
        email: EmailAddress::new(email).expect("valid email"),
        created_at: at,
        updated_at: at,
    })
}

fn content(name: &str, is_on_diet: bool, date_millis: i64) -> MealContent {
    MealContent {
        name: MealName::new(name),
        description: format!("{name} description"),
        is_on_diet,
        date: MealDate::from_epoch_millis(date_millis).expect("valid date"),
    }
}

fn meal(owner: &User, content: MealContent, at: DateTime<Utc>) -> Meal {
    Meal::new(MealDraft {
        id: MealId::random(),
        user_id: owner.id(),
        session_id: owner.session_id(),
        content,
        created_at: at,
        updated_at: at,
    })
}

async fn registered(repos: &Repositories, email: &str, at: DateTime<Utc>) -> User {
    let owner = user(SessionId::random(), email, at);
    let outcome = repos
        .users
        .insert_if_email_available(&owner)
        .await
        .expect("insert user");
    assert_eq!(outcome, UserInsertOutcome::Inserted);
    owner
}

#[rstest]
fn duplicate_email_is_reported_as_taken(start: DateTime<Utc>) {
    with_repositories(|repos| async move {
        registered(&repos, "ada@example.com", start).await;
        let imposter = user(SessionId::random(), "ada@example.com", start);

        let outcome = repos
            .users
            .insert_if_email_available(&imposter)
            .await
            .expect("conflicting insert");

        assert_eq!(outcome, UserInsertOutcome::EmailTaken);
        let found = repos
            .users
            .find_by_session(&imposter.session_id())
            .await
            .expect("lookup");
        assert!(found.is_none());
    });
}

#[rstest]
fn session_resolves_to_its_earliest_user(start: DateTime<Utc>) {
    with_repositories(|repos| async move {
        let session = SessionId::random();
        let later = user(session, "grace@example.com", start + Duration::seconds(60));
        let earlier = user(session, "ada@example.com", start);
        for candidate in [&later, &earlier] {
            repos
                .users
                .insert_if_email_available(candidate)
                .await
                .expect("insert user");
        }

        let found = repos
            .users
            .find_by_session(&session)
            .await
            .expect("lookup")
            .expect("user present");

        assert_eq!(found, earlier);
    });
}

#[rstest]
fn listing_orders_by_date_then_creation(start: DateTime<Utc>) {
    with_repositories(|repos| async move {
        let owner = registered(&repos, "ada@example.com", start).await;
        let breakfast = meal(&owner, content("Breakfast", true, JUNE_FIRST_MILLIS), start);
        let lunch = meal(
            &owner,
            content("Lunch", false, JUNE_FIRST_MILLIS + DAY_MILLIS),
            start,
        );
        let dinner = meal(
            &owner,
            content("Dinner", true, JUNE_FIRST_MILLIS + DAY_MILLIS),
            start + Duration::seconds(30),
        );
        for record in [&breakfast, &lunch, &dinner] {
            repos.meals.insert(record).await.expect("insert meal");
        }

        let listed = repos
            .meals
            .list_for_session(&owner.session_id())
            .await
            .expect("list");
        let flags = repos
            .meals
            .diet_flags_newest_first(&owner.id())
            .await
            .expect("flags");

        assert_eq!(listed, vec![dinner, lunch, breakfast]);
        assert_eq!(flags, vec![true, false, true]);
    });
}

#[rstest]
fn scoped_mutations_ignore_foreign_sessions(start: DateTime<Utc>) {
    with_repositories(|repos| async move {
        let owner = registered(&repos, "ada@example.com", start).await;
        let soup = meal(&owner, content("Soup", true, JUNE_FIRST_MILLIS), start);
        repos.meals.insert(&soup).await.expect("insert meal");
        let intruder = SessionId::random();
        let later = start + Duration::seconds(60);

        let replaced = repos
            .meals
            .replace_owned(&soup.id(), &intruder, &content("Burger", false, 0), later)
            .await
            .expect("foreign replace");
        let removed = repos
            .meals
            .delete_owned(&soup.id(), &intruder)
            .await
            .expect("foreign delete");

        assert!(replaced.is_none());
        assert!(!removed);
        let stored = repos
            .meals
            .find_owned(&soup.id(), &owner.session_id())
            .await
            .expect("lookup");
        assert_eq!(stored, Some(soup));
    });
}

#[rstest]
fn patch_returns_the_updated_row(start: DateTime<Utc>) {
    with_repositories(|repos| async move {
        let owner = registered(&repos, "ada@example.com", start).await;
        let soup = meal(&owner, content("Soup", true, JUNE_FIRST_MILLIS), start);
        repos.meals.insert(&soup).await.expect("insert meal");
        let later = start + Duration::seconds(60);
        let patch = MealPatch {
            is_on_diet: Some(false),
            ..MealPatch::default()
        };

        let updated = repos
            .meals
            .patch_owned(&soup.id(), &owner.session_id(), &patch, later)
            .await
            .expect("patch")
            .expect("owned meal matched");

        let mut expected = soup.clone();
        expected.apply(patch, later);
        assert_eq!(updated, expected);
        assert_eq!(updated.created_at(), start);
    });
}

#[rstest]
fn delete_is_idempotent_for_the_owner(start: DateTime<Utc>) {
    with_repositories(|repos| async move {
        let owner = registered(&repos, "ada@example.com", start).await;
        let soup = meal(&owner, content("", true, JUNE_FIRST_MILLIS), start);
        repos.meals.insert(&soup).await.expect("insert meal");

        let first = repos
            .meals
            .delete_owned(&soup.id(), &owner.session_id())
            .await
            .expect("delete");
        let second = repos
            .meals
            .delete_owned(&soup.id(), &owner.session_id())
            .await
            .expect("repeat delete");

        assert!(first);
        assert!(!second);
    });
}
