//! Integration tests for the repository layer.
//!
//! Exercises the repositories against a real SQLite database:
//! - Demand totals, replacement and soft delete
//! - Dashboard aggregation over active demands
//! - Idempotent clock-in
//! - Lesson progress transitions
//! - Link tags and notification visibility
//! - Unique and foreign key violations

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use studio_core::demand::PricedItem;
use studio_core::period::DateRange;
use studio_core::roles::{ROLE_ADMIN, ROLE_DESIGNER};
use studio_db::models::art_type::{CreateArtType, UpdateArtType};
use studio_db::models::award::CreateAward;
use studio_db::models::demand::{DemandFilter, SaveDemand};
use studio_db::models::link::{CreateLink, UpdateLink};
use studio_db::models::notification::CreateNotification;
use studio_db::models::session::CreateSession;
use studio_db::models::user::CreateUser;
use studio_db::repositories::{
    ArtTypeRepo, AwardRepo, DashboardRepo, DemandRepo, LessonProgressRepo, LessonRepo, LinkRepo,
    NotificationRepo, SessionRepo, TagRepo, UserRepo, WorkSessionRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn user(pool: &SqlitePool, username: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: username.to_uppercase(),
            email: None,
            password_hash: "hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn art_type(pool: &SqlitePool, name: &str, points: i64) -> i64 {
    ArtTypeRepo::create(
        pool,
        &CreateArtType {
            name: name.to_string(),
            description: None,
            points,
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn save(designer_id: i64, work_date: NaiveDate, items: Vec<PricedItem>) -> SaveDemand {
    SaveDemand {
        designer_id,
        work_date,
        title: "Campaign".to_string(),
        notes: None,
        items,
        created_by: designer_id,
    }
}

fn item(art_type_id: i64, quantity: i64, points_per_unit: i64) -> PricedItem {
    PricedItem {
        art_type_id,
        quantity,
        points_per_unit,
    }
}

// ---------------------------------------------------------------------------
// Demands
// ---------------------------------------------------------------------------

/// Stored totals equal the sum of the stored lines.
#[sqlx::test(migrations = "./migrations")]
async fn test_demand_totals_persisted(pool: SqlitePool) {
    let designer = user(&pool, "ana", ROLE_DESIGNER).await;
    let post = art_type(&pool, "Post", 2).await;
    let banner = art_type(&pool, "Banner", 5).await;

    let id = DemandRepo::create(
        &pool,
        &save(designer, d(2024, 3, 4), vec![item(post, 3, 2), item(banner, 1, 5)]),
    )
    .await
    .unwrap();

    let demand = DemandRepo::find_with_items(&pool, id).await.unwrap().unwrap();
    assert_eq!(demand.demand.total_quantity, 4);
    assert_eq!(demand.demand.total_points, 11);
    assert_eq!(demand.demand.designer_name, "ANA");
    assert_eq!(demand.items.len(), 2);
    assert_eq!(demand.items[0].art_type_name, "Post");
    assert_eq!(demand.items[0].line_points, 6);
}

/// Replacing a demand swaps its items and recomputes totals.
#[sqlx::test(migrations = "./migrations")]
async fn test_demand_replace(pool: SqlitePool) {
    let designer = user(&pool, "ana", ROLE_DESIGNER).await;
    let post = art_type(&pool, "Post", 2).await;

    let id = DemandRepo::create(&pool, &save(designer, d(2024, 3, 4), vec![item(post, 3, 2)]))
        .await
        .unwrap();
    let replaced = DemandRepo::replace(
        &pool,
        id,
        &save(designer, d(2024, 3, 5), vec![item(post, 10, 2)]),
    )
    .await
    .unwrap();
    assert!(replaced);

    let demand = DemandRepo::find_with_items(&pool, id).await.unwrap().unwrap();
    assert_eq!(demand.demand.work_date, d(2024, 3, 5));
    assert_eq!(demand.demand.total_points, 20);
    assert_eq!(demand.items.len(), 1);
}

/// Soft-deleted demands disappear from lookups, listings and aggregates.
#[sqlx::test(migrations = "./migrations")]
async fn test_demand_soft_delete_excluded(pool: SqlitePool) {
    let designer = user(&pool, "ana", ROLE_DESIGNER).await;
    let post = art_type(&pool, "Post", 4).await;
    let day = d(2024, 3, 4);

    let keep = DemandRepo::create(&pool, &save(designer, day, vec![item(post, 1, 4)]))
        .await
        .unwrap();
    let gone = DemandRepo::create(&pool, &save(designer, day, vec![item(post, 2, 4)]))
        .await
        .unwrap();

    assert!(DemandRepo::soft_delete(&pool, gone).await.unwrap());
    assert!(!DemandRepo::soft_delete(&pool, gone).await.unwrap());
    assert!(DemandRepo::find_by_id(&pool, gone).await.unwrap().is_none());
    assert!(!DemandRepo::replace(&pool, gone, &save(designer, day, vec![item(post, 1, 4)]))
        .await
        .unwrap());

    let listed = DemandRepo::list(&pool, &DemandFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].demand.id, keep);

    let range = DateRange::single(day);
    let totals = DashboardRepo::designer_totals(&pool, &range, None).await.unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].points, 4);
    assert_eq!(totals[0].demands, 1);
    assert_eq!(DashboardRepo::lifetime_points(&pool, designer).await.unwrap(), 4);

    let studio = DashboardRepo::studio_totals(&pool, &range, None).await.unwrap();
    assert_eq!((studio.points, studio.quantity, studio.demands), (4, 1, 1));
}

/// Listing filters by designer and date range, newest first.
#[sqlx::test(migrations = "./migrations")]
async fn test_demand_list_filters(pool: SqlitePool) {
    let ana = user(&pool, "ana", ROLE_DESIGNER).await;
    let bia = user(&pool, "bia", ROLE_DESIGNER).await;
    let post = art_type(&pool, "Post", 1).await;

    for (who, day) in [(ana, 1), (ana, 3), (bia, 2), (ana, 10)] {
        DemandRepo::create(&pool, &save(who, d(2024, 3, day), vec![item(post, 1, 1)]))
            .await
            .unwrap();
    }

    let filter = DemandFilter {
        designer_id: Some(ana),
        start: Some(d(2024, 3, 1)),
        end: Some(d(2024, 3, 5)),
        ..Default::default()
    };
    let listed = DemandRepo::list(&pool, &filter).await.unwrap();
    let dates: Vec<_> = listed.iter().map(|x| x.demand.work_date).collect();
    assert_eq!(dates, [d(2024, 3, 3), d(2024, 3, 1)]);
}

/// A demand line must reference an existing art type.
#[sqlx::test(migrations = "./migrations")]
async fn test_demand_unknown_art_type_fk(pool: SqlitePool) {
    let designer = user(&pool, "ana", ROLE_DESIGNER).await;
    let result =
        DemandRepo::create(&pool, &save(designer, d(2024, 3, 4), vec![item(999, 1, 1)])).await;
    assert_matches!(result, Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation());

    // The failed transaction left nothing behind.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM demands")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ---------------------------------------------------------------------------
// Art types and users
// ---------------------------------------------------------------------------

/// Art type names are unique.
#[sqlx::test(migrations = "./migrations")]
async fn test_art_type_unique_name(pool: SqlitePool) {
    art_type(&pool, "Post", 1).await;
    let result = ArtTypeRepo::create(
        &pool,
        &CreateArtType {
            name: "Post".to_string(),
            description: None,
            points: 3,
            sort_order: None,
        },
    )
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(e)) if e.is_unique_violation());
}

/// Changing an art type's points does not rewrite history.
#[sqlx::test(migrations = "./migrations")]
async fn test_art_type_points_snapshot(pool: SqlitePool) {
    let designer = user(&pool, "ana", ROLE_DESIGNER).await;
    let post = art_type(&pool, "Post", 2).await;
    let id = DemandRepo::create(&pool, &save(designer, d(2024, 3, 4), vec![item(post, 5, 2)]))
        .await
        .unwrap();

    ArtTypeRepo::update(
        &pool,
        post,
        &UpdateArtType {
            points: Some(9),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let demand = DemandRepo::find_with_items(&pool, id).await.unwrap().unwrap();
    assert_eq!(demand.demand.total_points, 10);
    assert_eq!(demand.items[0].points_per_unit, 2);
}

/// Inactive art types are hidden unless explicitly requested.
#[sqlx::test(migrations = "./migrations")]
async fn test_art_type_deactivate(pool: SqlitePool) {
    let post = art_type(&pool, "Post", 2).await;
    art_type(&pool, "Banner", 3).await;
    assert!(ArtTypeRepo::deactivate(&pool, post).await.unwrap());

    assert_eq!(ArtTypeRepo::list(&pool, false).await.unwrap().len(), 1);
    assert_eq!(ArtTypeRepo::list(&pool, true).await.unwrap().len(), 2);
}

/// Designer listing excludes admins and inactive users.
#[sqlx::test(migrations = "./migrations")]
async fn test_list_designers(pool: SqlitePool) {
    user(&pool, "boss", ROLE_ADMIN).await;
    user(&pool, "ana", ROLE_DESIGNER).await;
    let gone = user(&pool, "bia", ROLE_DESIGNER).await;
    UserRepo::deactivate(&pool, gone).await.unwrap();

    let designers = UserRepo::list_designers(&pool).await.unwrap();
    assert_eq!(designers.len(), 1);
    assert_eq!(designers[0].username, "ana");
    assert_eq!(UserRepo::count_active_admins(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Revoked and expired sessions are cleaned up; live ones survive.
#[sqlx::test(migrations = "./migrations")]
async fn test_session_cleanup(pool: SqlitePool) {
    let uid = user(&pool, "ana", ROLE_DESIGNER).await;
    let now = Utc::now();

    let mk = |hash: &str, expires_at| CreateSession {
        user_id: uid,
        refresh_token_hash: hash.to_string(),
        expires_at,
        user_agent: None,
        ip_address: None,
    };
    let live = SessionRepo::create(&pool, &mk("live", now + Duration::days(1)))
        .await
        .unwrap();
    SessionRepo::create(&pool, &mk("old", now - Duration::days(1)))
        .await
        .unwrap();
    let revoked = SessionRepo::create(&pool, &mk("revoked", now + Duration::days(1)))
        .await
        .unwrap();
    SessionRepo::revoke(&pool, revoked.id).await.unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "old")
        .await
        .unwrap()
        .is_none());

    let deleted = SessionRepo::cleanup_expired(&pool, now).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(SessionRepo::find_by_id(&pool, live.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Designers with no work still get a zero row; art types sort by points.
#[sqlx::test(migrations = "./migrations")]
async fn test_dashboard_aggregates(pool: SqlitePool) {
    let ana = user(&pool, "ana", ROLE_DESIGNER).await;
    let bia = user(&pool, "bia", ROLE_DESIGNER).await;
    user(&pool, "boss", ROLE_ADMIN).await;
    let post = art_type(&pool, "Post", 1).await;
    let video = art_type(&pool, "Video", 10).await;

    DemandRepo::create(&pool, &save(ana, d(2024, 3, 4), vec![item(post, 4, 1)]))
        .await
        .unwrap();
    DemandRepo::create(&pool, &save(ana, d(2024, 3, 6), vec![item(video, 1, 10)]))
        .await
        .unwrap();

    let range = DateRange::new(d(2024, 3, 4), d(2024, 3, 8)).unwrap();
    let rows = DashboardRepo::designer_totals(&pool, &range, None).await.unwrap();
    assert_eq!(rows.len(), 2);
    let bia_row = rows.iter().find(|r| r.designer_id == bia).unwrap();
    assert_eq!(bia_row.points, 0);
    assert_eq!(bia_row.demands, 0);

    let daily = DashboardRepo::daily_totals(&pool, &range, Some(ana)).await.unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[1].work_date, d(2024, 3, 6));

    let by_type = DashboardRepo::art_type_totals(&pool, &range, None).await.unwrap();
    assert_eq!(by_type[0].art_type_name, "Video");
    assert_eq!(by_type[1].quantity, 4);
}

// ---------------------------------------------------------------------------
// Work sessions
// ---------------------------------------------------------------------------

/// Clocking in twice on the same day returns the first session.
#[sqlx::test(migrations = "./migrations")]
async fn test_clock_in_idempotent(pool: SqlitePool) {
    let ana = user(&pool, "ana", ROLE_DESIGNER).await;
    let day = d(2024, 3, 4);

    let (first, created) = WorkSessionRepo::clock_in(&pool, ana, day).await.unwrap();
    assert!(created);
    let (second, created_again) = WorkSessionRepo::clock_in(&pool, ana, day).await.unwrap();
    assert!(!created_again);
    assert_eq!(first.id, second.id);

    let (_, next_day) = WorkSessionRepo::clock_in(&pool, ana, d(2024, 3, 5)).await.unwrap();
    assert!(next_day);
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

/// `completed_at` is set on completion and cleared when reopened.
#[sqlx::test(migrations = "./migrations")]
async fn test_lesson_progress_transitions(pool: SqlitePool) {
    let ana = user(&pool, "ana", ROLE_DESIGNER).await;
    let lesson = LessonRepo::create(
        &pool,
        &studio_db::models::lesson::CreateLesson {
            title: "Typography".to_string(),
            description: None,
            url: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let p = LessonProgressRepo::upsert(&pool, lesson.id, ana, "in_progress").await.unwrap();
    assert!(p.completed_at.is_none());
    let p = LessonProgressRepo::upsert(&pool, lesson.id, ana, "completed").await.unwrap();
    assert!(p.completed_at.is_some());

    let counts = LessonProgressRepo::completed_counts(&pool).await.unwrap();
    assert_eq!(counts[0].completed, 1);

    let p = LessonProgressRepo::upsert(&pool, lesson.id, ana, "in_progress").await.unwrap();
    assert!(p.completed_at.is_none());
    assert_eq!(LessonProgressRepo::list_for_designer(&pool, ana).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Awards, links, notifications
// ---------------------------------------------------------------------------

/// The same award title cannot be given twice to a designer in one month.
#[sqlx::test(migrations = "./migrations")]
async fn test_award_unique_per_month(pool: SqlitePool) {
    let admin = user(&pool, "boss", ROLE_ADMIN).await;
    let ana = user(&pool, "ana", ROLE_DESIGNER).await;
    let award = CreateAward {
        designer_id: ana,
        month: "2024-03".to_string(),
        title: "Top designer".to_string(),
        description: None,
    };
    AwardRepo::create(&pool, admin, &award).await.unwrap();
    let dup = AwardRepo::create(&pool, admin, &award).await;
    assert_matches!(dup, Err(sqlx::Error::Database(e)) if e.is_unique_violation());

    let listed = AwardRepo::list(&pool, Some("2024-03"), None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].designer_name, "ANA");
}

/// Tags are created on demand, filtered on, and replaced on update.
#[sqlx::test(migrations = "./migrations")]
async fn test_link_tags(pool: SqlitePool) {
    let admin = user(&pool, "boss", ROLE_ADMIN).await;
    let link = LinkRepo::create(
        &pool,
        admin,
        &CreateLink {
            title: "Palette tool".to_string(),
            url: "https://example.com/palette".to_string(),
            description: None,
        },
        &["color".to_string(), "tools".to_string()],
    )
    .await
    .unwrap();
    assert_eq!(link.tags, ["color", "tools"]);

    assert_eq!(LinkRepo::list(&pool, Some("color")).await.unwrap().len(), 1);
    assert!(LinkRepo::list(&pool, Some("fonts")).await.unwrap().is_empty());

    let updated = LinkRepo::update(
        &pool,
        link.link.id,
        &UpdateLink::default(),
        Some(&["fonts".to_string()]),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.tags, ["fonts"]);

    let tags = TagRepo::list_with_counts(&pool).await.unwrap();
    let color = tags.iter().find(|t| t.name == "color").unwrap();
    assert_eq!(color.link_count, 0);
}

/// Dismissed and expired banners are hidden from the designer.
#[sqlx::test(migrations = "./migrations")]
async fn test_notification_visibility(pool: SqlitePool) {
    let admin = user(&pool, "boss", ROLE_ADMIN).await;
    let ana = user(&pool, "ana", ROLE_DESIGNER).await;
    let mk = |message: &str, expires_at| CreateNotification {
        designer_id: ana,
        message: message.to_string(),
        level: "info".to_string(),
        expires_at,
    };

    let shown = NotificationRepo::create(&pool, admin, &mk("hello", None)).await.unwrap();
    NotificationRepo::create(&pool, admin, &mk("old", Some(Utc::now() - Duration::hours(1))))
        .await
        .unwrap();
    let dismissed = NotificationRepo::create(&pool, admin, &mk("bye", None)).await.unwrap();
    assert!(NotificationRepo::dismiss(&pool, dismissed.id, ana).await.unwrap());
    assert!(!NotificationRepo::dismiss(&pool, shown.id, admin).await.unwrap());

    let visible = NotificationRepo::list_visible_for_designer(&pool, ana).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, shown.id);
    assert_eq!(NotificationRepo::list(&pool, Some(ana)).await.unwrap().len(), 3);
}
