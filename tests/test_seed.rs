//! Sample seeder integration tests

mod common;

use app_lib::app::{
    post_create, post_list, seed_sample_data, user_create, user_delete, user_list, PostCreateReq,
    SeedReport, UserCreateReq, SAMPLE_POSTS,
};
use common::init_test_db;

#[test]
fn seed_empty_store() {
    let db = init_test_db();
    let report = seed_sample_data(&db).unwrap();
    assert_eq!(
        report,
        SeedReport {
            users_inserted: 5,
            posts_inserted: 3
        }
    );

    let users = user_list(&db).unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Charlie", "David", "Eva"]);
    assert_eq!(users[0].email.as_deref(), Some("alice@example.com"));
    assert_eq!(users[0].age, Some(25));
    assert_eq!(users[4].contact.as_deref(), Some("0123456793"));

    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let posts = post_list(&db).unwrap();
    assert_eq!(posts.len(), 3);
    for (i, (title, _, created_at)) in SAMPLE_POSTS.iter().enumerate() {
        let post = posts.iter().find(|p| p.title == *title).unwrap();
        assert_eq!(post.owner_id, ids[i % ids.len()]);
        assert_eq!(post.created_at, *created_at);
    }
    // Newest sample first.
    assert_eq!(posts[0].title, "Solar Water Purification");
}

#[test]
fn seed_twice_does_not_duplicate() {
    let db = init_test_db();
    seed_sample_data(&db).unwrap();
    let second = seed_sample_data(&db).unwrap();
    assert_eq!(second, SeedReport::default());
    assert_eq!(user_list(&db).unwrap().len(), 5);
    assert_eq!(post_list(&db).unwrap().len(), 3);
}

#[test]
fn seed_skips_users_when_any_exist() {
    let db = init_test_db();
    let own = user_create(
        &db,
        UserCreateReq {
            name: "Owner".to_string(),
            email: None,
            age: None,
            contact: None,
        },
    )
    .unwrap();

    let report = seed_sample_data(&db).unwrap();
    assert_eq!(report.users_inserted, 0);
    assert_eq!(report.posts_inserted, 3);
    assert!(post_list(&db).unwrap().iter().all(|p| p.owner_id == own.id));
}

#[test]
fn seed_skips_posts_when_any_exist() {
    let db = init_test_db();
    user_create(
        &db,
        UserCreateReq {
            name: "Writer".to_string(),
            email: None,
            age: None,
            contact: None,
        },
    )
    .unwrap();
    post_create(
        &db,
        PostCreateReq {
            title: "Mine".to_string(),
            body: "Already here".to_string(),
            author: "Writer".to_string(),
            created_at: None,
        },
    )
    .unwrap();

    let report = seed_sample_data(&db).unwrap();
    assert_eq!(report.posts_inserted, 0);
    assert_eq!(post_list(&db).unwrap().len(), 1);
}

#[test]
fn seed_after_users_deleted_reseeds_users_only_when_empty() {
    let db = init_test_db();
    seed_sample_data(&db).unwrap();
    for u in user_list(&db).unwrap() {
        user_delete(&db, u.id).unwrap();
    }
    assert!(post_list(&db).unwrap().is_empty());

    let report = seed_sample_data(&db).unwrap();
    assert_eq!(report.users_inserted, 5);
    assert_eq!(report.posts_inserted, 3);
    let ids: Vec<i64> = user_list(&db).unwrap().iter().map(|u| u.id).collect();
    assert!(ids.iter().all(|id| *id > 5));
}
