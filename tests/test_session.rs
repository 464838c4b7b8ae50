//! Terminal session end-to-end tests with scripted input.

mod common;

use app_lib::app::{post_list, seed_sample_data, user_list};
use app_lib::commands::Presenter;
use app_lib::session::{run_session, Terminal};
use common::init_test_db;
use std::io::Cursor;

fn run_script(db: &app_lib::infra::Database, script: &str) -> String {
    let mut presenter = Presenter::new(db.clone()).unwrap();
    let mut out = Vec::new();
    {
        let mut term = Terminal::new(Cursor::new(script.as_bytes().to_vec()), &mut out);
        run_session(&mut presenter, &mut term).unwrap();
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn add_user_through_session() {
    let db = init_test_db();
    seed_sample_data(&db).unwrap();
    let out = run_script(
        &db,
        "set name Grace\nset email grace@example.com\nset age 33\nadd\nquit\n",
    );
    assert!(out.contains("[INFO] Success: User added."));
    assert!(user_list(&db).unwrap().iter().any(|u| u.name == "Grace"));
}

#[test]
fn delete_asks_for_confirmation() {
    let db = init_test_db();
    seed_sample_data(&db).unwrap();
    let out = run_script(&db, "posts\nselect 1\ndelete\nn\ndelete\ny\n");
    assert!(out.contains("Confirm: Delete this news? [y/N]"));
    assert!(out.contains("[INFO] Success: News deleted."));
    assert_eq!(post_list(&db).unwrap().len(), 2);
}

#[test]
fn drill_down_panel_round_trip() {
    let db = init_test_db();
    seed_sample_data(&db).unwrap();
    let out = run_script(&db, "view\nselect 3\nview\nadd\nopen 1\nback\nquit\n");
    assert!(out.contains("[WARN] Select: Please select a user."));
    assert!(out.contains("== News posted by Charlie =="));
    assert!(out.contains("The news panel is open"));
    assert!(out.contains("Title: Solar Water Purification\nDate: 2025-11-10 14:15:00"));
}

#[test]
fn end_of_input_closes_session() {
    let db = init_test_db();
    let out = run_script(&db, "help\n");
    assert!(out.contains("Commands:"));
    assert!(out.ends_with("users> "));
}

#[test]
fn undecodable_line_is_rejected_and_session_continues() {
    let db = init_test_db();
    seed_sample_data(&db).unwrap();
    let mut presenter = Presenter::new(db.handle()).unwrap();
    let mut out = Vec::new();
    {
        let script = b"list\n\xff\xfe bad\nposts\nquit\n".to_vec();
        let mut term = Terminal::new(Cursor::new(script), &mut out);
        run_session(&mut presenter, &mut term).unwrap();
    }
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Unknown command `\u{fffd}\u{fffd}`"));
    // The line after the bad one is still handled.
    assert!(out.contains("Breakthrough in AI Art"));
    assert!(out.ends_with("posts> "));
}
