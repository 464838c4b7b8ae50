//! Shared helpers for integration tests.

#![allow(dead_code)]

use app_lib::commands::{Notice, NoticeKind, Operator};
use app_lib::infra::{init_db, Database};
use std::collections::VecDeque;
use std::ops::Deref;
use tempfile::TempDir;

/// A migrated database in its own temp directory, removed on drop.
pub struct TestDb {
    db: Database,
    _dir: TempDir,
}

impl Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

impl TestDb {
    pub fn handle(&self) -> Database {
        self.db.clone()
    }
}

pub fn init_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db = init_db(&dir.path().join("test.db")).unwrap();
    TestDb { db, _dir: dir }
}

/// Operator that records notices and answers confirmations from a script.
#[derive(Default)]
pub struct ScriptedOperator {
    pub notices: Vec<Notice>,
    pub prompts: Vec<String>,
    answers: VecDeque<bool>,
}

impl ScriptedOperator {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn last(&self) -> &Notice {
        self.notices.last().expect("no notice recorded")
    }

    pub fn last_is(&self, kind: NoticeKind, message: &str) -> bool {
        let n = self.last();
        n.kind == kind && n.message == message
    }
}

impl Operator for ScriptedOperator {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm(&mut self, _title: &str, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
