use std::collections::BTreeSet;

use chrono::Duration;
use quiz_core::model::{Difficulty, QuizResult, QuizResultDraft, ResultId};
use quiz_core::time::fixed_now;
use storage::repository::{ResultRepository, SettingKey, SettingsRepository};
use storage::sqlite::SqliteRepository;

fn build_result(student: &str, topic: &str, score: u32, minutes: i64) -> QuizResult {
    QuizResultDraft {
        id: None,
        student_name: student.into(),
        topic: topic.into(),
        score,
        total_questions: 7,
        date: fixed_now() + Duration::minutes(minutes),
        answers: vec![
            "O(log n)".into(),
            String::new(),
            "Stack".into(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ],
        difficulty: Difficulty::Hard,
        bookmarked_questions: BTreeSet::from([0, 4]),
        time_taken_secs: if score == 0 { None } else { Some(95) },
    }
    .validate()
    .unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrips_results_in_insertion_order() {
    let repo = connect("memdb_results_roundtrip").await;

    let first = build_result("Ada Lovelace", "Data Structures & Algorithms", 5, 0);
    let second = build_result("Grace", "Computer Graphics", 0, 1);
    repo.append_result(&first).await.unwrap();
    repo.append_result(&second).await.unwrap();

    let fetched = repo.list_results().await.unwrap();
    assert_eq!(fetched, vec![first, second]);
    assert_eq!(fetched[0].bookmarked_questions(), &BTreeSet::from([0, 4]));
    assert_eq!(fetched[0].answers()[0], "O(log n)");
    assert_eq!(fetched[1].time_taken_secs(), None);
}

#[tokio::test]
async fn sqlite_delete_by_ids_returns_remaining() {
    let repo = connect("memdb_results_delete").await;

    let a = build_result("A", "Web Development", 1, 0);
    let b = build_result("B", "Web Development", 2, 1);
    let c = build_result("C", "Web Development", 3, 2);
    for r in [&a, &b, &c] {
        repo.append_result(r).await.unwrap();
    }

    let remaining = repo
        .delete_results(&[a.id().clone(), c.id().clone(), ResultId::new("nope")])
        .await
        .unwrap();
    assert_eq!(remaining, vec![b.clone()]);

    let unchanged = repo.delete_results(&[]).await.unwrap();
    assert_eq!(unchanged, vec![b]);

    repo.clear_results().await.unwrap();
    assert!(repo.list_results().await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_settings_upsert_and_remove() {
    let repo = connect("memdb_settings").await;

    assert_eq!(repo.get_setting(&SettingKey::TimerEasy).await.unwrap(), None);
    repo.set_setting(&SettingKey::TimerEasy, "90").await.unwrap();
    repo.set_setting(&SettingKey::TimerEasy, "75").await.unwrap();
    assert_eq!(
        repo.get_setting(&SettingKey::TimerEasy).await.unwrap().as_deref(),
        Some("75")
    );

    let bookmarks = SettingKey::Bookmarks("Machine Learning".into());
    repo.set_setting(&bookmarks, "[2]").await.unwrap();
    repo.remove_setting(&SettingKey::TimerEasy).await.unwrap();
    assert_eq!(repo.get_setting(&SettingKey::TimerEasy).await.unwrap(), None);
    assert_eq!(
        repo.get_setting(&bookmarks).await.unwrap().as_deref(),
        Some("[2]")
    );
}

#[tokio::test]
async fn sqlite_rows_without_id_get_legacy_id_from_raw_date() {
    let repo = connect("memdb_results_legacy_id").await;

    for (id, student) in [(None, "Ada Lovelace"), (Some("  "), "Grace")] {
        sqlx::query(
            r"
                INSERT INTO quiz_results (
                    id, student_name, topic, score, total_questions, date,
                    answers, difficulty, bookmarked_questions, time_taken_secs
                )
                VALUES (?1, ?2, 'Web Development', 3, 7, '2024-01-02T03:04:05.000Z',
                        '[]', 'easy', '[]', NULL)
            ",
        )
        .bind(id)
        .bind(student)
        .execute(repo.pool())
        .await
        .unwrap();
    }

    let fetched = repo.list_results().await.unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(
        fetched[0].id().as_str(),
        "Ada-Lovelace-Web-Development-2024-01-02T03:04:05.000Z"
    );
    assert_eq!(
        fetched[1].id().as_str(),
        "Grace-Web-Development-2024-01-02T03:04:05.000Z"
    );
    assert!(fetched[0].answers().is_empty());

    let remaining = repo.delete_results(&[fetched[1].id().clone()]).await.unwrap();
    assert_eq!(remaining, vec![fetched[0].clone()]);
}
