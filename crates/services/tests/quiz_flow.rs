use std::sync::Arc;
use std::time::Duration;

use quiz_core::QuestionBank;
use quiz_core::model::{Difficulty, QuizConfiguration};
use quiz_core::time::fixed_now;
use services::format::format_short_date;
use services::results::{ALL, ResultFilter, filter_results, per_topic_stats, to_csv};
use services::{Clock, QuizAttempt, QuizSessionService, ResultsService};
use storage::repository::{InMemoryRepository, ResultRepository, SettingKey, SettingsRepository};

const DSA: &str = "Data Structures & Algorithms";

async fn setup(student: &str, difficulty: &str) -> (InMemoryRepository, QuizSessionService) {
    let repo = InMemoryRepository::new();
    repo.set_setting(&SettingKey::StudentName, student).await.unwrap();
    repo.set_setting(&SettingKey::SelectedDifficulty, difficulty)
        .await
        .unwrap();
    let service = QuizSessionService::new(
        Clock::fixed(fixed_now()),
        Arc::new(QuestionBank::builtin().unwrap()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    );
    (repo, service)
}

fn answer_current_correctly(attempt: &mut QuizAttempt) {
    let correct = attempt.session().current_question().correct_answer().to_owned();
    assert!(attempt.select_answer(&correct));
    assert_eq!(attempt.check_answer(), Some(true));
}

#[tokio::test]
async fn perfect_run_on_easy_scores_full_marks() {
    let (repo, service) = setup("Ada Lovelace", "easy").await;
    let mut attempt = service.start_quiz(DSA).await.unwrap().value;
    assert_eq!(attempt.session().question_count(), 7);
    assert_eq!(attempt.session().time_limit_secs(), 420);

    let mut completion = None;
    for _ in 0..7 {
        assert_eq!(
            attempt.session().selected_answers().len(),
            attempt.session().question_count()
        );
        answer_current_correctly(&mut attempt);
        completion = service.advance(&mut attempt).await.unwrap();
    }

    let completion = completion.expect("last advance completes");
    assert!(completion.notice.is_none());
    let result = completion.result;
    assert_eq!(result.score(), 7);
    assert_eq!(result.total_questions(), 7);
    assert_eq!(result.rounded_percent(), 100);
    assert_eq!(result.difficulty(), Difficulty::Easy);
    assert_eq!(
        result.id().as_str(),
        "Ada-Lovelace-Data-Structures-&-Algorithms-2023-11-14T22:13:20.000Z"
    );
    assert_eq!(repo.list_results().await.unwrap(), vec![result]);
}

#[tokio::test(start_paused = true)]
async fn timer_expiry_completes_like_a_manual_finish() {
    let (repo, service) = setup("Grace", "hard").await;
    let config = QuizConfiguration::new(Difficulty::Hard, 30)
        .unwrap()
        .with_time_limit_override(3)
        .unwrap();
    let mut attempt = service.start_quiz_with(DSA, config).await.unwrap().value;
    answer_current_correctly(&mut attempt);
    assert_eq!(attempt.session().time_limit_secs(), 3);

    let started = tokio::time::Instant::now();
    let completion = service
        .run_timer(&mut attempt)
        .await
        .unwrap()
        .expect("timer forces completion");
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert!(!attempt.timer_running());
    assert_eq!(attempt.session().remaining_secs(), 0);

    let result = completion.result;
    assert_eq!(result.score(), 1);
    assert_eq!(result.answers().len(), 7);
    assert!(result.answers()[1..].iter().all(String::is_empty));
    assert!(service.finish(&mut attempt).await.unwrap().is_none());
    assert_eq!(repo.list_results().await.unwrap().len(), 1);
}

#[tokio::test]
async fn racing_finish_and_tick_emit_one_result() {
    let (repo, service) = setup("Linus", "medium").await;
    let config = QuizConfiguration::new(Difficulty::Medium, 45)
        .unwrap()
        .with_time_limit_override(1)
        .unwrap();
    let mut attempt = service.start_quiz_with("Web Development", config).await.unwrap().value;

    let first = service.finish(&mut attempt).await.unwrap();
    let second = service.tick(&mut attempt).await.unwrap();
    let third = service.finish(&mut attempt).await.unwrap();
    assert!(first.is_some());
    assert!(second.is_none());
    assert!(third.is_none());
    assert_eq!(repo.list_results().await.unwrap().len(), 1);
}

#[tokio::test]
async fn navigation_edges() {
    let (_repo, service) = setup("Ada", "medium").await;
    let mut attempt = service.start_quiz(DSA).await.unwrap().value;

    assert!(!attempt.retreat());
    assert_eq!(attempt.session().current_index(), 0);

    let before = attempt.session().bookmarked().clone();
    service.toggle_bookmark(&mut attempt).await;
    service.toggle_bookmark(&mut attempt).await;
    assert_eq!(attempt.session().bookmarked(), &before);

    answer_current_correctly(&mut attempt);
    service.advance(&mut attempt).await.unwrap();
    assert!(attempt.retreat());
    assert!(!attempt.session().is_checked());
    assert_eq!(
        attempt.session().current_selection(),
        Some(attempt.session().current_question().correct_answer())
    );
}

#[tokio::test]
async fn stored_results_feed_stats_filters_and_exports() {
    let (repo, service) = setup("Ada", "hard").await;
    let mut hard = service.start_quiz(DSA).await.unwrap().value;
    for _ in 0..5 {
        answer_current_correctly(&mut hard);
        service.advance(&mut hard).await.unwrap();
    }
    service.finish(&mut hard).await.unwrap();

    repo.set_setting(&SettingKey::SelectedDifficulty, "easy")
        .await
        .unwrap();
    let mut easy = service.start_quiz("Machine Learning").await.unwrap().value;
    service.finish(&mut easy).await.unwrap();

    let all = repo.list_results().await.unwrap();
    let only_hard = filter_results(&all, &ResultFilter::new("", ALL, "hard"));
    assert_eq!(only_hard.len(), 1);
    assert_eq!(only_hard[0].topic(), DSA);
    assert_eq!(only_hard[0].score(), 5);

    let csv = to_csv(only_hard.iter().copied());
    let day = format_short_date(fixed_now());
    assert_eq!(
        csv.lines().nth(1),
        Some(format!("Ada,Data Structures & Algorithms,5,7,71%,{day},hard,N/A").as_str())
    );

    let stats = per_topic_stats(&all);
    assert_eq!(stats.get(DSA).map(|s| s.average_score_percent), Some(71));
    assert_eq!(stats.get("Machine Learning").map(|s| s.attempt_count), Some(1));

    let results = ResultsService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    );
    let overview = results.overview().await.value;
    assert_eq!(overview.total_results, 2);
    assert_eq!(overview.most_active_student.as_deref(), Some("Ada"));
}
