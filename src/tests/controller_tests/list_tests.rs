// src/tests/controller_tests/list_tests.rs
use crate::controllers::{DeleteOutcome, ListController, DELETE_PROMPT};
use crate::domain::Survey;
use crate::navigation::{Navigator, Route};
use crate::tests::utils::{sample_survey, FakeSurveys};
use std::cell::RefCell;

fn three_surveys() -> Vec<Survey> {
    vec![
        Survey {
            first_name: "Ada".into(),
            liked_students: true,
            liked_sports: true,
            liked_campus: false,
            ..sample_survey()
        },
        Survey {
            first_name: "Barbara".into(),
            liked_students: false,
            liked_campus: false,
            ..sample_survey()
        },
        Survey {
            first_name: "Claude".into(),
            liked_dorm_rooms: true,
            liked_students: false,
            liked_campus: false,
            ..sample_survey()
        },
    ]
}

#[tokio::test]
async fn load_fills_rows_with_liked_items() {
    let fake = FakeSurveys::with(three_surveys());
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    assert!(list.is_loading());

    list.load().await;

    assert!(!list.is_loading());
    assert!(list.notice().is_none());
    let rows = list.rows();
    let summary: Vec<(Option<i64>, &str, &str)> = rows
        .iter()
        .map(|r| (r.id, r.name.as_str(), r.liked_items.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some(1), "Ada Hopper", "Students, Sports"),
            (Some(2), "Barbara Hopper", "None"),
            (Some(3), "Claude Hopper", "Dorm Rooms"),
        ]
    );
}

#[tokio::test]
async fn failed_load_reports_and_stays_empty() {
    let fake = FakeSurveys::with(three_surveys());
    fake.fail_with(Some(502));
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);

    list.load().await;

    assert!(!list.is_loading());
    assert!(list.surveys().is_empty());
    assert_eq!(
        list.notice().unwrap().to_string(),
        "Failed to load surveys. Please make sure the backend is running."
    );
    // No retry on its own.
    assert_eq!(fake.requests(), 1);
}

#[tokio::test]
async fn delete_asks_first_and_reloads() {
    let fake = FakeSurveys::with(three_surveys());
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    list.load().await;

    let asked = RefCell::new(Vec::new());
    let confirm = |message: &str| {
        asked.borrow_mut().push(message.to_string());
        true
    };

    let outcome = list.delete(Some(2), &confirm).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(*asked.borrow(), vec![DELETE_PROMPT.to_string()]);
    // list + delete + reload
    assert_eq!(fake.requests(), 3);
    let ids: Vec<Option<i64>> = list.surveys().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let fake = FakeSurveys::with(three_surveys());
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    list.load().await;

    let outcome = list.delete(Some(1), &|_: &str| false).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(fake.requests(), 1);
    assert_eq!(fake.count(), 3);
}

#[tokio::test]
async fn delete_without_id_is_a_no_op() {
    let fake = FakeSurveys::empty();
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);

    let outcome = list.delete(None, &|_: &str| -> bool { panic!("must not ask") }).await;

    assert_eq!(outcome, DeleteOutcome::Skipped);
    assert_eq!(fake.requests(), 0);
}

#[tokio::test]
async fn failed_delete_keeps_the_list() {
    let fake = FakeSurveys::with(three_surveys());
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    list.load().await;
    let before = list.surveys().to_vec();

    fake.fail_with(Some(500));
    let outcome = list.delete(Some(1), &|_: &str| true).await;

    match outcome {
        DeleteOutcome::Failed(notice) => assert_eq!(notice.message(), "Failed to delete survey"),
        other => panic!("expected Failed, got: {:?}", other),
    }
    assert_eq!(list.surveys(), before.as_slice());
    assert_eq!(list.notice().unwrap().to_string(), "Failed to delete survey");
}

#[tokio::test]
async fn delete_all_clears_and_reloads() {
    let fake = FakeSurveys::with(three_surveys());
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    list.load().await;

    let outcome = list.delete_all(&|_: &str| true).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(list.surveys().is_empty());
    assert_eq!(fake.count(), 0);
}

#[tokio::test]
async fn edit_opens_the_form_for_that_survey() {
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(FakeSurveys::empty(), &nav);

    assert!(!list.edit(None));
    assert_eq!(nav.current(), Route::SurveyList);
    assert!(list.is_active());

    assert!(list.edit(Some(5)));
    assert_eq!(nav.current(), Route::EditSurvey(5));
    assert!(!list.is_active());
}

#[tokio::test]
async fn list_finishing_after_navigation_is_dropped() {
    let fake = FakeSurveys::with(three_surveys());
    let gate = fake.hold();
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    let elsewhere = nav.clone();

    tokio::join!(list.load(), async {
        elsewhere.navigate(Route::NewSurvey);
        gate.notify_one();
    });

    assert!(list.surveys().is_empty());
    assert!(list.notice().is_none());
}

#[tokio::test]
async fn delete_finishing_after_navigation_is_dropped() {
    let fake = FakeSurveys::with(three_surveys());
    let nav = Navigator::new(Route::SurveyList);
    let mut list = ListController::new(fake.clone(), &nav);
    list.load().await;

    let gate = fake.hold();
    let elsewhere = nav.clone();
    let confirm = |_: &str| true;

    let (outcome, _) = tokio::join!(list.delete(Some(1), &confirm), async {
        elsewhere.navigate(Route::NewSurvey);
        gate.notify_one();
    });

    assert_eq!(outcome, DeleteOutcome::Stale);
    // list + delete, no reload for a closed screen
    assert_eq!(fake.requests(), 2);
    assert_eq!(fake.count(), 2);
    assert_eq!(list.surveys().len(), 3);
    assert!(list.notice().is_none());
}
