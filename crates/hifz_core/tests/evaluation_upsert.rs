use hifz_core::{
    DatabaseStore, Evaluation, EvaluationEdit, EvaluationRepository, EvaluationService,
    MemoryStore, RepeatOutcome, RepoError, RevisionStatus, Student, StudentId,
    StudentRepository, UpsertMode,
};
use chrono::NaiveDate;

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn evaluation(student: &str, date: &str, score: f64) -> Evaluation {
    let mut evaluation = Evaluation::for_day(StudentId::from(student), day(date));
    evaluation.apply(EvaluationEdit::HifzScore(score));
    evaluation
}

#[test]
fn repeated_upserts_leave_one_record_with_last_payload() {
    let store = MemoryStore::new();
    let repo = EvaluationRepository::new(&store);

    let scores = [3.0, 7.5, 9.0, 4.0];
    for score in scores {
        repo.upsert_evaluation(&evaluation("s", "2024-03-10", score))
            .unwrap();
    }

    let stored = repo.get_evaluations_by_date(day("2024-03-10"));
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].hifz_score, 4.0);
}

#[test]
fn replacement_keeps_storage_position() {
    let store = MemoryStore::new();
    let repo = EvaluationRepository::new(&store);

    assert_eq!(
        repo.upsert_evaluation(&evaluation("a", "2024-03-01", 5.0))
            .unwrap(),
        UpsertMode::Inserted
    );
    repo.upsert_evaluation(&evaluation("b", "2024-03-01", 6.0))
        .unwrap();
    assert_eq!(
        repo.upsert_evaluation(&evaluation("a", "2024-03-01", 8.0))
            .unwrap(),
        UpsertMode::Replaced
    );

    let all = repo.list_evaluations();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].student_id, StudentId::from("a"));
    assert_eq!(all[0].hifz_score, 8.0);
}

#[test]
fn invalid_evaluations_are_rejected() {
    let store = MemoryStore::new();
    let repo = EvaluationRepository::new(&store);

    let err = repo
        .upsert_evaluation(&evaluation("a", "2024-03-01", 11.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_evaluations().is_empty());
}

#[test]
fn evaluations_by_date_keep_storage_order() {
    let store = MemoryStore::new();
    let repo = EvaluationRepository::new(&store);
    repo.upsert_evaluation(&evaluation("c", "2024-03-02", 5.0))
        .unwrap();
    repo.upsert_evaluation(&evaluation("a", "2024-03-01", 5.0))
        .unwrap();
    repo.upsert_evaluation(&evaluation("b", "2024-03-02", 5.0))
        .unwrap();

    let ids: Vec<StudentId> = repo
        .get_evaluations_by_date(day("2024-03-02"))
        .into_iter()
        .map(|evaluation| evaluation.student_id)
        .collect();
    assert_eq!(ids, vec![StudentId::from("c"), StudentId::from("b")]);
    assert!(repo.get_evaluations_by_date(day("2024-03-03")).is_empty());
}

#[test]
fn last_evaluation_is_latest_by_date_not_by_insertion() {
    let store = MemoryStore::new();
    let repo = EvaluationRepository::new(&store);
    repo.upsert_evaluation(&evaluation("a", "2024-04-10", 9.0))
        .unwrap();
    repo.upsert_evaluation(&evaluation("a", "2024-02-01", 2.0))
        .unwrap();
    repo.upsert_evaluation(&evaluation("b", "2024-05-01", 1.0))
        .unwrap();

    let last = repo.get_last_evaluation(&StudentId::from("a")).unwrap();
    assert_eq!(last.date, day("2024-04-10"));
    assert!(repo.get_last_evaluation(&StudentId::from("z")).is_none());
}

#[test]
fn end_to_end_upsert_scenario() {
    let store = MemoryStore::new();
    let students = StudentRepository::new(&store);
    let evaluations = EvaluationRepository::new(&store);
    let student = Student::with_id(StudentId::from("A"), "A", 1);
    students.add_student(&student).unwrap();

    let mut first = Evaluation::for_day(student.id.clone(), day("2024-01-01"));
    first.apply(EvaluationEdit::HifzScore(7.0));
    first.apply(EvaluationEdit::Revision(RevisionStatus::Fair));
    first.apply(EvaluationEdit::Behavior(4));
    evaluations.upsert_evaluation(&first).unwrap();

    let mut second = Evaluation::for_day(student.id.clone(), day("2024-01-01"));
    second.apply(EvaluationEdit::HifzScore(9.0));
    second.apply(EvaluationEdit::Revision(RevisionStatus::Excellent));
    second.apply(EvaluationEdit::Behavior(5));
    evaluations.upsert_evaluation(&second).unwrap();

    let stored = evaluations.get_evaluations_by_date(day("2024-01-01"));
    assert_eq!(stored, vec![second.clone()]);
    assert_eq!(evaluations.get_last_evaluation(&student.id), Some(second));
}

#[test]
fn edit_for_day_starts_from_defaults_then_updates_in_place() {
    let store = MemoryStore::new();
    let service = EvaluationService::new(&store);
    let student_id = StudentId::from("s");
    let date = day("2024-06-01");

    let created = service
        .edit_for_day(&student_id, date, EvaluationEdit::Behavior(3))
        .unwrap();
    assert_eq!(created.hifz_score, 10.0);
    assert_eq!(created.revision_status, RevisionStatus::Excellent);
    assert_eq!(created.behavior_rating, 3);

    let updated = service
        .edit_for_day(&student_id, date, EvaluationEdit::HifzScore(6.5))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.behavior_rating, 3);

    assert_eq!(service.evaluations_on(date), vec![updated]);
}

#[test]
fn repeat_last_copies_latest_onto_new_day() {
    let store = MemoryStore::new();
    let service = EvaluationService::new(&store);
    let student_id = StudentId::from("s");

    let previous = service
        .edit_for_day(&student_id, day("2024-06-01"), EvaluationEdit::HifzScore(7.5))
        .unwrap();

    let outcome = service.repeat_last(&student_id, day("2024-06-08")).unwrap();
    let RepeatOutcome::Repeated(copy) = outcome else {
        panic!("expected a repeated evaluation");
    };
    assert_ne!(copy.id, previous.id);
    assert_eq!(copy.date, day("2024-06-08"));
    assert_eq!(copy.hifz_score, 7.5);
    assert_eq!(service.history(&student_id).len(), 2);
}

#[test]
fn repeat_last_without_history_writes_nothing() {
    let store = MemoryStore::new();
    let service = EvaluationService::new(&store);

    let outcome = service
        .repeat_last(&StudentId::from("new"), day("2024-06-08"))
        .unwrap();
    assert_eq!(outcome, RepeatOutcome::NoPriorEvaluation);
    assert!(store.raw().is_none());
    assert!(store.load().evaluations.is_empty());
}
