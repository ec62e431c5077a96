use askloop_core::db::open_db_in_memory;
use askloop_core::{
    FeedbackService, QuestionService, ServiceError, SqliteFeedbackRepository,
    SqliteQuestionRepository, TextField, ValidationError, FEEDBACK_MAX_CHARS, QUESTION_MAX_CHARS,
};
use rusqlite::Connection;
use uuid::Uuid;

fn question_service(conn: &Connection) -> QuestionService<SqliteQuestionRepository<'_>> {
    QuestionService::new(SqliteQuestionRepository::new(conn))
}

fn feedback_service(
    conn: &Connection,
) -> FeedbackService<SqliteQuestionRepository<'_>, SqliteFeedbackRepository<'_>> {
    FeedbackService::new(
        SqliteQuestionRepository::new(conn),
        SqliteFeedbackRepository::new(conn),
    )
}

#[test]
fn create_question_then_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = question_service(&conn);

    let created = service.create_question("What do you think?").unwrap();
    let loaded = service.get_question(&created.id.to_string()).unwrap();

    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.text, "What do you think?");
}

#[test]
fn create_question_stores_trimmed_text() {
    let conn = open_db_in_memory().unwrap();
    let service = question_service(&conn);

    for raw in ["  padded  ", "\nline\t", "x"] {
        let created = service.create_question(raw).unwrap();
        assert_eq!(created.text, raw.trim());
        let loaded = service.get_question(&created.id.to_string()).unwrap();
        assert_eq!(loaded.text, raw.trim());
    }
}

#[test]
fn create_question_rejects_empty_and_blank_text() {
    let conn = open_db_in_memory().unwrap();
    let service = question_service(&conn);

    for raw in ["", "   "] {
        let err = service.create_question(raw).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Empty {
                field: TextField::Question
            })
        ));
    }
}

#[test]
fn create_question_enforces_length_limit() {
    let conn = open_db_in_memory().unwrap();
    let service = question_service(&conn);

    assert!(service
        .create_question(&"q".repeat(QUESTION_MAX_CHARS))
        .is_ok());
    let err = service
        .create_question(&"q".repeat(QUESTION_MAX_CHARS + 1))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TooLong { .. })
    ));
}

#[test]
fn get_question_distinguishes_malformed_and_absent_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = question_service(&conn);

    let malformed = service.get_question("not-an-id").unwrap_err();
    assert!(matches!(malformed, ServiceError::InvalidId(_)));

    let absent_id = Uuid::new_v4();
    let absent = service.get_question(&absent_id.to_string()).unwrap_err();
    assert!(matches!(absent, ServiceError::QuestionNotFound(id) if id == absent_id));
}

#[test]
fn create_feedback_requires_existing_question() {
    let conn = open_db_in_memory().unwrap();
    let service = feedback_service(&conn);

    let err = service
        .create_feedback("great", &Uuid::new_v4().to_string())
        .unwrap_err();
    assert!(matches!(err, ServiceError::QuestionNotFound(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM feedbacks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn create_feedback_rejects_malformed_question_id() {
    let conn = open_db_in_memory().unwrap();
    let service = feedback_service(&conn);

    let err = service.create_feedback("great", "12345").unwrap_err();
    assert!(matches!(err, ServiceError::InvalidId(raw) if raw == "12345"));
}

#[test]
fn create_feedback_checks_text_before_id() {
    let conn = open_db_in_memory().unwrap();
    let service = feedback_service(&conn);

    let err = service.create_feedback("  ", "12345").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Empty {
            field: TextField::Feedback
        })
    ));
}

#[test]
fn create_feedback_enforces_length_limit() {
    let conn = open_db_in_memory().unwrap();
    let question = question_service(&conn).create_question("Q").unwrap();
    let service = feedback_service(&conn);
    let question_id = question.id.to_string();

    assert!(service
        .create_feedback(&"f".repeat(FEEDBACK_MAX_CHARS), &question_id)
        .is_ok());
    let err = service
        .create_feedback(&"f".repeat(FEEDBACK_MAX_CHARS + 1), &question_id)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TooLong {
            field: TextField::Feedback,
            ..
        })
    ));
}

#[test]
fn create_feedback_returns_trimmed_text_and_question_id() {
    let conn = open_db_in_memory().unwrap();
    let question = question_service(&conn).create_question("Q").unwrap();

    let created = feedback_service(&conn)
        .create_feedback("  nice work  ", &question.id.to_string())
        .unwrap();
    assert_eq!(created.text, "nice work");
    assert_eq!(created.question_id, question.id);
}

#[test]
fn list_feedback_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let question = question_service(&conn).create_question("Q").unwrap();
    let service = feedback_service(&conn);
    let question_id = question.id.to_string();

    let f1 = service.create_feedback("F1", &question_id).unwrap();
    let f2 = service.create_feedback("F2", &question_id).unwrap();
    let f3 = service.create_feedback("F3", &question_id).unwrap();

    let listed: Vec<Uuid> = service
        .list_feedback(&question_id)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(listed, vec![f3.id, f2.id, f1.id]);
}

#[test]
fn list_feedback_for_unknown_question_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = feedback_service(&conn);

    let listed = service.list_feedback(&Uuid::new_v4().to_string()).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn list_feedback_rejects_malformed_id() {
    let conn = open_db_in_memory().unwrap();
    let err = feedback_service(&conn).list_feedback("nope").unwrap_err();
    assert!(matches!(err, ServiceError::InvalidId(_)));
}
