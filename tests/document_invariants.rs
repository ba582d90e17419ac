//! Document Invariant Tests
//!
//! - A document built from the same tree a schema was composed from
//!   validates against that schema
//! - Failures carry the exact coordinate of the failing node
//! - Objects are closed: one undeclared key fails the whole document
//! - Versions are pinned at creation and immutable across updates

use quire::document::{DocumentChecker, DocumentError};
use quire::model::{
    AnswerDocument, AnswerKey, GridColumn, Primitive, Question, QuestionKind,
    QuestionnaireDocument, Section, Step,
};
use quire::schema::{compose, compose_answers};
use quire::validate::validate;
use quire::version::VersionError;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn grant_steps() -> Vec<Step> {
    let mut category = GridColumn::new("Category", QuestionKind::Select);
    category.select_options = Some(vec!["travel".into(), "equipment".into()]);

    let mut budget = Question::grid(
        "Budget lines",
        vec![
            GridColumn::new("Item", QuestionKind::Text),
            category,
            GridColumn::new("Amount", QuestionKind::Number),
        ],
    );
    budget.grid_max_rows = Some(10);

    vec![
        Step::new(
            "About you",
            vec![Section::new(
                "Identity",
                vec![
                    Question::text("Full name").required(),
                    Question::new("Date of birth", QuestionKind::Date),
                ],
            )],
        ),
        Step::new(
            "Project",
            vec![
                Section::new(
                    "Summary",
                    vec![
                        Question::new("Abstract", QuestionKind::Textarea).required(),
                        Question::select(
                            "Field",
                            vec!["ecology".into(), "informatics".into()],
                        ),
                    ],
                ),
                Section::new("Finances", vec![budget]),
            ],
        ),
    ]
}

fn filled_answers() -> AnswerDocument {
    let mut doc = AnswerDocument::fresh("2025.09-1", 2);
    doc.steps[0]
        .answers
        .insert(AnswerKey::new(0, 0), Primitive::Text("Ada Lovelace".into()).into());
    doc.steps[0]
        .answers
        .insert(AnswerKey::new(0, 1), Primitive::Text("1815-12-10".into()).into());
    doc.steps[1]
        .answers
        .insert(AnswerKey::new(0, 0), Primitive::Text("A study.".into()).into());
    doc.steps[1].is_valid = Some(true);
    doc
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

/// A questionnaire document built from the composed tree validates against
/// the schema composed from that same tree.
#[test]
fn test_questionnaire_round_trip() {
    let steps = grant_steps();
    let schema = compose(&steps, "2025.07-1").unwrap();
    let document = QuestionnaireDocument::new("2025.07-1", steps);

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(validate(&value, &schema), Ok(()));
}

/// A fresh answer document satisfies the answers schema before anything
/// has been answered.
#[test]
fn test_fresh_answers_round_trip() {
    let schema = compose_answers("2025.09-1").unwrap();
    let document = AnswerDocument::fresh("2025.09-1", 2);

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(validate(&value, &schema), Ok(()));
}

/// An answer document exercising every value shape (text, grid rows,
/// booleans, nulls) still validates.
#[test]
fn test_filled_answers_round_trip() {
    let schema = compose_answers("2025.09-1").unwrap();
    let mut document = filled_answers();
    document.steps[1].answers.insert(
        AnswerKey::new(1, 0),
        serde_json::from_value(json!([
            {"0": "flights", "1": "travel", "2": 1200},
            {"0": "laptop", "1": "equipment", "2": null}
        ]))
        .unwrap(),
    );

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(validate(&value, &schema), Ok(()));
}

// =============================================================================
// Coordinate Correctness Tests
// =============================================================================

/// A single deliberately-broken answer reports the exact path to it.
#[test]
fn test_broken_answer_coordinate() {
    let schema = compose_answers("2025.09-1").unwrap();
    let mut value = serde_json::to_value(AnswerDocument::fresh("2025.09-1", 1)).unwrap();
    value["steps"][0]["answers"]["1-2"] = json!(-7);

    let failures = validate(&value, &schema).unwrap_err();
    assert_eq!(failures[0].coordinate, "steps.0.answers.1-2");
    assert!(failures[0]
        .message
        .contains("not valid under any of the given schemas"));
}

/// A type error deep in the questionnaire tree is located precisely.
#[test]
fn test_broken_question_coordinate() {
    let steps = grant_steps();
    let schema = compose(&steps, "2025.07-1").unwrap();
    let mut value =
        serde_json::to_value(QuestionnaireDocument::new("2025.07-1", steps)).unwrap();
    value["steps"][1]["sections"][0]["questions"][0]["label"] = json!(42);

    let failures = validate(&value, &schema).unwrap_err();
    assert_eq!(
        failures[0].coordinate,
        "steps.1.sections.0.questions.0.label"
    );
    assert_eq!(failures[0].message, "42 is not of type 'string'");
}

/// An is_valid flag that is neither boolean nor null is located at its
/// step state.
#[test]
fn test_broken_step_state_coordinate() {
    let schema = compose_answers("2025.09-1").unwrap();
    let mut value = serde_json::to_value(AnswerDocument::fresh("2025.09-1", 2)).unwrap();
    value["steps"][1]["is_valid"] = json!("yes");

    let failures = validate(&value, &schema).unwrap_err();
    assert_eq!(failures[0].coordinate, "steps.1.is_valid");
}

// =============================================================================
// Closed-Object Tests
// =============================================================================

/// One undeclared top-level key fails validation even when every declared
/// field is valid.
#[test]
fn test_undeclared_top_level_key() {
    let schema = compose_answers("2025.09-1").unwrap();
    let mut value = serde_json::to_value(AnswerDocument::fresh("2025.09-1", 1)).unwrap();
    value["reviewer_notes"] = json!("looks good");

    let failures = validate(&value, &schema).unwrap_err();
    assert_eq!(failures[0].coordinate, "");
    assert!(failures[0].message.contains("'reviewer_notes' was unexpected"));
}

/// Answer keys are the one open spot, and only keys matching the grammar
/// pass through it.
#[test]
fn test_answer_keys_are_pattern_gated() {
    let schema = compose_answers("2025.09-1").unwrap();
    let mut value = serde_json::to_value(AnswerDocument::fresh("2025.09-1", 1)).unwrap();
    value["steps"][0]["answers"]["first_question"] = json!("hello");

    let failures = validate(&value, &schema).unwrap_err();
    assert_eq!(failures[0].coordinate, "steps.0.answers");
    assert!(failures[0].message.contains("'first_question' was unexpected"));
}

/// Grid rows accept arbitrary column keys but only primitive values.
#[test]
fn test_grid_rows_hold_primitives_only() {
    let schema = compose_answers("2025.09-1").unwrap();
    let mut value = serde_json::to_value(AnswerDocument::fresh("2025.09-1", 1)).unwrap();
    value["steps"][0]["answers"]["0-0"] = json!([{"0": {"nested": "object"}}]);

    let failures = validate(&value, &schema).unwrap_err();
    assert_eq!(failures[0].coordinate, "steps.0.answers.0-0");
}

// =============================================================================
// Version Immutability Tests
// =============================================================================

/// Creating at one version and updating to another fails with the
/// previous/got pair.
#[test]
fn test_version_is_immutable_across_updates() {
    let schema = compose_answers("2025.09-1").unwrap();
    let checker = DocumentChecker::new(&schema).unwrap();

    let created = AnswerDocument::fresh("2025.09-1", 1);
    assert!(checker.check_create(&created).is_ok());

    let mut update = created.clone();
    update.schema_version = "2025.09-2".into();
    let err = checker.check_update(&update, &created).unwrap_err();
    assert_eq!(
        err,
        DocumentError::Version(VersionError::PreviousVersionMismatch {
            previous: "2025.09-1".into(),
            got: "2025.09-2".into(),
        })
    );
}

/// The same checker drives both record kinds.
#[test]
fn test_checker_is_shared_across_document_kinds() {
    let steps = grant_steps();
    let questionnaire_schema = compose(&steps, "2025.07-1").unwrap();
    let answers_schema = compose_answers("2025.09-1").unwrap();

    let q_checker = DocumentChecker::new(&questionnaire_schema).unwrap();
    let a_checker = DocumentChecker::new(&answers_schema).unwrap();

    let q_doc = QuestionnaireDocument::new("2025.07-1", steps);
    let a_doc = AnswerDocument::fresh("2025.09-1", 2);

    assert!(q_checker.check_create(&q_doc).is_ok());
    assert!(a_checker.check_create(&a_doc).is_ok());
}
