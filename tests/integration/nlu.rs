//! NLU service client against a mock server

use crate::integration::mock_server::{MockServerFixture, BASIC_AUTH};
use mockito::Matcher;
use robo_sdk::nlu::{
    JobStatus, PredictRequest, TrainOptions, TrainingData, TrainingEntry,
};
use robo_sdk::NluError;
use serde_json::json;
use std::io::Write;

#[test]
fn test_predict_422_is_unprocessable_entity_with_detail() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/predict/m-1")
        .match_body(Matcher::Json(json!({"text": "hi"})))
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"bad input"}"#)
        .create();

    let err = fixture
        .nlu()
        .model(Some("m-1"))
        .predict(&PredictRequest::new("hi"))
        .unwrap_err();

    mock.assert();
    match err {
        NluError::UnprocessableEntity { detail } => assert_eq!(detail.as_deref(), Some("bad input")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_predict_success() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/predict/m-1")
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body(
            r#"{"timestamp": "03/11/2022, 14:35:32", "content": {
                "intents": [{"name": "Greeting", "confidence": 0.91}, {"name": "Bye", "confidence": 0.09}],
                "entities": [{"entity": "Language", "start": 9, "end": 11, "value": "PT"}]
            }}"#,
        )
        .create();

    let response = fixture
        .nlu()
        .model(Some("m-1"))
        .predict(&PredictRequest::new("hello in PT"))
        .expect("prediction");

    mock.assert();
    assert_eq!(response.timestamp, "03/11/2022, 14:35:32");
    assert_eq!(response.content.top_intent().unwrap().name, "Greeting");
    let entities = response.content.entities.expect("entities");
    assert_eq!(entities[0].value, "PT");
    assert_eq!((entities[0].start, entities[0].end), (9, 11));
}

#[test]
fn test_create_binds_model_uuid() {
    let mut fixture = MockServerFixture::new();
    let create = fixture
        .server
        .mock("POST", "/create/en")
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body(
            r#"{"timestamp": "Wed Dec 22 18:30:21 2021",
                "content": {"model_uuid": "8715ced3", "job_status": "NEW"}}"#,
        )
        .create();
    let status = fixture.mock_json(
        "GET",
        "/status/8715ced3",
        200,
        r#"{"timestamp": "t", "content": {"job_status": "TRAINING"}}"#,
    );

    let client = fixture.nlu();
    let mut model = client.model(None);
    let created = model.create("en").expect("created");
    assert_eq!(created.content.job_status, JobStatus::New);
    assert_eq!(model.model_uuid(), Some("8715ced3"));

    assert_eq!(
        model.status().expect("status").content.job_status,
        JobStatus::Training
    );
    assert!(matches!(
        model.create("pt"),
        Err(NluError::ModelAlreadyBound { .. })
    ));

    create.assert();
    status.assert();
}

#[test]
fn test_train_sends_body_and_query() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/train/m-1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("model_eval".into(), "true".into()),
            Matcher::UrlEncoded("max_allowed_error_number".into(), "2".into()),
            Matcher::UrlEncoded("min_word_length".into(), "4".into()),
        ]))
        .match_body(Matcher::Json(json!({"nlu": [
            {"intent": "Greeting", "examples": ["Hi", "Hello"]},
            {"lookup": "Language", "examples": ["PT", "ENG"]},
            {"regex": "door_number", "examples": ["po\\d{2}"]}
        ]})))
        .with_status(200)
        .with_body(r#"{"timestamp": "t", "content": {"job_status": "TO_TRAIN"}}"#)
        .create();

    let data = TrainingData::new(vec![
        TrainingEntry::intent("Greeting", &["Hi", "Hello"]),
        TrainingEntry::lookup("Language", &["PT", "ENG"]),
        TrainingEntry::regex("door_number", &[r"po\d{2}"]),
    ]);
    let options = TrainOptions {
        model_eval: true,
        max_allowed_error_number: 2,
        min_word_length: 4,
    };
    let response = fixture
        .nlu()
        .model(Some("m-1"))
        .train(&data, options)
        .expect("train");

    mock.assert();
    assert_eq!(response.content.job_status, JobStatus::ToTrain);
}

#[test]
fn test_train_from_yaml_file() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/train/m-1")
        .match_query(Matcher::Any)
        .match_body(Matcher::Json(json!({"nlu": [
            {"intent": "Bye", "examples": ["Good bye", "Au revoir"]}
        ]})))
        .with_status(200)
        .with_body(r#"{"timestamp": "t", "content": {"job_status": "TO_TRAIN"}}"#)
        .create();

    let mut file = tempfile::Builder::new()
        .suffix(".yml")
        .tempfile()
        .expect("temp file");
    write!(
        file,
        "version: \"3.0\"\nnlu:\n- intent: Bye\n  examples: |\n    - Good bye\n    - Au revoir\n"
    )
    .expect("write yaml");

    fixture
        .nlu()
        .model(Some("m-1"))
        .train_from_yaml(file.path(), TrainOptions::default())
        .expect("train");
    mock.assert();
}

#[test]
fn test_metrics() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json(
        "GET",
        "/metrics/m-1",
        200,
        r#"{"timestamp": "03/11/2022, 14:35:32", "content": {
            "report": {
                "Bye": {"precision": 0.4, "recall": 0.5, "f1-score": 0.4444444444444445, "support": 4},
                "Greeting": {"precision": 0.5, "recall": 0.4, "f1-score": 0.4444444444444445, "support": 5},
                "accuracy": 0.4444444444444444,
                "weighted avg": {"precision": 0.4555555555555555, "recall": 0.4444444444444444,
                                 "f1-score": 0.4444444444444444, "support": 9}
            },
            "confusion_list": [
                {"intent": "Greeting", "confused_with": "Bye", "count": 3},
                {"intent": "Bye", "confused_with": "Greeting", "count": 2}
            ],
            "confusion_matrix": {"Bye": {"Bye": 2, "Greeting": 2}, "Greeting": {"Bye": 3, "Greeting": 2}}
        }}"#,
    );

    let metrics = fixture.nlu().model(Some("m-1")).metrics().expect("metrics");
    let content = metrics.content;
    assert_eq!(content.accuracy(), Some(0.4444444444444444));
    assert_eq!(content.entry("Greeting").unwrap().support, 5);
    assert_eq!(content.entry("weighted avg").unwrap().support, 9);
    assert_eq!(content.confusion_list[0].count, 3);
    assert_eq!(content.confusion_matrix["Greeting"]["Bye"], 3);
}

#[test]
fn test_delete() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.mock_json(
        "DELETE",
        "/delete/m-1",
        200,
        r#"{"timestamp": "t", "content": {"model_uuid": "m-1"}}"#,
    );

    let response = fixture.nlu().model(Some("m-1")).delete().expect("deleted");
    mock.assert();
    assert_eq!(response.content.model_uuid, "m-1");
    assert_eq!(response.timestamp, "t");
}

#[test]
fn test_delete_with_empty_body() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("DELETE", "/delete/m-1")
        .match_header("authorization", BASIC_AUTH)
        .with_status(204)
        .create();

    let response = fixture.nlu().model(Some("m-1")).delete().expect("deleted");
    mock.assert();
    assert_eq!(response.content.model_uuid, "m-1");
    assert!(response.timestamp.parse::<u64>().is_ok());
}

#[test]
fn test_delete_with_non_envelope_body() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("DELETE", "/delete/m-1", 200, r#"{"detail":"deleted"}"#);

    let response = fixture.nlu().model(Some("m-1")).delete().expect("deleted");
    assert_eq!(response.content.model_uuid, "m-1");
    assert!(!response.timestamp.is_empty());
}

#[test]
fn test_delete_of_unknown_model() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("DELETE", "/delete/m-9", 404, r#"{"detail":"no such model"}"#);

    let err = fixture.nlu().model(Some("m-9")).delete().unwrap_err();
    assert!(matches!(err, NluError::NotFound { .. }));
    assert_eq!(err.detail(), Some("no such model"));
}

#[test]
fn test_status_mapping() {
    let cases: [(usize, fn(&NluError) -> bool); 5] = [
        (401, |e| matches!(e, NluError::NotAuthorized { .. })),
        (404, |e| matches!(e, NluError::NotFound { .. })),
        (406, |e| matches!(e, NluError::NotAcceptable { .. })),
        (422, |e| matches!(e, NluError::UnprocessableEntity { .. })),
        (500, |e| matches!(e, NluError::Api { status: 500, .. })),
    ];

    for (status, check) in cases {
        let mut fixture = MockServerFixture::new();
        let _mock = fixture.mock_json("GET", "/status/m-1", status, r#"{"detail":"nope"}"#);
        let err = fixture.nlu().model(Some("m-1")).status().unwrap_err();
        assert!(check(&err), "status {status} mapped to {err:?}");
        assert_eq!(err.detail(), Some("nope"));
    }
}
