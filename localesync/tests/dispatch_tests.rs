mod common;

use std::time::Duration;

use common::{FakeTranslator, Step, texts};
use localesync::{
    DispatchOptions, Dispatcher, Error, TranslationGraph, TranslationMode, TranslationWay,
};

fn graph(ids: &[&str]) -> TranslationGraph {
    TranslationGraph::new(&TranslationWay::parse_catalog(ids).unwrap())
}

fn fast_options() -> DispatchOptions {
    DispatchOptions::new().with_retry_delay(Duration::ZERO)
}

fn dispatcher(service: FakeTranslator, catalog: &[&str]) -> Dispatcher<FakeTranslator> {
    Dispatcher::with_options(service, graph(catalog), fast_options())
}

fn pair(s: &str, t: &str) -> (String, String) {
    (s.to_string(), t.to_string())
}

#[tokio::test]
async fn test_identity_makes_no_request() {
    let mut d = dispatcher(FakeTranslator::supporting_everything(), &[]);
    let input = texts(&["a", "b"]);
    let out = d.translate(&input, "en", "en").await.unwrap();
    assert_eq!(out, input);
    assert!(d.service().requests().is_empty());
}

#[tokio::test]
async fn test_chunks_of_five_keep_order() {
    let mut d = dispatcher(FakeTranslator::supporting_everything(), &["en-de"]);
    let input: Vec<String> = (0..12).map(|i| format!("t{i}")).collect();

    let out = d.translate(&input, "en", "de").await.unwrap();

    let expected: Vec<String> = (0..12).map(|i| format!("t{i}[de]")).collect();
    assert_eq!(out, expected);
    let sizes: Vec<usize> = d
        .service()
        .requests()
        .iter()
        .map(|r| r.texts.len())
        .collect();
    assert_eq!(sizes, vec![5, 5, 2]);
}

#[tokio::test]
async fn test_refused_pair_escalates_to_indirect_route() {
    let service = FakeTranslator::supporting(&[("ru", "en"), ("en", "de")]);
    let mut d = dispatcher(service, &["ru-en", "en-de"]);

    let out = d.translate(&texts(&["привет"]), "ru", "de").await.unwrap();

    assert_eq!(out, vec!["привет[en][de]"]);
    assert_eq!(d.mode(), TranslationMode::Indirect);
    assert_eq!(
        d.service().pairs(),
        vec![pair("ru", "de"), pair("ru", "en"), pair("en", "de")]
    );
    let requests = d.service().requests();
    assert_eq!(requests[2].texts, vec!["привет[en]"]);
}

#[tokio::test]
async fn test_indirect_mode_routes_without_probing() {
    let service = FakeTranslator::supporting(&[("ru", "en"), ("en", "de")]);
    let options = fast_options().with_initial_mode(TranslationMode::Indirect);
    let mut d = Dispatcher::with_options(service, graph(&["ru-en", "en-de"]), options);

    let out = d.translate(&texts(&["привет"]), "ru", "de").await.unwrap();

    assert_eq!(out, vec!["привет[en][de]"]);
    assert_eq!(
        d.service().pairs(),
        vec![pair("ru", "en"), pair("en", "de")]
    );
}

#[tokio::test]
async fn test_indirect_mode_persists_across_calls() {
    let service = FakeTranslator::supporting(&[("ru", "en"), ("en", "de"), ("en", "fr")]);
    let mut d = dispatcher(service, &["ru-en", "en-de", "en-fr"]);

    d.translate(&texts(&["a"]), "ru", "de").await.unwrap();
    let before = d.service().requests().len();
    let out = d.translate(&texts(&["b"]), "ru", "fr").await.unwrap();

    assert_eq!(out, vec!["b[en][fr]"]);
    let later: Vec<(String, String)> = d.service().pairs().split_off(before);
    assert_eq!(later, vec![pair("ru", "en"), pair("en", "fr")]);
}

#[tokio::test]
async fn test_direct_pairs_stay_direct_in_indirect_mode() {
    let service = FakeTranslator::supporting_everything();
    let options = fast_options().with_initial_mode(TranslationMode::Indirect);
    let mut d = Dispatcher::with_options(service, graph(&["ru-en", "en-de"]), options);

    d.translate(&texts(&["x"]), "en", "de").await.unwrap();
    assert_eq!(d.service().pairs(), vec![pair("en", "de")]);
}

#[tokio::test]
async fn test_internal_error_retries_same_chunk() {
    let service =
        FakeTranslator::supporting_everything().with_script(&[Step::Internal, Step::Internal]);
    let mut d = dispatcher(service, &["en-de"]);
    let input: Vec<String> = (0..7).map(|i| format!("t{i}")).collect();

    let out = d.translate(&input, "en", "de").await.unwrap();

    assert_eq!(out.len(), 7);
    let requests = d.service().requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].texts, requests[2].texts);
    assert_eq!(requests[3].texts, vec!["t5", "t6"]);
}

#[tokio::test]
async fn test_internal_error_cap() {
    let service =
        FakeTranslator::supporting_everything().with_script(&[Step::Internal, Step::Internal]);
    let options = fast_options().with_max_internal_retries(Some(1));
    let mut d = Dispatcher::with_options(service, graph(&["en-de"]), options);

    let err = d.translate(&texts(&["a"]), "en", "de").await.unwrap_err();
    assert!(matches!(err, Error::ServiceInternal { attempts: 2 }));
}

#[tokio::test]
async fn test_transport_failure_restarts_whole_call() {
    let service =
        FakeTranslator::supporting_everything().with_script(&[Step::Pass, Step::Transport]);
    let mut d = dispatcher(service, &["en-de"]);
    let input: Vec<String> = (0..7).map(|i| format!("t{i}")).collect();

    let out = d.translate(&input, "en", "de").await.unwrap();

    let expected: Vec<String> = (0..7).map(|i| format!("t{i}[de]")).collect();
    assert_eq!(out, expected);
    let sizes: Vec<usize> = d
        .service()
        .requests()
        .iter()
        .map(|r| r.texts.len())
        .collect();
    assert_eq!(sizes, vec![5, 2, 5, 2]);
}

#[tokio::test]
async fn test_transport_attempts_are_bounded() {
    let service = FakeTranslator::supporting_everything().with_script(&[
        Step::Transport,
        Step::Transport,
        Step::Transport,
    ]);
    let options = fast_options().with_max_transport_attempts(2);
    let mut d = Dispatcher::with_options(service, graph(&["en-de"]), options);

    let err = d.translate(&texts(&["a"]), "en", "de").await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(d.service().requests().len(), 2);
}

#[tokio::test]
async fn test_refusal_in_indirect_mode_is_fatal() {
    let service = FakeTranslator::supporting_everything().with_script(&[Step::Unsupported]);
    let options = fast_options().with_initial_mode(TranslationMode::Indirect);
    let mut d = Dispatcher::with_options(service, graph(&["en-de"]), options);

    let err = d.translate(&texts(&["a"]), "en", "de").await.unwrap_err();
    assert!(
        matches!(err, Error::UnsupportedPair { ref from, ref to } if from == "en" && to == "de")
    );
    assert_eq!(d.service().requests().len(), 1);
}

#[tokio::test]
async fn test_no_path_after_escalation() {
    let service = FakeTranslator::supporting(&[("ru", "en"), ("de", "fr")]);
    let mut d = dispatcher(service, &["ru-en", "de-fr"]);

    let err = d.translate(&texts(&["a"]), "ru", "fr").await.unwrap_err();
    assert!(matches!(err, Error::NoTranslationPath { .. }));
    assert_eq!(d.mode(), TranslationMode::Indirect);
}

#[tokio::test]
async fn test_short_response_is_rejected() {
    let service = FakeTranslator::supporting_everything().with_script(&[Step::Short]);
    let mut d = dispatcher(service, &["en-de"]);

    let err = d.translate(&texts(&["a", "b"]), "en", "de").await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[test]
fn test_plan_follows_mode() {
    let service = FakeTranslator::supporting_everything();
    let d = dispatcher(service, &["ru-en", "en-de"]);
    let direct = d.plan("ru", "de").unwrap();
    assert_eq!(direct, vec![TranslationWay::new("ru", "de")]);

    let service = FakeTranslator::supporting_everything();
    let options = fast_options().with_initial_mode(TranslationMode::Indirect);
    let d = Dispatcher::with_options(service, graph(&["ru-en", "en-de"]), options);
    let routed = d.plan("ru", "de").unwrap();
    assert_eq!(
        routed,
        vec![TranslationWay::new("ru", "en"), TranslationWay::new("en", "de")]
    );
}
