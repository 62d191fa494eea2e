#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use localesync::{Error, ServiceResponse, TranslationRequest, TranslationService, Tree};

/// Outcome forced onto the next request, before normal handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pass,
    Transport,
    Internal,
    Unsupported,
    Short,
}

/// In-memory translator: appends `[target]` to every text.
///
/// Pairs outside `supported` are refused; `script` injects failures in request order.
pub struct FakeTranslator {
    supported: Option<HashSet<(String, String)>>,
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<TranslationRequest>>,
}

impl FakeTranslator {
    pub fn supporting_everything() -> Self {
        Self {
            supported: None,
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn supporting(pairs: &[(&str, &str)]) -> Self {
        Self {
            supported: Some(
                pairs
                    .iter()
                    .map(|(s, t)| (s.to_string(), t.to_string()))
                    .collect(),
            ),
            ..Self::supporting_everything()
        }
    }

    pub fn with_script(self, steps: &[Step]) -> Self {
        self.script.lock().unwrap().extend(steps.iter().copied());
        self
    }

    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.source_language, r.target_language))
            .collect()
    }
}

#[async_trait]
impl TranslationService for FakeTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<ServiceResponse, Error> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.script.lock().unwrap().pop_front().unwrap_or(Step::Pass);
        match step {
            Step::Transport => return Err(Error::transport("connection refused")),
            Step::Internal => return Ok(ServiceResponse::InternalError),
            Step::Unsupported => {
                return Ok(ServiceResponse::Unsupported {
                    language: Some(request.target_language.clone()),
                });
            }
            Step::Short => return Ok(ServiceResponse::Translated(Vec::new())),
            Step::Pass => {}
        }

        let pair = (
            request.source_language.clone(),
            request.target_language.clone(),
        );
        if let Some(supported) = &self.supported
            && !supported.contains(&pair)
        {
            return Ok(ServiceResponse::Unsupported {
                language: Some(request.target_language.clone()),
            });
        }

        Ok(ServiceResponse::Translated(
            request
                .texts
                .iter()
                .map(|text| format!("{}[{}]", text, request.target_language))
                .collect(),
        ))
    }
}

pub fn tree(json: serde_json::Value) -> Tree {
    match json {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
