//! Chunked, fault-tolerant translation of leaf batches.
//!
//! [`Dispatcher::translate`] splits texts into fixed-size chunks, sends them one
//! at a time through a [`TranslationService`] and reassembles the results in
//! order. Pairs the service refuses switch the dispatcher into
//! [`TranslationMode::Indirect`], where unsupported pairs are routed through
//! intermediate languages found by the [`TranslationGraph`].

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    error::Error,
    graph::TranslationGraph,
    service::{ServiceResponse, TranslationRequest, TranslationService},
    types::TranslationWay,
};

/// Largest batch the translation service accepts.
pub const DEFAULT_CHUNK_SIZE: usize = 5;
pub const DEFAULT_MAX_TRANSPORT_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Whether unsupported pairs are routed through intermediate languages.
///
/// Only ever moves from `DirectOnly` to `Indirect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    #[default]
    DirectOnly,
    Indirect,
}

impl TranslationMode {
    /// Switches to indirect mode. Returns `true` if the mode changed.
    pub fn escalate(&mut self) -> bool {
        let changed = *self == TranslationMode::DirectOnly;
        *self = TranslationMode::Indirect;
        changed
    }
}

/// Knobs for chunking and retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Texts per service request.
    pub chunk_size: usize,
    /// Whole-call attempts when the transport fails, including the first one.
    pub max_transport_attempts: u32,
    /// Pause before restarting after a transport failure.
    pub retry_delay: Duration,
    /// In-place retries of a chunk that hit an internal service error. `None` retries forever.
    pub max_internal_retries: Option<u32>,
    /// Mode the dispatcher starts in.
    pub initial_mode: TranslationMode,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_transport_attempts: DEFAULT_MAX_TRANSPORT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_internal_retries: None,
            initial_mode: TranslationMode::DirectOnly,
        }
    }
}

impl DispatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_max_transport_attempts(mut self, attempts: u32) -> Self {
        self.max_transport_attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_max_internal_retries(mut self, retries: Option<u32>) -> Self {
        self.max_internal_retries = retries;
        self
    }

    pub fn with_initial_mode(mut self, mode: TranslationMode) -> Self {
        self.initial_mode = mode;
        self
    }
}

/// Sends leaf batches to a translation service and recovers from its failures.
pub struct Dispatcher<S> {
    service: S,
    graph: TranslationGraph,
    options: DispatchOptions,
    mode: TranslationMode,
}

impl<S: TranslationService> Dispatcher<S> {
    pub fn new(service: S, graph: TranslationGraph) -> Self {
        Self::with_options(service, graph, DispatchOptions::default())
    }

    pub fn with_options(service: S, graph: TranslationGraph, options: DispatchOptions) -> Self {
        let mode = options.initial_mode;
        Self {
            service,
            graph,
            options,
            mode,
        }
    }

    pub fn mode(&self) -> TranslationMode {
        self.mode
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Translates `texts` from `source` to `target`, keeping length and order.
    ///
    /// Transport failures restart the whole call, up to
    /// [`DispatchOptions::max_transport_attempts`] times. A refused pair
    /// enables indirect mode for the rest of the dispatcher's life and
    /// restarts the call once more.
    pub async fn translate(
        &mut self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, Error> {
        if source == target {
            return Ok(texts.to_vec());
        }

        let mut attempt = 1;
        loop {
            match self.translate_once(texts, source, target).await {
                Ok(translated) => return Ok(translated),
                Err(Error::UnsupportedPair { from, to })
                    if self.mode == TranslationMode::DirectOnly =>
                {
                    self.mode.escalate();
                    warn!(
                        event = "indirect_mode_enabled",
                        from = %from,
                        to = %to,
                        "pair refused by the service, routing through intermediate languages"
                    );
                }
                Err(e) if e.is_transport() && attempt < self.options.max_transport_attempts => {
                    warn!(
                        event = "transport_retry",
                        attempt = attempt,
                        max_attempts = self.options.max_transport_attempts,
                        error = %e,
                        "restarting translation from scratch"
                    );
                    attempt += 1;
                    if !self.options.retry_delay.is_zero() {
                        tokio::time::sleep(self.options.retry_delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Hops needed for `source -> target` in the current mode.
    pub fn plan(&self, source: &str, target: &str) -> Result<Vec<TranslationWay>, Error> {
        if source == target {
            return Ok(Vec::new());
        }
        if self.mode == TranslationMode::Indirect
            && !self.graph.is_directly_supported(source, target)
        {
            return self.graph.route(source, target);
        }
        Ok(vec![TranslationWay::new(source, target)])
    }

    async fn translate_once(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, Error> {
        let route = self.plan(source, target)?;
        if route.len() > 1 {
            let hops: Vec<String> = route.iter().map(ToString::to_string).collect();
            info!(event = "translation_route", route = %hops.join(" -> "));
        }

        let mut current = texts.to_vec();
        for way in &route {
            current = self.translate_direct(&current, way).await?;
        }
        Ok(current)
    }

    async fn translate_direct(
        &self,
        texts: &[String],
        way: &TranslationWay,
    ) -> Result<Vec<String>, Error> {
        let chunk_size = self.options.chunk_size.max(1);
        let total = texts.len().div_ceil(chunk_size);
        let mut translated = Vec::with_capacity(texts.len());

        for (index, chunk) in texts.chunks(chunk_size).enumerate() {
            debug!(event = "translate_chunk", way = %way, chunk = ?chunk);
            translated.extend(self.translate_chunk(chunk, way).await?);
            info!(
                event = "translate_progress",
                way = %way,
                percent = (index + 1) * 100 / total
            );
        }
        Ok(translated)
    }

    async fn translate_chunk(
        &self,
        chunk: &[String],
        way: &TranslationWay,
    ) -> Result<Vec<String>, Error> {
        let request = TranslationRequest {
            source_language: way.source.clone(),
            target_language: way.target.clone(),
            texts: chunk.to_vec(),
        };

        let mut failures = 0;
        loop {
            match self.service.translate(&request).await? {
                ServiceResponse::Translated(result) if result.len() == chunk.len() => {
                    return Ok(result);
                }
                ServiceResponse::Translated(result) => {
                    return Err(Error::MalformedResponse(format!(
                        "sent {} texts for {}, received {}",
                        chunk.len(),
                        way,
                        result.len()
                    )));
                }
                ServiceResponse::InternalError => {
                    failures += 1;
                    if let Some(max) = self.options.max_internal_retries
                        && failures > max
                    {
                        return Err(Error::ServiceInternal { attempts: failures });
                    }
                    warn!(event = "internal_error_retry", way = %way, failures = failures);
                }
                ServiceResponse::Unsupported { language } => {
                    debug!(event = "pair_unsupported", way = %way, language = ?language);
                    return Err(Error::UnsupportedPair {
                        from: way.source.clone(),
                        to: way.target.clone(),
                    });
                }
            }
        }
    }
}
