//! Orchestrator (§4.6): drives intent recognition, the detector/expander
//! fan-out, retrieval, ranking, and generation end to end, for both the
//! buffered and streaming entry points.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use concierge_core::config::{RagConfig, RankingConfig, RetrievalConfig};
use concierge_core::errors::ConciergeError;
use concierge_core::models::{PreviousTurn, SubQuery};
use concierge_generation::{GenerationContext, Generator};
use concierge_observability::QueryLog;
use concierge_query::{IntentDetector, IntentExpander, IntentRecognizer};
use concierge_ranking::MultiFactorRanker;
use concierge_retrieval::HybridRetriever;
use tokio::sync::{mpsc, Mutex};
use tokio_stream::wrappers::ReceiverStream;

use crate::dto::{ChatOptions, QueryComments, ReferenceSummary, References};
use crate::timing::TimingReport;

/// Bound on the SSE hand-off channel (§5): the producer blocks once this
/// many events are buffered and the consumer hasn't caught up, rather than
/// growing the queue without limit.
const SSE_CHANNEL_CAPACITY: usize = 32;

/// Every collaborator the pipeline needs, constructed once at startup and
/// shared read-only across requests (§5).
pub struct ConciergeEngine {
    pub recognizer: IntentRecognizer,
    pub detector: IntentDetector,
    pub expander: IntentExpander,
    pub retriever: Arc<HybridRetriever>,
    pub ranker: Arc<MultiFactorRanker>,
    pub generator: Arc<Generator>,
    pub config: RagConfig,
    pub query_log: Mutex<QueryLog>,
}

/// The buffered (`enable_generation`-aware) result of one `/api/v1/chat` call (§6).
pub struct QueryResult {
    pub response: String,
    pub references: References,
    pub timing: TimingReport,
}

/// One SSE event in the exact order described by §4.6.
pub enum ServerEvent {
    Intent { need_retrieval: bool },
    References(References),
    Chunk { content: String },
    Done { timing: TimingReport },
    Error { message: String },
}

impl ConciergeEngine {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn retrieval_config(&self, options: &ChatOptions, streaming: bool) -> RetrievalConfig {
        let base = if streaming {
            RetrievalConfig::for_streaming()
        } else {
            self.config.retrieval.clone()
        };
        options.overlay_retrieval(base)
    }

    fn ranking_config(&self, options: &ChatOptions) -> RankingConfig {
        options.overlay_ranking(self.config.ranking.clone())
    }

    /// Runs the detector and, when enabled, the expander concurrently —
    /// mirroring the two-worker thread pool the Python reference uses for
    /// the same fan-out (§5).
    async fn understand(
        &self,
        query: &str,
        enable_expansion: bool,
    ) -> (concierge_core::models::QueryConstraints, Option<Vec<SubQuery>>, f64, f64) {
        if enable_expansion {
            let detect_start = Instant::now();
            let expand_start = Instant::now();
            let (constraints, sub_queries) =
                tokio::join!(self.detector.detect(query), self.expander.expand(query));
            (
                constraints,
                Some(sub_queries),
                detect_start.elapsed().as_secs_f64(),
                expand_start.elapsed().as_secs_f64(),
            )
        } else {
            let detect_start = Instant::now();
            let constraints = self.detector.detect(query).await;
            (constraints, None, detect_start.elapsed().as_secs_f64(), 0.0)
        }
    }

    /// The buffered entry point (§4.6, §6 JSON response).
    pub async fn query(
        &self,
        query: &str,
        options: &ChatOptions,
        history: Option<&PreviousTurn>,
    ) -> Result<QueryResult, ConciergeError> {
        let total_start = Instant::now();
        if query.trim().is_empty() {
            return Err(ConciergeError::InvalidInput {
                reason: "query must not be empty".to_string(),
            });
        }

        let mut timing = TimingReport::default();
        let today = self.today();

        let recognition_start = Instant::now();
        let need_retrieval = self.recognizer.recognize(query, history).await?;
        timing.intent_recognition = recognition_start.elapsed().as_secs_f64();
        timing.query_processing_total = timing.intent_recognition;

        if !need_retrieval {
            let (response, gen_timing) = self.generate_direct(query, history, options, total_start, &mut timing).await?;
            timing.total = total_start.elapsed().as_secs_f64();
            self.record_log(query, false, &timing, 0).await;
            return Ok(QueryResult {
                response,
                references: References {
                    comments: Vec::new(),
                    summaries: Vec::new(),
                },
                timing,
            });
        }

        let understanding_start = Instant::now();
        let (constraints, sub_queries_opt, detection_secs, expansion_secs) =
            self.understand(query, options.enable_expansion()).await;
        timing.intent_detection = detection_secs;
        timing.intent_expansion = expansion_secs;
        timing.query_processing_total = timing.intent_recognition + understanding_start.elapsed().as_secs_f64();

        let sub_queries = sub_queries_opt
            .filter(|qs| !qs.is_empty())
            .unwrap_or_else(|| vec![SubQuery::identity(query)]);

        let ranking_enabled = options.enable_ranking();
        let ranking_config = self.ranking_config(options);
        let mut retrieval_config = self.retrieval_config(options, false);
        if !ranking_enabled {
            retrieval_config.retrieval_topk = retrieval_config.ranking_topk;
        }

        let outcome = self
            .retriever
            .retrieve(&sub_queries, constraints.filter_fragment(), &retrieval_config)
            .await?;
        timing.retrieval = Some(outcome.timing.clone());

        let (comments, ranking_timing) = if ranking_enabled {
            let (ranked, ranking_timing) = self
                .ranker
                .rank(
                    query,
                    outcome.comments,
                    constraints.time_sensitivity,
                    retrieval_config.ranking_topk,
                    &ranking_config,
                    today,
                )
                .await?;
            (QueryComments::Ranked(ranked), ranking_timing)
        } else {
            (QueryComments::Unranked(outcome.comments), Default::default())
        };
        timing.ranking = Some(ranking_timing);

        let result_count = comments.len();
        let references = References {
            comments: comments.to_references(&self.retriever.reviews),
            summaries: outcome.summaries.iter().map(ReferenceSummary::from).collect(),
        };

        let response = if options.enable_generation() {
            let first_token_base = total_start.elapsed().as_secs_f64();
            let context = match &comments {
                QueryComments::Ranked(ranked) => GenerationContext::Retrieval {
                    sub_queries: Some(&sub_queries),
                    ranked_comments: Some(ranked),
                    summaries: Some(&outcome.summaries),
                    today,
                },
                QueryComments::Unranked(_) => GenerationContext::Retrieval {
                    sub_queries: Some(&sub_queries),
                    ranked_comments: None,
                    summaries: Some(&outcome.summaries),
                    today,
                },
            };
            let (text, gen_timing) = self.generator.generate(query, context, history).await?;
            timing.ttft = first_token_base + gen_timing.ttft;
            timing.ttft_model = gen_timing.ttft;
            timing.subsequent = gen_timing.subsequent;
            timing.generation = gen_timing.generation;
            text
        } else {
            String::new()
        };

        timing.total = total_start.elapsed().as_secs_f64();
        self.record_log(query, true, &timing, result_count).await;

        Ok(QueryResult {
            response,
            references,
            timing,
        })
    }

    async fn generate_direct(
        &self,
        query: &str,
        history: Option<&PreviousTurn>,
        options: &ChatOptions,
        total_start: Instant,
        timing: &mut TimingReport,
    ) -> Result<(String, concierge_generation::GenerationTiming), ConciergeError> {
        if !options.enable_generation() {
            return Ok((String::new(), concierge_generation::GenerationTiming::default()));
        }
        let first_token_base = total_start.elapsed().as_secs_f64();
        let (text, gen_timing) = self.generator.generate(query, GenerationContext::Direct, history).await?;
        timing.ttft = first_token_base + gen_timing.ttft;
        timing.ttft_model = gen_timing.ttft;
        timing.subsequent = gen_timing.subsequent;
        timing.generation = gen_timing.generation;
        Ok((text, gen_timing))
    }

    async fn record_log(&self, query: &str, need_retrieval: bool, timing: &TimingReport, result_count: usize) {
        let entry = concierge_observability::QueryLogEntry::new(
            query,
            need_retrieval,
            std::time::Duration::from_secs_f64(timing.total.max(0.0)),
            std::time::Duration::from_secs_f64(timing.retrieval.as_ref().map(|r| r.total).unwrap_or(0.0)),
            std::time::Duration::from_secs_f64(timing.ranking.as_ref().map(|r| r.total).unwrap_or(0.0)),
            std::time::Duration::from_secs_f64(timing.generation.max(0.0)),
            result_count,
        );
        self.query_log.lock().await.record(entry);
    }

    /// The streaming entry point (§4.6). Spawns the pipeline on a task and
    /// hands events back through a bounded channel; dropping the sender when
    /// the task finishes closes the stream in place of Python's sentinel
    /// value (§5).
    pub fn query_stream(
        self: Arc<Self>,
        query: String,
        options: ChatOptions,
        history: Option<PreviousTurn>,
    ) -> ReceiverStream<ServerEvent> {
        let (tx, rx) = mpsc::channel(SSE_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            if let Err(err) = self.drive_stream(&query, &options, history.as_ref(), &tx).await {
                let _ = tx.send(ServerEvent::Error { message: err.to_string() }).await;
            }
        });
        ReceiverStream::new(rx)
    }

    async fn drive_stream(
        &self,
        query: &str,
        options: &ChatOptions,
        history: Option<&PreviousTurn>,
        tx: &mpsc::Sender<ServerEvent>,
    ) -> Result<(), ConciergeError> {
        let total_start = Instant::now();
        if query.trim().is_empty() {
            return Err(ConciergeError::InvalidInput {
                reason: "query must not be empty".to_string(),
            });
        }

        let mut timing = TimingReport::default();
        let today = self.today();

        let recognition_start = Instant::now();
        let need_retrieval = self.recognizer.recognize(query, history).await?;
        timing.intent_recognition = recognition_start.elapsed().as_secs_f64();
        timing.query_processing_total = timing.intent_recognition;

        if tx.send(ServerEvent::Intent { need_retrieval }).await.is_err() {
            return Ok(());
        }

        if !need_retrieval {
            if options.enable_generation() {
                let mut stream = self.generator.generate_stream(query, GenerationContext::Direct, history).await?;
                use futures::StreamExt;
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    if tx.send(ServerEvent::Chunk { content: chunk }).await.is_err() {
                        return Ok(());
                    }
                }
            }
            timing.total = total_start.elapsed().as_secs_f64();
            self.record_log(query, false, &timing, 0).await;
            let _ = tx
                .send(ServerEvent::Done {
                    timing: timing.clone(),
                })
                .await;
            return Ok(());
        }

        let understanding_start = Instant::now();
        let (constraints, sub_queries_opt, detection_secs, expansion_secs) =
            self.understand(query, options.enable_expansion()).await;
        timing.intent_detection = detection_secs;
        timing.intent_expansion = expansion_secs;
        timing.query_processing_total = timing.intent_recognition + understanding_start.elapsed().as_secs_f64();

        let sub_queries = sub_queries_opt
            .filter(|qs| !qs.is_empty())
            .unwrap_or_else(|| vec![SubQuery::identity(query)]);

        let ranking_enabled = options.enable_ranking();
        let ranking_config = self.ranking_config(options);
        let mut retrieval_config = self.retrieval_config(options, true);
        if !ranking_enabled {
            retrieval_config.retrieval_topk = retrieval_config.ranking_topk;
        }

        let outcome = self
            .retriever
            .retrieve(&sub_queries, constraints.filter_fragment(), &retrieval_config)
            .await?;
        timing.retrieval = Some(outcome.timing.clone());

        let (comments, ranking_timing) = if ranking_enabled {
            let (ranked, ranking_timing) = self
                .ranker
                .rank(
                    query,
                    outcome.comments,
                    constraints.time_sensitivity,
                    retrieval_config.ranking_topk,
                    &ranking_config,
                    today,
                )
                .await?;
            (QueryComments::Ranked(ranked), ranking_timing)
        } else {
            (QueryComments::Unranked(outcome.comments), Default::default())
        };
        timing.ranking = Some(ranking_timing);

        let result_count = comments.len();
        let references = References {
            comments: comments.to_references(&self.retriever.reviews),
            summaries: outcome.summaries.iter().map(ReferenceSummary::from).collect(),
        };
        if tx.send(ServerEvent::References(references)).await.is_err() {
            return Ok(());
        }

        if options.enable_generation() {
            let context = match &comments {
                QueryComments::Ranked(ranked) => GenerationContext::Retrieval {
                    sub_queries: Some(&sub_queries),
                    ranked_comments: Some(ranked),
                    summaries: Some(&outcome.summaries),
                    today,
                },
                QueryComments::Unranked(_) => GenerationContext::Retrieval {
                    sub_queries: Some(&sub_queries),
                    ranked_comments: None,
                    summaries: Some(&outcome.summaries),
                    today,
                },
            };
            let mut stream = self.generator.generate_stream(query, context, history).await?;
            use futures::StreamExt;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                if tx.send(ServerEvent::Chunk { content: chunk }).await.is_err() {
                    return Ok(());
                }
            }
        }

        timing.total = total_start.elapsed().as_secs_f64();
        self.record_log(query, true, &timing, result_count).await;
        let _ = tx.send(ServerEvent::Done { timing }).await;
        Ok(())
    }
}
