/// Crate version, surfaced in the health-check response.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// BM25 term-frequency saturation constant.
pub const BM25_K1: f64 = 1.5;

/// BM25 length-normalization constant.
pub const BM25_B: f64 = 0.75;

/// RRF rank-smoothing constant.
pub const RRF_K: f64 = 60.0;

/// Default per-route candidate count before fusion.
pub const DEFAULT_ROUTE_TOPK: usize = 150;

/// Default candidate count handed to the ranker after fusion.
pub const DEFAULT_RETRIEVAL_TOPK: usize = 100;

/// Default candidate count handed to the generator after ranking.
pub const DEFAULT_RANKING_TOPK: usize = 10;

/// Embedding dimensionality used by every dense route.
pub const EMBEDDING_DIM: usize = 1024;

/// Number of hypothetical passages HyDE generates per sub-query (2 positive, 1 negative).
pub const HYDE_HYPOTHESES_PER_QUERY: usize = 3;

/// Retry count for best-effort LLM-structured-parse stages (1 retry after the first attempt).
pub const LLM_STRUCTURED_RETRY_ATTEMPTS: usize = 2;

/// Backoff between LLM-structured-parse retry attempts.
pub const LLM_STRUCTURED_RETRY_BACKOFF_MS: u64 = 100;

/// Minimum length of a HyDE hypothetical passage, in characters.
pub const HYDE_PASSAGE_MIN_CHARS: usize = 50;

/// Maximum length of a HyDE hypothetical passage, in characters.
pub const HYDE_PASSAGE_MAX_CHARS: usize = 100;

/// Ranking weight defaults (§4.4).
pub const DEFAULT_W_RELEVANCE: f64 = 0.40;
pub const DEFAULT_W_QUALITY: f64 = 0.25;
pub const DEFAULT_W_LENGTH: f64 = 0.05;
pub const DEFAULT_W_REVIEW: f64 = 0.05;
pub const DEFAULT_W_USEFUL: f64 = 0.05;
pub const DEFAULT_W_RECENCY: f64 = 0.20;

/// Empirically-derived corpus normalization divisors (§9 design notes).
pub const LENGTH_NORM_DIVISOR: f64 = 7.51;
pub const REVIEW_COUNT_NORM_DIVISOR: f64 = 6.32;
pub const USEFUL_COUNT_NORM_DIVISOR: f64 = 3.64;

/// Time-sensitivity decay defaults (§4.4).
pub const DEFAULT_BASE_DECAY: f64 = 0.5;
pub const DEFAULT_IMPLIED_BOOST: f64 = 0.5;
pub const DEFAULT_CLEAR_BOOST: f64 = 0.5;
pub const DEFAULT_HALF_LIFE_DAYS: i64 = 180;

/// Weight quantum sub-query weights must be a multiple of.
pub const EXPANSION_WEIGHT_QUANTUM: f64 = 0.2;

/// Maximum number of sub-queries the expander may return.
pub const MAX_SUB_QUERIES: usize = 3;

/// The 15 exact room-type names recognized by the detector.
pub const EXACT_ROOM_TYPES: &[&str] = &[
    "花园大床房",
    "花园双床房",
    "豪华大床房",
    "豪华双床房",
    "行政大床房",
    "行政双床房",
    "行政套房",
    "家庭房",
    "商务大床房",
    "商务双床房",
    "景观大床房",
    "景观双床房",
    "套房",
    "标准大床房",
    "标准双床房",
];

/// The 4 coarse room-type names recognized by the detector.
pub const FUZZY_ROOM_TYPES: &[&str] = &["大床房", "双床房", "套房", "家庭房"];
