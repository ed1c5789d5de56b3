//! Cross-cutting, shared constants.
//!
//! Provider defaults match the hosted OpenAI-compatible proxy the service was
//! first deployed against. Both can be overridden through [`crate::Config`].

/// Default provider base URL (the `/embeddings` path is appended).
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://aipipe.org/openai/v1";

/// Default embedding model identifier sent to the provider.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default per-call provider timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Number of matches returned by `POST /similarity`.
pub const DEFAULT_TOP_K: usize = 3;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Max bytes of an upstream body kept in logs and error messages.
pub const MAX_BODY_SNIPPET_BYTES: usize = 512;
