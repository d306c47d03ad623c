//! Listing pipeline for executing strategies in order.
//!
//! The pipeline takes a list of acquisition strategies and executes them
//! in priority order until one yields identifiers. Running out of
//! strategies is not an error: the outcome is an empty list, and callers
//! decide what that means.

use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use hubscope_core::ModelId;

use crate::context::FetchContext;
use crate::strategy::{ListingKind, ListingStrategy};

// ============================================================================
// Listing Attempt
// ============================================================================

/// Record of a single listing attempt.
#[derive(Debug, Clone)]
pub struct ListingAttempt {
    /// The strategy ID that was attempted.
    pub strategy_id: String,
    /// The kind of acquisition used.
    pub kind: ListingKind,
    /// Whether the attempt produced identifiers.
    pub success: bool,
    /// Error if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl ListingAttempt {
    /// Creates a successful attempt record.
    pub fn success(strategy_id: impl Into<String>, kind: ListingKind, duration: Duration) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: true,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        strategy_id: impl Into<String>,
        kind: ListingKind,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Listing Outcome
// ============================================================================

/// The outcome of a listing pipeline execution.
///
/// An empty identifier list is a valid outcome meaning no strategy could
/// produce data, not a failure of the pipeline itself.
#[derive(Debug)]
pub struct ListingOutcome {
    /// The extracted identifiers, possibly empty.
    pub identifiers: Vec<ModelId>,
    /// The kind of acquisition that produced them, if any did.
    pub source: Option<ListingKind>,
    /// The strategy that produced them, if any did.
    pub strategy_id: Option<String>,
    /// All attempts made.
    pub attempts: Vec<ListingAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl ListingOutcome {
    /// Returns true if no strategy produced identifiers.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Returns the number of strategies that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the successful strategy ID, if any.
    pub fn successful_strategy(&self) -> Option<&str> {
        self.strategy_id.as_deref()
    }

    /// Returns all errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

// ============================================================================
// Listing Pipeline
// ============================================================================

/// A pipeline of listing strategies tried in order.
///
/// The pipeline executes strategies in priority order until one yields a
/// non-empty identifier list. Strategies can opt out of fallback on
/// certain errors.
pub struct ListingPipeline {
    strategies: Vec<Box<dyn ListingStrategy>>,
}

impl ListingPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Creates a pipeline with the given strategies.
    pub fn with_strategies(strategies: Vec<Box<dyn ListingStrategy>>) -> Self {
        let mut pipeline = Self { strategies };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Adds a strategy to the pipeline.
    pub fn add_strategy(&mut self, strategy: Box<dyn ListingStrategy>) {
        self.strategies.push(strategy);
        self.sort_by_priority();
    }

    /// Sorts strategies by priority (highest first).
    fn sort_by_priority(&mut self) {
        self.strategies
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the number of strategies in the pipeline.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Execute the pipeline, trying strategies until one yields identifiers.
    #[instrument(skip(self, ctx), fields(strategies = self.strategies.len(), limit))]
    pub async fn execute(&self, ctx: &FetchContext, limit: usize) -> ListingOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        info!(count = self.strategies.len(), "Executing listing pipeline");

        for strategy in &self.strategies {
            let strategy_id = strategy.id();
            let kind = strategy.kind();

            debug!(strategy = %strategy_id, kind = %kind, "Checking strategy availability");

            // Check if strategy is eligible under the current source mode
            if !strategy.is_available(ctx).await {
                debug!(strategy = %strategy_id, "Strategy not available, skipping");
                attempts.push(ListingAttempt::failure(
                    strategy_id,
                    kind,
                    "Not available",
                    Duration::ZERO,
                ));
                continue;
            }

            // Try the strategy
            let attempt_start = Instant::now();
            debug!(strategy = %strategy_id, "Executing strategy");

            match strategy.fetch(ctx, limit).await {
                Ok(result) if result.identifiers.is_empty() => {
                    // An empty list falls through to the next strategy
                    let duration = attempt_start.elapsed();
                    warn!(
                        strategy = %strategy_id,
                        duration = ?duration,
                        "Strategy returned no identifiers"
                    );
                    attempts.push(ListingAttempt::failure(
                        strategy_id,
                        kind,
                        "No identifiers found",
                        duration,
                    ));
                }
                Ok(result) => {
                    let duration = attempt_start.elapsed();
                    info!(
                        strategy = %strategy_id,
                        identifiers = result.identifiers.len(),
                        duration = ?duration,
                        "Strategy succeeded"
                    );

                    attempts.push(ListingAttempt::success(strategy_id, kind, duration));

                    return ListingOutcome {
                        identifiers: result.identifiers,
                        source: Some(kind),
                        strategy_id: Some(result.strategy_id),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(
                        strategy = %strategy_id,
                        error = %error,
                        duration = ?duration,
                        "Strategy failed"
                    );

                    attempts.push(ListingAttempt::failure(
                        strategy_id,
                        kind,
                        error.to_string(),
                        duration,
                    ));

                    // Check if we should try the next strategy
                    if !strategy.should_fallback(&error) {
                        debug!(
                            strategy = %strategy_id,
                            "Strategy indicates no fallback"
                        );
                        break;
                    }
                }
            }
        }

        // Every strategy came up empty; report a valid empty outcome.
        warn!(attempts = attempts.len(), "No strategy produced identifiers");
        ListingOutcome {
            identifiers: Vec::new(),
            source: None,
            strategy_id: None,
            attempts,
            duration: start.elapsed(),
        }
    }
}

impl Default for ListingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::FetchError;
    use crate::strategy::ListingResult;

    struct MockListStrategy {
        id: String,
        available: bool,
        identifiers: Vec<&'static str>,
        priority: u32,
    }

    impl MockListStrategy {
        fn new(id: &str, identifiers: Vec<&'static str>) -> Self {
            Self {
                id: id.to_string(),
                available: true,
                identifiers,
                priority: 50,
            }
        }

        fn unavailable(mut self) -> Self {
            self.available = false;
            self
        }

        fn with_priority(mut self, priority: u32) -> Self {
            self.priority = priority;
            self
        }
    }

    #[async_trait]
    impl ListingStrategy for MockListStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> ListingKind {
            ListingKind::Api
        }

        async fn is_available(&self, _ctx: &FetchContext) -> bool {
            self.available
        }

        async fn fetch(
            &self,
            _ctx: &FetchContext,
            limit: usize,
        ) -> Result<ListingResult, FetchError> {
            let identifiers = self
                .identifiers
                .iter()
                .take(limit)
                .map(|id| ModelId::new(*id))
                .collect();
            Ok(ListingResult::new(identifiers, self.id.clone(), self.kind()))
        }

        fn priority(&self) -> u32 {
            self.priority
        }
    }

    struct MockFailStrategy {
        id: String,
        should_fallback: bool,
        priority: u32,
    }

    impl MockFailStrategy {
        fn new(id: &str, should_fallback: bool) -> Self {
            Self {
                id: id.to_string(),
                should_fallback,
                priority: 100,
            }
        }
    }

    #[async_trait]
    impl ListingStrategy for MockFailStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> ListingKind {
            ListingKind::Scrape
        }

        async fn is_available(&self, _ctx: &FetchContext) -> bool {
            true
        }

        async fn fetch(
            &self,
            _ctx: &FetchContext,
            _limit: usize,
        ) -> Result<ListingResult, FetchError> {
            Err(FetchError::Parse("Mock error".to_string()))
        }

        fn should_fallback(&self, _error: &FetchError) -> bool {
            self.should_fallback
        }

        fn priority(&self) -> u32 {
            self.priority
        }
    }

    fn ctx() -> FetchContext {
        FetchContext::new().unwrap()
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_empty_outcome() {
        let pipeline = ListingPipeline::new();
        let outcome = pipeline.execute(&ctx(), 10).await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 0);
        assert!(outcome.source.is_none());
    }

    #[tokio::test]
    async fn test_single_success() {
        let pipeline = ListingPipeline::with_strategies(vec![Box::new(MockListStrategy::new(
            "test.api",
            vec!["org/a", "org/b"],
        ))]);

        let outcome = pipeline.execute(&ctx(), 10).await;

        assert!(!outcome.is_empty());
        assert_eq!(outcome.identifiers.len(), 2);
        assert_eq!(outcome.successful_strategy(), Some("test.api"));
        assert_eq!(outcome.source, Some(ListingKind::Api));
    }

    #[tokio::test]
    async fn test_limit_forwarded_to_strategy() {
        let pipeline = ListingPipeline::with_strategies(vec![Box::new(MockListStrategy::new(
            "test.api",
            vec!["org/a", "org/b", "org/c"],
        ))]);

        let outcome = pipeline.execute(&ctx(), 2).await;
        assert_eq!(outcome.identifiers.len(), 2);
    }

    #[tokio::test]
    async fn test_fallback_on_failure() {
        let pipeline = ListingPipeline::with_strategies(vec![
            Box::new(MockFailStrategy::new("test.fail", true)),
            Box::new(MockListStrategy::new("test.api", vec!["org/a"]).with_priority(50)),
        ]);

        let outcome = pipeline.execute(&ctx(), 10).await;

        assert!(!outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.successful_strategy(), Some("test.api"));
        assert_eq!(outcome.errors(), vec!["Parse error: Mock error"]);
    }

    #[tokio::test]
    async fn test_fallback_on_empty_result() {
        // A strategy that succeeds with zero identifiers must not win.
        let pipeline = ListingPipeline::with_strategies(vec![
            Box::new(MockListStrategy::new("test.empty", vec![]).with_priority(100)),
            Box::new(MockListStrategy::new("test.api", vec!["org/a"]).with_priority(50)),
        ]);

        let outcome = pipeline.execute(&ctx(), 10).await;

        assert!(!outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.successful_strategy(), Some("test.api"));
        assert_eq!(outcome.errors(), vec!["No identifiers found"]);
    }

    #[tokio::test]
    async fn test_all_strategies_empty_is_valid_outcome() {
        let pipeline = ListingPipeline::with_strategies(vec![
            Box::new(MockListStrategy::new("test.empty1", vec![]).with_priority(100)),
            Box::new(MockListStrategy::new("test.empty2", vec![]).with_priority(50)),
        ]);

        let outcome = pipeline.execute(&ctx(), 10).await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 2);
        assert!(outcome.source.is_none());
        assert!(outcome.successful_strategy().is_none());
    }

    #[tokio::test]
    async fn test_no_fallback_stops_pipeline() {
        let pipeline = ListingPipeline::with_strategies(vec![
            Box::new(MockFailStrategy::new("test.fail", false)),
            Box::new(MockListStrategy::new("test.api", vec!["org/a"]).with_priority(50)),
        ]);

        let outcome = pipeline.execute(&ctx(), 10).await;

        // First strategy refused fallback, so the success never ran.
        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts_count(), 1);
    }

    #[tokio::test]
    async fn test_skip_unavailable() {
        let pipeline = ListingPipeline::with_strategies(vec![
            Box::new(
                MockListStrategy::new("test.unavailable", vec!["org/x"])
                    .unavailable()
                    .with_priority(100),
            ),
            Box::new(MockListStrategy::new("test.available", vec!["org/a"]).with_priority(50)),
        ]);

        let outcome = pipeline.execute(&ctx(), 10).await;

        assert_eq!(outcome.successful_strategy(), Some("test.available"));
        assert_eq!(outcome.errors(), vec!["Not available"]);
    }

    #[tokio::test]
    async fn test_priority_ordering() {
        // Insertion order is low-priority first; execution must flip it.
        let pipeline = ListingPipeline::with_strategies(vec![
            Box::new(MockListStrategy::new("test.low", vec!["org/low"]).with_priority(10)),
            Box::new(MockListStrategy::new("test.high", vec!["org/high"]).with_priority(90)),
        ]);

        let outcome = pipeline.execute(&ctx(), 10).await;
        assert_eq!(outcome.successful_strategy(), Some("test.high"));
    }
}
