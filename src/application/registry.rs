//! Registry of strategies and the per-cycle ticked scan.

use tracing::trace;

use crate::port::inbound::TradingStrategy;

/// Registered strategies, in registration order.
///
/// Only registered strategies take part in [`tick`](Self::tick). The ticked
/// scratch list is emptied before every `tick` returns.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn TradingStrategy>>,
    ticked: Vec<usize>,
}

impl StrategyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy.
    ///
    /// Strategies are scanned in registration order.
    pub fn register(&mut self, strategy: Box<dyn TradingStrategy>) {
        self.strategies.push(strategy);
    }

    /// Names of registered strategies, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.strategies
            .iter()
            .map(|strategy| strategy.name().to_string())
            .collect()
    }

    /// Number of registered strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Entries currently in the ticked scratch list.
    ///
    /// Always zero outside of a [`tick`](Self::tick) call.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.ticked.len()
    }

    /// Collect and reset every strategy reporting `ticked()`, then drain the
    /// scratch list. Returns how many strategies had ticked.
    pub fn tick(&mut self) -> usize {
        for (index, strategy) in self.strategies.iter_mut().enumerate() {
            if strategy.ticked() {
                self.ticked.push(index);
                strategy.reset();
            }
        }

        let count = self.ticked.len();
        self.drain();
        count
    }

    /// Empty the scratch list, last in first out. Capacity is kept.
    fn drain(&mut self) {
        while let Some(index) = self.ticked.pop() {
            trace!(strategy = %self.strategies[index].name(), "Strategy ticked");
        }
    }
}
