//! Trading engine: the lifecycle controller composing mode selection,
//! strategy registry and request pipeline.
//!
//! # Lifecycle
//!
//! ```text
//!            halt_trading()
//!  Running ─────────────────▶ Halted
//!     ▲                          │
//!     └──────────────────────────┘
//!          continue_trading()
//! ```
//!
//! The engine starts Running. Only explicit halt/continue calls change the
//! state; the pipeline never does.
//!
//! # Example
//!
//! ```
//! use tradeloop::adapter::outbound::{LimitRisk, PaperExchange, PaperExecution};
//! use tradeloop::application::TradingEngine;
//! use tradeloop::domain::{Instrument, TradeRequest, TradingType};
//! use rust_decimal_macros::dec;
//!
//! let engine = TradingEngine::builder()
//!     .trading_type(TradingType::Sandbox)
//!     .exchange(Box::new(PaperExchange::new(vec![], vec![])))
//!     .risk(Box::new(LimitRisk::default()))
//!     .execution(Box::new(PaperExecution::default()))
//!     .build()
//!     .unwrap();
//!
//! let request = TradeRequest::buy(Instrument::from("BTC-USD"), dec!(1), dec!(100));
//! engine.halt_trading();
//! let response = engine.request_buy(request, &mut |_| {}, None).unwrap();
//! assert!(!response.success);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, trace, warn};

use crate::domain::{RunMode, Side, TradeRequest, TradeResponse, TradingType};
use crate::error::{ConfigError, Result};
use crate::port::inbound::{Tickable, TradeRequester, TradingStrategy};
use crate::port::outbound::{Backtest, Exchange, OrderExecutor, Print, RiskGate};

use super::handle::EngineHandle;
use super::mode::ModeSelector;
use super::pipeline::RequestPipeline;
use super::registry::StrategyRegistry;

/// Top-level orchestrator.
///
/// Single logical thread of control: the active data source calls
/// [`tick`](Tickable::tick) and strategy callbacks sequentially. Internal
/// state is still guarded (`Mutex` for the registry, atomic trading flag), so
/// the engine is `Send + Sync`.
pub struct TradingEngine {
    source: ModeSelector,
    pipeline: Arc<RequestPipeline>,
    registry: Mutex<StrategyRegistry>,
    print: bool,
}

impl TradingEngine {
    /// Create a builder for assembling an engine from collaborators.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[must_use]
    pub fn mode(&self) -> RunMode {
        self.source.mode()
    }

    /// Whether verbose mode was enabled at construction.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.print
    }

    pub fn exchange(&self) -> &dyn Exchange {
        self.source.exchange()
    }

    /// Present only in backtest mode.
    pub fn backtest(&self) -> Option<&dyn Backtest> {
        self.source.backtest()
    }

    pub fn risk(&self) -> &dyn RiskGate {
        self.pipeline.risk()
    }

    pub fn execution(&self) -> &dyn OrderExecutor {
        self.pipeline.execution()
    }

    /// Refuse all new trade requests until [`continue_trading`](Self::continue_trading).
    pub fn halt_trading(&self) {
        if self.pipeline.is_trading() {
            warn!("Trading halted");
        }
        self.pipeline.set_trading(false);
    }

    /// Resume routing trade requests.
    pub fn continue_trading(&self) {
        if !self.pipeline.is_trading() {
            info!("Trading resumed");
        }
        self.pipeline.set_trading(true);
    }

    #[must_use]
    pub fn is_trading(&self) -> bool {
        self.pipeline.is_trading()
    }

    /// A trade-request capability that does not keep the engine alive.
    #[must_use]
    pub fn handle(&self) -> EngineHandle {
        EngineHandle::new(&self.pipeline)
    }

    /// Register a strategy.
    ///
    /// Subscribes its callback to the active data source, appends it to the
    /// registry and hands it an [`EngineHandle`] for requesting trades.
    pub fn register_strategy(&self, mut strategy: Box<dyn TradingStrategy>) {
        self.source.subscribe(strategy.callback());
        strategy.set_engine(Arc::new(self.handle()));

        let mut registry = self.registry.lock();
        info!(
            strategy = %strategy.name(),
            position = registry.len(),
            "Strategy registered"
        );
        registry.register(strategy);
    }

    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.registry.lock().len()
    }

    #[must_use]
    pub fn strategy_names(&self) -> Vec<String> {
        self.registry.lock().names()
    }

    /// Entries in the ticked scratch list; zero whenever no tick is running.
    #[must_use]
    pub fn pending_ticked(&self) -> usize {
        self.registry.lock().pending()
    }

    /// Hand control to the active data source until it finishes.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoRunMode`] when the engine was built inconsistently,
    /// otherwise any error raised by the data source.
    pub fn run(&self) -> Result<()> {
        info!(
            mode = self.mode().trading_type().map(TradingType::as_str),
            strategies = self.strategy_count(),
            "Starting run loop"
        );
        self.source.run(self)
    }

    pub fn request_buy(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        self.pipeline
            .request(Side::Buy, request, on_success, on_failure)
    }

    pub fn request_sell(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        self.pipeline
            .request(Side::Sell, request, on_success, on_failure)
    }
}

impl Tickable for TradingEngine {
    fn tick(&self) {
        let ticked = self.registry.lock().tick();
        trace!(ticked, "Tick cycle complete");
    }
}

impl TradeRequester for TradingEngine {
    fn request_buy(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        TradingEngine::request_buy(self, request, on_success, on_failure)
    }

    fn request_sell(
        &self,
        request: TradeRequest,
        on_success: &mut dyn FnMut(&TradeResponse),
        on_failure: Option<&mut dyn FnMut(&TradeResponse)>,
    ) -> Result<TradeResponse> {
        TradingEngine::request_sell(self, request, on_success, on_failure)
    }
}

/// Builder for [`TradingEngine`].
///
/// The exchange, risk and execution collaborators are required. The backtest
/// collaborator is optional and kept only in backtest mode; a backtest-mode
/// engine without one builds fine and fails at [`TradingEngine::run`].
pub struct EngineBuilder {
    mode: RunMode,
    print: bool,
    exchange: Option<Box<dyn Exchange>>,
    backtest: Option<Box<dyn Backtest>>,
    risk: Option<Box<dyn RiskGate>>,
    execution: Option<Box<dyn OrderExecutor>>,
}

impl EngineBuilder {
    /// Create a new builder (sandbox mode, not verbose).
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: RunMode::select(TradingType::default()),
            print: false,
            exchange: None,
            backtest: None,
            risk: None,
            execution: None,
        }
    }

    #[must_use]
    pub fn trading_type(mut self, trading_type: TradingType) -> Self {
        self.mode = RunMode::select(trading_type);
        self
    }

    /// Set resolved mode flags directly.
    #[must_use]
    pub fn run_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable verbose mode (logs match events through a [`Print`] callback).
    #[must_use]
    pub fn print(mut self, print: bool) -> Self {
        self.print = print;
        self
    }

    #[must_use]
    pub fn exchange(mut self, exchange: Box<dyn Exchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    #[must_use]
    pub fn backtest(mut self, backtest: Box<dyn Backtest>) -> Self {
        self.backtest = Some(backtest);
        self
    }

    #[must_use]
    pub fn risk(mut self, risk: Box<dyn RiskGate>) -> Self {
        self.risk = Some(risk);
        self
    }

    #[must_use]
    pub fn execution(mut self, execution: Box<dyn OrderExecutor>) -> Self {
        self.execution = Some(execution);
        self
    }

    /// Assemble the engine.
    ///
    /// Queries the exchange's accounts once and logs them.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingField`] when a required collaborator is absent;
    /// any error from the exchange's `accounts()`.
    pub fn build(self) -> Result<TradingEngine> {
        let exchange = self
            .exchange
            .ok_or(ConfigError::MissingField { field: "exchange" })?;
        let risk = self.risk.ok_or(ConfigError::MissingField { field: "risk" })?;
        let execution = self
            .execution
            .ok_or(ConfigError::MissingField { field: "execution" })?;

        let accounts = exchange.accounts()?;
        info!(exchange = exchange.name(), accounts = ?accounts, "Exchange accounts");

        let source = ModeSelector::new(self.mode, exchange, self.backtest);

        if self.print {
            warn!("Running in verbose mode");
            source.subscribe(Box::new(Print::match_only()));
        }

        Ok(TradingEngine {
            source,
            pipeline: Arc::new(RequestPipeline::new(risk, execution)),
            registry: Mutex::new(StrategyRegistry::new()),
            print: self.print,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
