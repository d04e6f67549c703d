//! Integration tests for `PortfolioManager` against an in-process provider
//! and a `MemoryStore`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use token_portfolio::prelude::*;

// ─── Test provider ───────────────────────────────────────────────────────────

#[derive(Default)]
struct StubProvider {
    catalog: Vec<Token>,
    search_hits: Vec<TokenStub>,
    trending: Vec<TokenStub>,
    prices: Mutex<Vec<Token>>,
    fail: AtomicBool,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<String>>,
    by_ids_requests: Mutex<Vec<Vec<TokenId>>>,
    search_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl StubProvider {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), PortfolioError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(PortfolioError::Http(HttpError::ServerError {
                status: 503,
                body: "unavailable".to_string(),
            }))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn markets(&self) -> Result<Vec<Token>, PortfolioError> {
        self.record("markets");
        self.check()?;
        Ok(self.catalog.clone())
    }

    async fn markets_by_ids(&self, ids: &[TokenId]) -> Result<Vec<Token>, PortfolioError> {
        self.record("markets_by_ids");
        self.by_ids_requests.lock().unwrap().push(ids.to_vec());
        self.check()?;
        Ok(self.prices.lock().unwrap().clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<TokenStub>, PortfolioError> {
        self.record("search");
        self.queries.lock().unwrap().push(query.to_string());
        let gate = self.search_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.check()?;
        Ok(self.search_hits.clone())
    }

    async fn trending(&self) -> Result<Vec<TokenStub>, PortfolioError> {
        self.record("trending");
        self.check()?;
        Ok(self.trending.clone())
    }
}

/// Log sink for asserting on emitted events.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

fn token(id: &str, price: i64) -> Token {
    Token {
        id: TokenId::from(id),
        symbol: id.to_string(),
        name: id.to_uppercase(),
        image: format!("https://img.example/{}.png", id),
        current_price: dec(price),
        market_cap: dec(price * 1_000),
        market_cap_rank: 1,
        price_change_percentage_24h: Decimal::new(125, 2),
        sparkline_in_7d: Sparkline::new(vec![1.0, 2.0, 3.0]),
    }
}

fn stub(id: &str, rank: Option<u32>) -> TokenStub {
    TokenStub {
        id: TokenId::from(id),
        symbol: id.to_string(),
        name: id.to_uppercase(),
        thumb: format!("https://img.example/{}-thumb.png", id),
        market_cap_rank: rank,
    }
}

fn ids(raw: &[&str]) -> Vec<TokenId> {
    raw.iter().map(|s| TokenId::from(*s)).collect()
}

fn provider() -> StubProvider {
    StubProvider {
        catalog: vec![token("btc", 50_000), token("eth", 3_000), token("sol", 100)],
        search_hits: (0..12).map(|i| stub(&format!("hit{}", i), Some(i))).collect(),
        trending: (0..8).map(|i| stub(&format!("hot{}", i), None)).collect(),
        ..Default::default()
    }
}

fn manager(provider: StubProvider) -> (PortfolioManager<StubProvider, MemoryStore>, MemoryStore) {
    let mem = MemoryStore::new();
    let manager = PortfolioManager::new(provider, PortfolioStore::new(mem.clone()));
    (manager, mem)
}

async fn loaded_manager() -> (PortfolioManager<StubProvider, MemoryStore>, MemoryStore) {
    let (manager, mem) = manager(provider());
    manager.initialize_catalog().await;
    (manager, mem)
}

fn persisted(mem: &MemoryStore) -> PersistedPortfolio {
    PortfolioStore::new(mem.clone()).load()
}

// ─── Catalog, search, trending ───────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_catalog() {
    let (manager, _) = loaded_manager().await;
    let state = manager.snapshot().await;
    assert_eq!(state.tokens.len(), 3);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert!(state.last_updated.is_some());
}

#[tokio::test]
async fn test_initialize_catalog_failure() {
    let source = provider();
    source.set_failing(true);
    let (manager, _) = manager(source);

    manager.initialize_catalog().await;

    let state = manager.snapshot().await;
    assert!(state.tokens.is_empty());
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch market data"));
    assert_eq!(state.last_updated, None);
}

#[tokio::test]
async fn test_next_request_clears_error() {
    let source = provider();
    source.set_failing(true);
    let (manager, _) = manager(source);
    manager.initialize_catalog().await;
    assert!(manager.snapshot().await.error.is_some());

    manager.provider().set_failing(false);
    manager.fetch_trending().await;
    assert_eq!(manager.snapshot().await.error, None);
}

#[tokio::test]
async fn test_search_truncates_to_ten() {
    let (manager, _) = manager(provider());
    manager.search("hit").await;
    let state = manager.snapshot().await;
    assert_eq!(state.search_results.len(), 10);
    assert_eq!(state.search_results[0].id.as_str(), "hit0");
    assert_eq!(state.search_results[9].id.as_str(), "hit9");
}

#[tokio::test]
async fn test_blank_search_is_ignored() {
    let (manager, _) = manager(provider());
    manager.search("hit").await;
    let before = manager.snapshot().await;

    manager.search("   ").await;

    assert_eq!(manager.provider().calls(), vec!["search"]);
    assert_eq!(manager.snapshot().await, before);
}

#[tokio::test]
async fn test_search_forwards_query_as_typed() {
    let (manager, _) = manager(provider());
    manager.search("  shiba inu ").await;
    assert_eq!(
        *manager.provider().queries.lock().unwrap(),
        vec!["  shiba inu ".to_string()]
    );
}

#[tokio::test]
async fn test_search_failure_keeps_cache() {
    let (manager, _) = manager(provider());
    manager.search("hit").await;
    manager.provider().set_failing(true);

    manager.search("other").await;

    let state = manager.snapshot().await;
    assert_eq!(state.search_results.len(), 10);
    assert_eq!(state.error.as_deref(), Some("Failed to search tokens"));
}

#[tokio::test]
async fn test_clear_search() {
    let (manager, _) = manager(provider());
    manager.search("hit").await;
    manager.clear_search().await;
    assert!(manager.snapshot().await.search_results.is_empty());
}

#[tokio::test]
async fn test_trending_truncates_to_six() {
    let (manager, _) = manager(provider());
    manager.fetch_trending().await;
    let state = manager.snapshot().await;
    assert_eq!(state.trending_tokens.len(), 6);
    assert_eq!(state.trending_tokens[0].id.as_str(), "hot0");
}

#[tokio::test]
async fn test_trending_failure() {
    let source = provider();
    source.set_failing(true);
    let (manager, _) = manager(source);
    manager.fetch_trending().await;
    let state = manager.snapshot().await;
    assert!(state.trending_tokens.is_empty());
    assert_eq!(state.error.as_deref(), Some("Failed to fetch trending tokens"));
}

// ─── Watchlist ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_duplicate_in_batch_adds_once() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["eth", "eth"])).await;

    let state = manager.snapshot().await;
    assert_eq!(state.watchlist.len(), 1);
    let entry = &state.watchlist.entries()[0];
    assert_eq!(entry.id().as_str(), "eth");
    assert_eq!(entry.holdings, Decimal::ZERO);
}

#[tokio::test]
async fn test_add_unknown_id_is_silent() {
    let (manager, mem) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["doesnotexist"])).await;

    let state = manager.snapshot().await;
    assert!(state.watchlist.is_empty());
    assert_eq!(state.error, None);
    assert!(persisted(&mem).watchlist.is_empty());
}

#[tokio::test]
async fn test_repeated_adds_never_duplicate() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc", "eth"])).await;
    manager.add_to_watchlist(&ids(&["eth", "btc", "sol", "btc"])).await;
    manager.add_to_watchlist(&ids(&["sol"])).await;

    let state = manager.snapshot().await;
    assert_eq!(state.watchlist.ids(), ids(&["btc", "eth", "sol"]));
}

#[tokio::test]
async fn test_re_add_keeps_holdings_and_price() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc"])).await;
    manager.update_holdings(&TokenId::from("btc"), dec(2)).await;
    let before = manager.snapshot().await.watchlist;

    manager.add_to_watchlist(&ids(&["btc"])).await;

    assert_eq!(manager.snapshot().await.watchlist, before);
}

#[tokio::test]
async fn test_add_resolves_from_search_and_trending() {
    let (manager, _) = manager(provider());
    manager.search("hit").await;
    manager.fetch_trending().await;

    manager.add_to_watchlist(&ids(&["hit3", "hot1"])).await;

    let state = manager.snapshot().await;
    assert_eq!(state.watchlist.len(), 2);

    let hit = state.watchlist.get(&TokenId::from("hit3")).unwrap();
    assert_eq!(hit.token.current_price, Decimal::ZERO);
    assert_eq!(hit.token.market_cap_rank, 3);
    assert_eq!(hit.token.image, "https://img.example/hit3-thumb.png");
    assert!(hit.token.sparkline_in_7d.is_empty());

    let hot = state.watchlist.get(&TokenId::from("hot1")).unwrap();
    assert_eq!(hot.token.market_cap_rank, 0);

    assert!(!state.search_results.iter().any(|s| s.id.as_str() == "hit3"));
    assert!(!state.trending_tokens.iter().any(|t| t.id.as_str() == "hot1"));
    assert_eq!(state.search_results.len(), 9);
    assert_eq!(state.trending_tokens.len(), 5);
}

#[tokio::test]
async fn test_catalog_wins_over_search() {
    let mut source = provider();
    source.search_hits = vec![stub("btc", Some(1))];
    let (manager, _) = manager(source);
    manager.initialize_catalog().await;
    manager.search("btc").await;

    manager.add_to_watchlist(&ids(&["btc"])).await;

    let state = manager.snapshot().await;
    assert_eq!(state.watchlist.entries()[0].token.current_price, dec(50_000));
}

#[tokio::test]
async fn test_remove_from_watchlist() {
    let (manager, mem) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc", "eth"])).await;

    manager.remove_from_watchlist(&TokenId::from("btc")).await;
    manager.remove_from_watchlist(&TokenId::from("nope")).await;

    assert_eq!(manager.snapshot().await.watchlist.ids(), ids(&["eth"]));
    assert_eq!(persisted(&mem).watchlist.len(), 1);
}

// ─── Holdings and derived values ─────────────────────────────────────────────

#[tokio::test]
async fn test_update_holdings_scenario() {
    let (manager, _) = loaded_manager().await;
    let btc = TokenId::from("btc");
    manager.add_to_watchlist(&[btc.clone()]).await;
    manager.update_holdings(&btc, dec(2)).await;

    manager.update_holdings(&btc, dec(3)).await;

    let state = manager.snapshot().await;
    let entry = state.watchlist.get(&btc).unwrap();
    assert_eq!(entry.value, Some(dec(150_000)));
    assert_eq!(manager.total_value().await, dec(150_000));
}

#[tokio::test]
async fn test_total_value_tracks_every_update() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc", "eth", "sol"])).await;

    for (id, holdings) in [("btc", "0.5"), ("eth", "2"), ("sol", "10.25")] {
        manager
            .update_holdings(&TokenId::from(id), parse_holdings(holdings))
            .await;
        let state = manager.snapshot().await;
        let expected: Decimal = state
            .watchlist
            .iter()
            .map(|e| e.holdings * e.token.current_price)
            .sum();
        assert_eq!(manager.total_value().await, expected);
    }
    assert_eq!(manager.total_value().await, dec(32_025));
}

#[tokio::test]
async fn test_negative_and_malformed_holdings_degrade_to_zero() {
    let (manager, _) = loaded_manager().await;
    let eth = TokenId::from("eth");
    manager.add_to_watchlist(&[eth.clone()]).await;

    manager.update_holdings(&eth, dec(-5)).await;
    assert_eq!(manager.snapshot().await.watchlist.get(&eth).unwrap().holdings, Decimal::ZERO);

    manager.update_holdings(&eth, parse_holdings("lots")).await;
    let state = manager.snapshot().await;
    let entry = state.watchlist.get(&eth).unwrap();
    assert_eq!(entry.holdings, Decimal::ZERO);
    assert_eq!(entry.value, Some(Decimal::ZERO));
}

#[tokio::test]
async fn test_update_holdings_unknown_id_is_noop() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc"])).await;
    let before = manager.snapshot().await.watchlist;
    manager.update_holdings(&TokenId::from("eth"), dec(1)).await;
    assert_eq!(manager.snapshot().await.watchlist, before);
}

#[tokio::test]
async fn test_allocation_breakdown() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["sol", "eth", "btc"])).await;
    manager.update_holdings(&TokenId::from("btc"), dec(1)).await;
    manager.update_holdings(&TokenId::from("eth"), dec(10)).await;

    let slices = manager.allocation().await;

    assert_eq!(slices.len(), 3);
    assert_eq!(slices[0].id.as_str(), "btc");
    assert_eq!(slices[1].id.as_str(), "eth");
    assert_eq!(slices[2].id.as_str(), "sol");
    assert_eq!(slices[0].value, dec(50_000));
    assert_eq!(slices[2].percentage, Decimal::ZERO);
    let sum: Decimal = slices.iter().map(|s| s.percentage).sum();
    assert_eq!(sum.round_dp(10), dec(100));
    for (i, slice) in slices.iter().enumerate() {
        assert_eq!(slice.color, PALETTE[i]);
    }
    assert_eq!(slices[0].label, "BTC (BTC)");
}

// ─── Refresh ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_empty_watchlist_skips_provider() {
    let (manager, _) = manager(provider());
    let before = manager.snapshot().await;

    manager.refresh_prices().await;

    assert!(manager.provider().calls().is_empty());
    assert_eq!(manager.snapshot().await, before);
}

#[tokio::test]
async fn test_refresh_updates_only_returned_ids() {
    let (manager, mem) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc", "eth", "sol"])).await;
    manager.update_holdings(&TokenId::from("btc"), dec(2)).await;

    let mut fresh_btc = token("btc", 60_000);
    fresh_btc.price_change_percentage_24h = Decimal::new(-3, 0);
    fresh_btc.sparkline_in_7d = Sparkline::new(vec![9.0]);
    *manager.provider().prices.lock().unwrap() = vec![fresh_btc, token("doge", 1)];

    manager.refresh_prices().await;

    let requested = manager.provider().by_ids_requests.lock().unwrap().clone();
    assert_eq!(requested, vec![ids(&["btc", "eth", "sol"])]);

    let state = manager.snapshot().await;
    assert_eq!(state.watchlist.len(), 3);
    let btc = state.watchlist.get(&TokenId::from("btc")).unwrap();
    assert_eq!(btc.token.current_price, dec(60_000));
    assert_eq!(btc.token.price_change_percentage_24h, dec(-3));
    assert_eq!(btc.token.sparkline_in_7d.price, vec![9.0]);
    assert_eq!(btc.holdings, dec(2));
    assert_eq!(btc.value, Some(dec(120_000)));

    let eth = state.watchlist.get(&TokenId::from("eth")).unwrap();
    assert_eq!(eth.token.current_price, dec(3_000));
    assert_eq!(eth.value, None);

    assert!(state.last_updated.is_some());
    assert_eq!(persisted(&mem).watchlist[0].token.current_price, dec(60_000));
}

#[tokio::test]
async fn test_refresh_logs_request_start() {
    let logs = LogCapture::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc"])).await;
    manager.refresh_prices().await;

    let output = logs.contents();
    assert!(output.contains("Request started"));
    assert!(output.contains("kind=Prices"));
}

#[tokio::test]
async fn test_refresh_failure_keeps_watchlist() {
    let (manager, _) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc"])).await;
    let before = manager.snapshot().await;

    manager.provider().set_failing(true);
    manager.refresh_prices().await;

    let state = manager.snapshot().await;
    assert_eq!(state.watchlist, before.watchlist);
    assert_eq!(state.last_updated, before.last_updated);
    assert_eq!(state.error.as_deref(), Some("Failed to refresh prices"));
    assert!(!state.is_loading);
}

// ─── Wallet ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wallet_connect_disconnect_persists() {
    let (manager, mem) = manager(provider());
    manager.connect_wallet(WalletAddress::from("0xAbC")).await;
    assert_eq!(
        persisted(&mem).connected_wallet,
        Some(WalletAddress::from("0xAbC"))
    );

    manager.disconnect_wallet().await;
    assert_eq!(manager.snapshot().await.connected_wallet, None);
    assert_eq!(persisted(&mem).connected_wallet, None);
}

#[tokio::test]
async fn test_sync_wallet() {
    let (manager, _) = manager(provider());
    manager
        .sync_wallet(&WalletStatus {
            is_connected: true,
            address: Some("0x1234567890abcdef".to_string()),
            balance: Some("1.5".to_string()),
        })
        .await;
    let state = manager.snapshot().await;
    assert_eq!(
        state.connected_wallet.as_ref().map(|a| a.short()),
        Some("0x1234...cdef".to_string())
    );

    manager.sync_wallet(&WalletStatus::default()).await;
    assert_eq!(manager.snapshot().await.connected_wallet, None);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_restores_from_store() {
    let (manager, mem) = loaded_manager().await;
    manager.add_to_watchlist(&ids(&["btc", "eth"])).await;
    manager.update_holdings(&TokenId::from("eth"), Decimal::new(15, 1)).await;
    manager.connect_wallet(WalletAddress::from("0xabc")).await;
    let saved = manager.snapshot().await;

    let restored = PortfolioManager::new(provider(), PortfolioStore::new(mem.clone()));
    let state = restored.snapshot().await;

    assert_eq!(state.watchlist, saved.watchlist);
    assert_eq!(state.connected_wallet, saved.connected_wallet);
    assert!(state.tokens.is_empty());
    assert_eq!(restored.total_value().await, dec(4_500));
}

#[tokio::test]
async fn test_corrupt_store_starts_empty() {
    let mem = MemoryStore::new();
    mem.set(STORAGE_KEY, "{\"watchlist\": [oops").unwrap();

    let manager = PortfolioManager::new(provider(), PortfolioStore::new(mem));

    let state = manager.snapshot().await;
    assert!(state.watchlist.is_empty());
    assert_eq!(state.connected_wallet, None);
}

#[tokio::test]
async fn test_legacy_numeric_blob_loads() {
    let mem = MemoryStore::new();
    let blob = r#"{
        "watchlist": [{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://img.example/btc.png",
            "current_price": 50000,
            "market_cap": 1000000,
            "market_cap_rank": 1,
            "price_change_percentage_24h": 1.5,
            "sparkline_in_7d": {"price": [1, 2, 3]},
            "holdings": 2,
            "value": 100000
        }],
        "connectedWallet": null
    }"#;
    mem.set(STORAGE_KEY, blob).unwrap();

    let manager = PortfolioManager::new(provider(), PortfolioStore::new(mem));

    let state = manager.snapshot().await;
    let entry = &state.watchlist.entries()[0];
    assert_eq!(entry.holdings, dec(2));
    assert_eq!(entry.value, Some(dec(100_000)));
    assert_eq!(manager.total_value().await, dec(100_000));
}

// ─── Interleaving ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_local_commands_run_while_request_in_flight() {
    let source = provider();
    let (release, gate) = oneshot::channel();
    *source.search_gate.lock().unwrap() = Some(gate);
    let (manager, _) = manager(source);
    manager.initialize_catalog().await;

    let search = manager.search("hit");
    let local = async {
        manager.add_to_watchlist(&ids(&["btc"])).await;
        manager.update_holdings(&TokenId::from("btc"), dec(1)).await;
        assert!(manager.snapshot().await.is_loading);
        release.send(()).unwrap();
    };
    tokio::join!(search, local);

    let state = manager.snapshot().await;
    assert!(!state.is_loading);
    assert_eq!(state.search_results.len(), 10);
    assert_eq!(state.watchlist.len(), 1);
    assert_eq!(manager.total_value().await, dec(50_000));
}
