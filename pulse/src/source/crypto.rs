//! Coin prices from CoinGecko.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use super::error::FetchError;
use super::http::HttpClient;
use super::{Fetcher, SourceData, SourceId};
use crate::config::CryptoSettings;

/// CoinGecko simple price endpoint.
pub const CRYPTO_ENDPOINT: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Ticker symbols for well-known coin ids.
const KNOWN_SYMBOLS: &[(&str, &str)] = &[
    ("bitcoin", "BTC"),
    ("ethereum", "ETH"),
    ("solana", "SOL"),
    ("dogecoin", "DOGE"),
    ("cardano", "ADA"),
    ("polkadot", "DOT"),
    ("ripple", "XRP"),
];

/// USD quote for one coin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinQuote {
    /// CoinGecko id, e.g. "bitcoin".
    pub id: String,
    pub symbol: String,
    pub price: f64,
    /// 24h change in percent.
    pub change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiQuote {
    usd: f64,
    usd_24h_change: f64,
    usd_market_cap: f64,
    usd_24h_vol: f64,
}

/// Ticker symbol for a coin id.
///
/// Unknown ids fall back to the upper-cased id cut to four characters.
pub fn symbol_for(id: &str) -> String {
    KNOWN_SYMBOLS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, symbol)| symbol.to_string())
        .unwrap_or_else(|| id.to_uppercase().chars().take(4).collect())
}

/// Decode a CoinGecko response, keeping the order of `coins`.
///
/// Coins missing from the response are skipped.
pub fn parse_quotes(body: &[u8], coins: &[String]) -> Result<Vec<CoinQuote>, FetchError> {
    let data: HashMap<String, ApiQuote> = serde_json::from_slice(body)?;

    Ok(coins
        .iter()
        .filter_map(|id| {
            data.get(id).map(|quote| CoinQuote {
                id: id.clone(),
                symbol: symbol_for(id),
                price: quote.usd,
                change_24h: quote.usd_24h_change,
                market_cap: quote.usd_market_cap,
                volume_24h: quote.usd_24h_vol,
            })
        })
        .collect())
}

/// Fetches USD prices for the configured coins.
pub struct CryptoFetcher {
    client: Arc<dyn HttpClient>,
    coins: Vec<String>,
}

impl CryptoFetcher {
    pub fn new(client: Arc<dyn HttpClient>, settings: &CryptoSettings) -> Self {
        Self {
            client,
            coins: settings.coins.clone(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}?ids={}&vs_currencies=usd&include_24hr_change=true&include_market_cap=true&include_24hr_vol=true",
            CRYPTO_ENDPOINT,
            self.coins.join(",")
        )
    }
}

impl Fetcher for CryptoFetcher {
    fn source(&self) -> SourceId {
        SourceId::Crypto
    }

    fn fetch(&self) -> Result<SourceData, FetchError> {
        if self.coins.is_empty() {
            return Err(FetchError::MissingConfig("crypto.coins"));
        }

        debug!(coins = self.coins.len(), "Fetching crypto prices");
        let body = self.client.get(&self.url(), &[])?;
        parse_quotes(&body, &self.coins).map(SourceData::Crypto)
    }
}
