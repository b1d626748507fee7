//! Pip sizes and bid/ask reconstruction from the bar spread.

use crate::bar::Bar;

/// Pip size for a currency pair: `0.01` for JPY crosses, `0.0001` otherwise.
#[must_use]
pub fn pip_size(symbol: &str) -> f64 {
    if symbol.to_ascii_uppercase().contains("JPY") {
        0.01
    } else {
        0.0001
    }
}

/// Bid/ask pair derived from the open price and the bar spread.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quote {
    /// `open - spread * pip / 2`
    pub bid: f64,
    /// `open + spread * pip / 2`
    pub ask: f64,
}

impl Quote {
    /// Splits the bar spread symmetrically around the open price.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_bar(bar: &Bar, pip: f64) -> Self {
        let half = bar.spread as f64 * pip / 2.0;
        Self {
            bid: bar.open - half,
            ask: bar.open + half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pip_size_by_symbol() {
        assert!((pip_size("EURUSD") - 0.0001).abs() < 1e-15);
        assert!((pip_size("USDJPY") - 0.01).abs() < 1e-15);
        assert!((pip_size("chfjpy") - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_quote_from_bar() {
        let bar = Bar {
            timestamp_ns: 0,
            open: 150.00,
            high: 150.50,
            low: 149.50,
            close: 150.20,
            volume: 10,
            spread: 20,
        };
        let quote = Quote::from_bar(&bar, pip_size("USDJPY"));
        assert!((quote.bid - 149.90).abs() < 1e-9);
        assert!((quote.ask - 150.10).abs() < 1e-9);
    }

    #[test]
    fn test_zero_spread_collapses_to_open() {
        let bar = Bar {
            timestamp_ns: 0,
            open: 1.1,
            high: 1.2,
            low: 1.0,
            close: 1.15,
            volume: 0,
            spread: 0,
        };
        let quote = Quote::from_bar(&bar, 0.0001);
        assert_eq!(quote.bid, 1.1);
        assert_eq!(quote.ask, 1.1);
    }
}
