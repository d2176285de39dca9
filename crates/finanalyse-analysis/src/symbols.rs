//! Ticker parsing and normalization

/// Split a comma-separated ticker list into usable symbols.
///
/// Tokens are trimmed and uppercased; empty tokens are dropped and
/// duplicates are removed, preserving first-seen order. The returned
/// order is the "retained order" that flows through the whole pipeline
/// into the response key ordering.
pub fn parse_tickers(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let symbol = token.trim().to_uppercase();
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_uppercases() {
        assert_eq!(parse_tickers(" aapl , msft"), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_drops_empty_tokens() {
        assert_eq!(parse_tickers("AAPL,,  ,MSFT,"), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_dedups_preserving_order() {
        assert_eq!(
            parse_tickers("MSFT,aapl,MSFT,AAPL,GOOG"),
            vec!["MSFT", "AAPL", "GOOG"]
        );
    }

    #[test]
    fn test_single_token() {
        assert_eq!(parse_tickers("AAPL"), vec!["AAPL"]);
        assert_eq!(parse_tickers(",,,"), Vec::<String>::new());
    }
}
