//! Deep-link construction (Section 4.G).
//!
//! If a listing already carries a direct URL, pass it through untouched;
//! otherwise build a URL-encoded search URL so the recipient lands on the
//! right storefront even without an exact listing link.

use urlencoding::encode;

pub fn build_tcgplayer_url(existing_url: Option<&str>, card_name: &str) -> String {
    match existing_url {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => format!("https://www.tcgplayer.com/search/pokemon/product?q={}", encode(card_name)),
    }
}

pub fn build_cardmarket_url(existing_url: Option<&str>, card_name: &str) -> String {
    match existing_url {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => format!("https://www.cardmarket.com/en/Pokemon/Cards?searchString={}", encode(card_name)),
    }
}

pub struct SignalUrls {
    pub tcgplayer_url: String,
    pub cardmarket_url: String,
}

pub fn build_signal_urls(
    card_name: &str,
    existing_tcgplayer_url: Option<&str>,
    existing_cardmarket_url: Option<&str>,
) -> SignalUrls {
    SignalUrls {
        tcgplayer_url: build_tcgplayer_url(existing_tcgplayer_url, card_name),
        cardmarket_url: build_cardmarket_url(existing_cardmarket_url, card_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_url_passes_through_unchanged() {
        let url = build_tcgplayer_url(Some("https://example.com/exact"), "Pikachu ex");
        assert_eq!(url, "https://example.com/exact");
    }

    #[test]
    fn missing_url_builds_encoded_search_url() {
        let url = build_tcgplayer_url(None, "Pikachu ex");
        assert_eq!(url, "https://www.tcgplayer.com/search/pokemon/product?q=Pikachu%20ex");
    }

    #[test]
    fn cardmarket_search_url_encodes_spaces() {
        let url = build_cardmarket_url(None, "Charizard ex");
        assert_eq!(url, "https://www.cardmarket.com/en/Pokemon/Cards?searchString=Charizard%20ex");
    }
}
