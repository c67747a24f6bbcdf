//! Static table of supported currencies and their display metadata.

/// Display metadata for one supported currency. Entries live in the
/// `CURRENCIES` table and are never mutated.
#[derive(Debug, PartialEq, Eq)]
pub struct CurrencyDescriptor {
    pub code: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: [CurrencyDescriptor; 8] = [
    CurrencyDescriptor {
        code: "USD",
        symbol: "$",
        flag: "🇺🇸",
        name: "US Dollar",
    },
    CurrencyDescriptor {
        code: "THB",
        symbol: "฿",
        flag: "🇹🇭",
        name: "Thai Baht",
    },
    CurrencyDescriptor {
        code: "EUR",
        symbol: "€",
        flag: "🇪🇺",
        name: "Euro",
    },
    CurrencyDescriptor {
        code: "GBP",
        symbol: "£",
        flag: "🇬🇧",
        name: "British Pound",
    },
    CurrencyDescriptor {
        code: "JPY",
        symbol: "¥",
        flag: "🇯🇵",
        name: "Japanese Yen",
    },
    CurrencyDescriptor {
        code: "AUD",
        symbol: "A$",
        flag: "🇦🇺",
        name: "Australian Dollar",
    },
    CurrencyDescriptor {
        code: "CAD",
        symbol: "C$",
        flag: "🇨🇦",
        name: "Canadian Dollar",
    },
    CurrencyDescriptor {
        code: "CNY",
        symbol: "¥",
        flag: "🇨🇳",
        name: "Chinese Yuan",
    },
];

/// Looks up a currency by its 3-letter code.
pub fn find(code: &str) -> Option<&'static CurrencyDescriptor> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// Filters the table by a case-insensitive substring match against the
/// code or the display name. An empty query returns the full table in
/// declaration order.
pub fn filter(query: &str) -> Vec<&'static CurrencyDescriptor> {
    if query.is_empty() {
        return CURRENCIES.iter().collect();
    }
    let query = query.to_lowercase();
    CURRENCIES
        .iter()
        .filter(|c| {
            c.code.to_lowercase().contains(&query) || c.name.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_full_table_in_order() {
        let all = filter("");
        assert_eq!(all.len(), 8);
        let codes: Vec<_> = all.iter().map(|c| c.code).collect();
        assert_eq!(
            codes,
            ["USD", "THB", "EUR", "GBP", "JPY", "AUD", "CAD", "CNY"]
        );
    }

    #[test]
    fn query_matches_code_and_name_case_insensitively() {
        let matches = filter("eur");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].code, "EUR");

        let matches = filter("Thb");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Thai Baht");

        let matches = filter("baht");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].code, "THB");
    }

    #[test]
    fn query_matching_several_entries_preserves_order() {
        let codes: Vec<_> = filter("dollar").iter().map(|c| c.code).collect();
        assert_eq!(codes, ["USD", "AUD", "CAD"]);
    }

    #[test]
    fn unknown_query_returns_nothing() {
        assert!(filter("zzz").is_empty());
    }

    #[test]
    fn find_by_code() {
        assert_eq!(find("USD").unwrap().symbol, "$");
        assert!(find("XXX").is_none());
    }
}
