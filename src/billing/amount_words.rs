//! Amount-in-words rendering
//!
//! Converts whole rupee amounts to English words using the Indian
//! numbering system (Thousand, Lakh, Crore).

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Render a whole amount in words
///
/// Indian scale: groups of Crore (10^7), Lakh (10^5), Thousand, then the
/// final hundreds group. Zero renders as "Zero".
pub fn number_to_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = amount;

    if rest >= CRORE {
        parts.push(format!("{} Crore", number_to_words(rest / CRORE)));
        rest %= CRORE;
    }
    if rest >= LAKH {
        parts.push(format!("{} Lakh", under_thousand(rest / LAKH)));
        rest %= LAKH;
    }
    if rest >= 1000 {
        parts.push(format!("{} Thousand", under_thousand(rest / 1000)));
        rest %= 1000;
    }
    if rest > 0 {
        parts.push(under_thousand(rest));
    }

    parts.join(" ")
}

fn under_thousand(n: u64) -> String {
    debug_assert!(n < 1000);

    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;

    if rest >= 100 {
        parts.push(format!("{} Hundred", ONES[(rest / 100) as usize]));
        rest %= 100;
    }
    match rest {
        0 => {}
        1..=9 => parts.push(ONES[rest as usize].to_string()),
        10..=19 => parts.push(TEENS[(rest - 10) as usize].to_string()),
        _ => {
            let tens = TENS[(rest / 10) as usize].to_string();
            if rest % 10 == 0 {
                parts.push(tens);
            } else {
                parts.push(format!("{tens} {}", ONES[(rest % 10) as usize]));
            }
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(number_to_words(0), "Zero");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_to_words(7), "Seven");
        assert_eq!(number_to_words(15), "Fifteen");
        assert_eq!(number_to_words(42), "Forty Two");
        assert_eq!(number_to_words(90), "Ninety");
        assert_eq!(number_to_words(100), "One Hundred");
        assert_eq!(number_to_words(101), "One Hundred One");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(number_to_words(1234), "One Thousand Two Hundred Thirty Four");
        assert_eq!(number_to_words(99_999), "Ninety Nine Thousand Nine Hundred Ninety Nine");
    }

    #[test]
    fn test_indian_scales() {
        assert_eq!(number_to_words(100_000), "One Lakh");
        assert_eq!(number_to_words(250_000), "Two Lakh Fifty Thousand");
        assert_eq!(number_to_words(10_000_000), "One Crore");
        assert_eq!(
            number_to_words(12_345_678),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight"
        );
    }

    #[test]
    fn test_crore_recursion() {
        // Crore amounts above 100 crore recurse on the crore count
        assert_eq!(
            number_to_words(1_000_000_000),
            "One Hundred Crore"
        );
        assert_eq!(
            number_to_words(1_230_000_000),
            "One Hundred Twenty Three Crore"
        );
    }
}
