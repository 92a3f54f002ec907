//! Locale-aware name ordering for pt-BR lists.
//!
//! List endpoints and stores sort by name the way `localeCompare` with the
//! pt-BR locale does for the characters that actually occur in the data:
//! case-insensitive, with accented letters grouped next to their base
//! letter instead of after 'z'.

use std::cmp::Ordering;

/// Compares two names case- and accent-insensitively; ties fall back to
/// the raw string so the order is total.
pub fn compare_nomes(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn sort_key(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_alphabetically() {
        assert_eq!(compare_nomes("Alfa", "Beta"), Ordering::Less);
        assert_eq!(compare_nomes("Beta", "Alfa"), Ordering::Greater);
    }

    #[test]
    fn ignores_case() {
        assert_eq!(compare_nomes("escola", "Escola Nova"), Ordering::Less);
    }

    #[test]
    fn accented_names_sort_with_base_letter() {
        // "Água" must not sort after "Zebra" the way raw byte order would.
        assert_eq!(compare_nomes("Água", "Zebra"), Ordering::Less);
        assert_eq!(compare_nomes("São Paulo", "Santos"), Ordering::Greater);
    }

    #[test]
    fn equal_keys_fall_back_to_raw_order() {
        assert_ne!(compare_nomes("ágil", "agil"), Ordering::Equal);
    }
}
