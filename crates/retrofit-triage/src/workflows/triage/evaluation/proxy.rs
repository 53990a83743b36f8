use super::super::domain::ProxyCode;
use std::collections::BTreeSet;

/// Unordered proxy pairs accepted for the flexible route, stored low-high.
/// 1-3, 5-7 and 6-7 are excluded.
const APPROVED_PAIRS: [(u8, u8); 18] = [
    (1, 2),
    (1, 4),
    (1, 5),
    (1, 6),
    (1, 7),
    (2, 3),
    (2, 4),
    (2, 5),
    (2, 6),
    (2, 7),
    (3, 4),
    (3, 5),
    (3, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (4, 7),
    (5, 6),
];

pub(crate) fn is_approved_pair(a: ProxyCode, b: ProxyCode) -> bool {
    let (low, high) = if a <= b {
        (a.get(), b.get())
    } else {
        (b.get(), a.get())
    };
    low != high && APPROVED_PAIRS.contains(&(low, high))
}

/// True when any two distinct selected proxies form an approved pair.
pub fn proxies_form_qualifying_pair(proxies: &BTreeSet<ProxyCode>) -> bool {
    if proxies.len() < 2 {
        return false;
    }

    let codes: Vec<ProxyCode> = proxies.iter().copied().collect();
    codes.iter().enumerate().any(|(index, first)| {
        codes[index + 1..]
            .iter()
            .any(|second| is_approved_pair(*first, *second))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: u8) -> ProxyCode {
        ProxyCode::new(value).expect("valid proxy code")
    }

    #[test]
    fn pair_check_is_symmetric() {
        for a in 1..=7 {
            for b in 1..=7 {
                assert_eq!(
                    is_approved_pair(code(a), code(b)),
                    is_approved_pair(code(b), code(a)),
                    "pair {a}-{b}"
                );
            }
        }
    }

    #[test]
    fn a_code_never_pairs_with_itself() {
        assert!((1..=7).all(|value| !is_approved_pair(code(value), code(value))));
    }

    #[test]
    fn exactly_three_distinct_pairs_are_excluded() {
        let mut excluded = Vec::new();
        for a in 1..=7u8 {
            for b in (a + 1)..=7 {
                if !is_approved_pair(code(a), code(b)) {
                    excluded.push((a, b));
                }
            }
        }
        assert_eq!(excluded, vec![(1, 3), (5, 7), (6, 7)]);
    }
}
