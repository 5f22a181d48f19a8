//! Plural variant selection over the fixed modifier buckets
//!
//! This is not a CLDR plural implementation. A count picks a variant through a
//! short, fixed chain of labels and falls back to the base text:
//!
//! | count  | lookup order                      |
//! |--------|-----------------------------------|
//! | 0      | `0`, `M`, base                    |
//! | 1      | `1`, base                         |
//! | 2..=4  | the digit, `C`, `M`, base         |
//! | 5, 6   | the digit, `M`, base              |
//! | 10     | `T`, `M`, base                    |
//! | other  | the decimal count, `M`, base      |

use crate::error::{I18nError, I18nResult};
use crate::version::{DecodedVersions, MANY, TEN, TWO_THREE_FOUR};

/// Placeholder replaced with the count in the selected text
pub const COUNT_PLACEHOLDER: &str = "%d";

/// Labels tried for a count, most specific first. The base text is tried last
/// and is not part of the chain.
pub fn label_chain(count: i64) -> Vec<String> {
    let digit = count.to_string();
    match count {
        0 => vec![digit, MANY.to_string()],
        1 => vec![digit],
        2..=4 => vec![digit, TWO_THREE_FOUR.to_string(), MANY.to_string()],
        10 => vec![TEN.to_string(), MANY.to_string()],
        _ => vec![digit, MANY.to_string()],
    }
}

/// Pick the variant for `count` and substitute `%d` with it.
///
/// # Errors
/// `NoMatchingVariant` when no label in the chain matches and there is no base text.
pub fn select_plural_variant(count: i64, versions: &DecodedVersions) -> I18nResult<String> {
    let selected = label_chain(count)
        .into_iter()
        .find_map(|label| versions.get(&Some(label)))
        .or_else(|| versions.get(&None));

    match selected {
        Some(text) => Ok(text.replace(COUNT_PLACEHOLDER, &count.to_string())),
        None => Err(I18nError::NoMatchingVariant {
            modifier: count.to_string(),
            text: describe(versions),
        }),
    }
}

fn describe(versions: &DecodedVersions) -> String {
    versions
        .iter()
        .map(|(label, text)| format!("{}={}", label.as_deref().unwrap_or("<base>"), text))
        .collect::<Vec<_>>()
        .join(", ")
}
