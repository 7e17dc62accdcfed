//! Naming utilities for import local names
//!
//! `increment_name` is the only tool used to break local-name collisions, so
//! its behavior must be stable across runs: the same colliding inputs always
//! produce the same aliases.

use crate::error::CoreError;

/// Last `/`-separated segment of a package path
///
/// # Examples
/// ```
/// use ifacemock_core::naming::last_path_segment;
/// assert_eq!(last_path_segment("github.com/acme/widgets/sort"), "sort");
/// assert_eq!(last_path_segment("testing"), "testing");
/// ```
pub fn last_path_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Add one to the number at the end of `name`, or append `2` when there is
/// none. Leading zeros of the numeral are dropped.
///
/// # Examples
/// ```
/// use ifacemock_core::naming::increment_name;
/// assert_eq!(increment_name("sort").unwrap(), "sort2");
/// assert_eq!(increment_name("sort2").unwrap(), "sort3");
/// assert_eq!(increment_name("package007").unwrap(), "package8");
/// ```
pub fn increment_name(name: &str) -> Result<String, CoreError> {
    // Byte index just past the last non-digit; digits are ASCII so the
    // split never lands inside a multi-byte character
    let cut = name
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    if cut == name.len() {
        return Ok(format!("{}2", name));
    }

    let (prefix, numeral) = name.split_at(cut);
    let next = numeral
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| CoreError::OutOfRange {
            numeral: numeral.to_string(),
        })?;
    Ok(format!("{}{}", prefix, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment_name_table() -> Result<(), CoreError> {
        assert_eq!(increment_name("")?, "2");
        assert_eq!(increment_name("123")?, "124");
        assert_eq!(increment_name("package7")?, "package8");
        assert_eq!(increment_name("package007")?, "package8");
        assert_eq!(increment_name("package123package")?, "package123package2");
        assert_eq!(
            increment_name("package123package456")?,
            "package123package457"
        );
        Ok(())
    }

    #[test]
    fn test_increment_name_out_of_range() {
        let err = increment_name("package9999999999999999999999999999999").unwrap_err();
        assert!(matches!(err, CoreError::OutOfRange { ref numeral } if numeral == "9999999999999999999999999999999"));

        let max = format!("p{}", u64::MAX);
        assert!(increment_name(&max).is_err());
    }

    #[test]
    fn test_increment_name_non_ascii_prefix() -> Result<(), CoreError> {
        assert_eq!(increment_name("größe")?, "größe2");
        assert_eq!(increment_name("größe9")?, "größe10");
        Ok(())
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(last_path_segment(""), "");
        assert_eq!(last_path_segment("sync/atomic"), "atomic");
        assert_eq!(
            last_path_segment("github.com/acme/widgets/internal/one/testing"),
            "testing"
        );
    }

    proptest! {
        #[test]
        fn incremented_name_always_differs(name in "[a-z_]{0,12}[0-9]{0,6}") {
            let next = increment_name(&name).unwrap();
            prop_assert_ne!(&next, &name);
        }

        #[test]
        fn alphabetic_prefix_is_preserved(prefix in "[a-z]{1,10}", n in 0u64..1_000_000) {
            let next = increment_name(&format!("{}{}", prefix, n)).unwrap();
            prop_assert_eq!(next, format!("{}{}", prefix, n + 1));
        }

        #[test]
        fn repeated_increments_never_repeat(prefix in "[a-z]{1,8}") {
            let mut seen = std::collections::HashSet::new();
            let mut current = prefix.clone();
            for _ in 0..20 {
                prop_assert!(seen.insert(current.clone()));
                current = increment_name(&current).unwrap();
            }
        }
    }
}
