//! Resolution of one quantity from an ordered list of named sources.
//!
//! The same amount can arrive live-computed, cached from the last save, or
//! under a legacy field name. Callers list the sources once, in precedence
//! order, and take the first present value.

/// A value together with the name of the source it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: &'static str,
}

/// First present value in `sources`, or `None` when every source is empty.
pub fn resolve_first<T, I>(sources: I) -> Option<Resolved<T>>
where
    I: IntoIterator<Item = (&'static str, Option<T>)>,
{
    sources
        .into_iter()
        .find_map(|(source, value)| value.map(|value| Resolved { value, source }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_present_wins() {
        let r = resolve_first([("live", None), ("cached", Some(12.0)), ("total", Some(3.0))]);
        assert_eq!(
            r,
            Some(Resolved {
                value: 12.0,
                source: "cached"
            })
        );
    }

    #[test]
    fn test_zero_is_present() {
        let r = resolve_first([("live", Some(0.0)), ("cached", Some(99.0))]);
        assert_eq!(r.map(|r| r.source), Some("live"));
    }

    #[test]
    fn test_all_absent() {
        let r: Option<Resolved<f64>> = resolve_first([("live", None), ("cached", None)]);
        assert!(r.is_none());
    }
}
