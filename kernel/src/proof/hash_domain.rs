//! Typed domain separators for canonical hashing.
//!
//! Every digest in the workspace selects a domain via [`HashDomain`].
//! Adding a new domain is a single change here: the enum, `as_bytes()`,
//! `ALL`, and `Display` are all generated from the same macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Search-state fingerprint: position identity bytes + collected-key mask.
    SearchState => b"TRIKEY::SEARCH_STATE::V1\0",

    /// Search policy snapshot hashing.
    SearchPolicy => b"TRIKEY::SEARCH_POLICY::V1\0",

    /// Search graph (expansion audit log) hashing.
    SearchGraph => b"TRIKEY::SEARCH_GRAPH::V1\0",

    // -----------------------------------------------------------------------
    // Harness
    // -----------------------------------------------------------------------

    /// Maze problem description hashing (grid text, keys, start).
    MazeProblem => b"TRIKEY::MAZE_PROBLEM::V1\0",

    /// Solve report hashing.
    SolveReport => b"TRIKEY::SOLVE_REPORT::V1\0",

    // -----------------------------------------------------------------------
    // Benchmarks
    // -----------------------------------------------------------------------

    /// Benchmark determinism guard.
    BenchGuard => b"TRIKEY::BENCH_GUARD::V1\0",
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn all_bytes_unique() {
        let mut seen = BTreeSet::new();
        for domain in HashDomain::ALL {
            assert!(
                seen.insert(domain.as_bytes()),
                "duplicate domain bytes: {domain}"
            );
        }
    }

    #[test]
    fn all_follow_naming_convention() {
        for domain in HashDomain::ALL {
            let bytes = domain.as_bytes();
            assert!(
                bytes.starts_with(b"TRIKEY::"),
                "{domain} does not start with TRIKEY::"
            );
            assert!(
                bytes.ends_with(b"::V1\0"),
                "{domain} does not end with ::V1\\0"
            );
        }
    }

    #[test]
    fn display_returns_variant_name() {
        assert_eq!(format!("{}", HashDomain::SearchState), "SearchState");
        assert_eq!(format!("{}", HashDomain::SolveReport), "SolveReport");
    }
}
