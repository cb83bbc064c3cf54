/// Declares a primary-key newtype for a stored record.
///
/// Referees, games, availability windows and assignments are keyed by
/// repository-issued integers. Wrapping each in its own type keeps a
/// `GameId` from being passed where a `RefereeId` is expected. The wrapper is
/// ordered (it keys the in-memory `BTreeMap`s), serializes as the bare
/// integer, and prints as the integer in log lines and error messages.
///
/// ```ignore
/// crate::define_id_type!(
///     /// Game identifier.
///     i64,
///     GameId
/// );
/// ```
#[macro_export]
macro_rules! define_id_type {
    ($(#[$meta:meta])* $inner:ty, $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }
    };
}
