/// Generates the wire-string surface for a string-backed enum.
///
/// The first string of each variant is the canonical encoding, the one the
/// encoder produces. Any further strings are frozen legacy aliases: accepted
/// on decode for compatibility with older persisted state, never re-emitted.
#[macro_export]
macro_rules! wire_enum {
    (
        impl $name:ident {
            variants {
                $($variant:ident => [$canonical:literal $(, $alias:literal)*]),+ $(,)?
            }
        }
    ) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            /// Canonical wire string for this value. Never a legacy alias.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical,)+
                }
            }

            /// Resolve a wire string against the alias and canonical tables.
            pub(crate) fn from_wire_str(raw: &str) -> Option<Self> {
                match raw {
                    $($canonical $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
