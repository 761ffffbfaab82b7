#[doc(hidden)]
#[macro_export]
/// A macro which defines a string-backed enum type.
///
/// Unknown values are preserved in an `Unknown(String)` variant,
/// so that parsing never fails and validation can be done
/// by the consumer where it matters.
///
/// `@String` parses trimmed and ASCII case-insensitive,
/// `@String exact` only accepts the values as declared.
macro_rules! __enum_builder {
    (
        $(#[$m:meta])*
        @String exact
        $enum_vis:vis enum $enum_name:ident
        { $( $(#[$enum_meta:meta])* $enum_var:ident => $enum_val:literal $(| $enum_val_alt:literal)* ),* $(,)? }
    ) => {
        $crate::__enum_builder! {
            @__string exact
            $(#[$m])*
            $enum_vis enum $enum_name
            { $( $(#[$enum_meta])* $enum_var => $enum_val $(| $enum_val_alt)* ),* }
        }
    };
    (
        $(#[$m:meta])*
        @String
        $enum_vis:vis enum $enum_name:ident
        { $( $(#[$enum_meta:meta])* $enum_var:ident => $enum_val:literal $(| $enum_val_alt:literal)* ),* $(,)? }
    ) => {
        $crate::__enum_builder! {
            @__string ignore_case
            $(#[$m])*
            $enum_vis enum $enum_name
            { $( $(#[$enum_meta])* $enum_var => $enum_val $(| $enum_val_alt)* ),* }
        }
    };
    (@__match exact ($s:expr) { $($case:literal $(| $case_alt:literal)* => $ret:expr),* , _ => $fallback:expr }) => {
        match $s {
            $($case $(| $case_alt)* => $ret,)*
            _ => $fallback,
        }
    };
    (@__match ignore_case ($s:expr) { $($case:literal $(| $case_alt:literal)* => $ret:expr),* , _ => $fallback:expr }) => {
        $crate::macros::match_ignore_ascii_case_str!(match($s) {
            $($case $(| $case_alt)* => $ret),*
            , _ => $fallback,
        })
    };
    (
        @__string $parse:ident
        $(#[$m:meta])*
        $enum_vis:vis enum $enum_name:ident
        { $( $(#[$enum_meta:meta])* $enum_var:ident => $enum_val:literal $(| $enum_val_alt:literal)* ),* }
    ) => {
        $(#[$m])*
        #[derive(Debug, PartialEq, Eq, Clone, Hash)]
        $enum_vis enum $enum_name {
            $(
                $(#[$enum_meta])*
                $enum_var
            ),*
            ,Unknown(String)
        }

        impl $enum_name {
            /// All known variants, in declaration order.
            $enum_vis const KNOWN: &'static [$enum_name] = &[$($enum_name::$enum_var),*];

            /// Return the string value of this variant.
            $enum_vis fn as_str(&self) -> &str {
                match self {
                    $( $enum_name::$enum_var => $enum_val),*
                    ,$enum_name::Unknown(v) => v,
                }
            }

            /// Return the string value of this variant as a [`SmolStr`].
            ///
            /// [`SmolStr`]: https://docs.rs/smol_str
            $enum_vis fn as_smol_str(&self) -> $crate::macros::enums::__SmolStr {
                match self {
                    $( $enum_name::$enum_var => $crate::macros::enums::__SmolStr::new_static($enum_val)),*
                    ,$enum_name::Unknown(v) => $crate::macros::enums::__SmolStr::new(v),
                }
            }

            /// Returns `true` if this is one of the known variants.
            $enum_vis fn is_known(&self) -> bool {
                !matches!(self, $enum_name::Unknown(_))
            }

            /// Same as `FromStr` or `From<&str>` but returning
            /// `None` for unknown values
            $enum_vis fn strict_parse(s: &str) -> Option<Self> {
                $crate::__enum_builder!(@__match $parse (s) {
                    $($enum_val $(| $enum_val_alt)* => Some($enum_name::$enum_var)),*
                    , _ => None
                })
            }
        }

        impl<'a> From<&'a str> for $enum_name {
            fn from(s: &'a str) -> Self {
                $crate::__enum_builder!(@__match $parse (s) {
                    $($enum_val $(| $enum_val_alt)* => $enum_name::$enum_var),*
                    , _ => $enum_name::Unknown(s.to_owned())
                })
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(s.into())
            }
        }

        impl From<String> for $enum_name {
            fn from(s: String) -> Self {
                match $enum_name::strict_parse(&s) {
                    Some(v) => v,
                    None => $enum_name::Unknown(s),
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::macros::enums::__SerdeSerialize for $enum_name {
            #[inline]
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::macros::enums::__SerdeSerializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::macros::enums::__SerdeDeserialize<'de> for $enum_name {
            #[inline]
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::macros::enums::__SerdeDeserializer<'de>,
            {
                let s = <::std::borrow::Cow<'de, str> as $crate::macros::enums::__SerdeDeserialize<'de>>::deserialize(deserializer)?;
                Ok(s.as_ref().into())
            }
        }
    };
}

#[doc(inline)]
pub use crate::__enum_builder as enum_builder;

#[doc(hidden)]
pub use serde::{
    Deserialize as __SerdeDeserialize, Deserializer as __SerdeDeserializer,
    Serialize as __SerdeSerialize, Serializer as __SerdeSerializer,
};

#[doc(hidden)]
pub use ::smol_str::SmolStr as __SmolStr;

#[cfg(test)]
mod tests {
    crate::macros::enums::enum_builder! {
        @String
        enum Fruit {
            Apple => "apple",
            Pear => "pear" | "poire",
        }
    }

    #[test]
    fn test_enum_builder_string_parse() {
        assert_eq!(Fruit::from("apple"), Fruit::Apple);
        assert_eq!(Fruit::from(" APPLE "), Fruit::Apple);
        assert_eq!(Fruit::from("poire"), Fruit::Pear);
        assert_eq!(Fruit::from("kiwi"), Fruit::Unknown("kiwi".to_owned()));
        assert_eq!(Fruit::from("kiwi".to_owned()).as_str(), "kiwi");
        assert_eq!(Fruit::strict_parse("kiwi"), None);
        assert!(!Fruit::from("kiwi").is_known());
        assert_eq!(Fruit::KNOWN, &[Fruit::Apple, Fruit::Pear]);
    }

    crate::macros::enums::enum_builder! {
        @String exact
        enum Color {
            Red => "red",
            DarkBlue => "dark-blue" | "navy",
        }
    }

    #[test]
    fn test_enum_builder_exact_string_parse() {
        assert_eq!(Color::from("red"), Color::Red);
        assert_eq!(Color::from("navy"), Color::DarkBlue);
        for s in ["Red", " red", "red ", "NAVY"] {
            assert_eq!(Color::from(s), Color::Unknown(s.to_owned()), "input: {s:?}");
            assert_eq!(Color::strict_parse(s), None, "input: {s:?}");
        }
        assert_eq!(Color::from("dark-blue".to_owned()), Color::DarkBlue);
        assert_eq!(Color::DarkBlue.as_smol_str(), "dark-blue");
        assert_eq!(Color::KNOWN, &[Color::Red, Color::DarkBlue]);
        let color: Color = serde_json::from_str(r#""RED""#).unwrap();
        assert!(!color.is_known());
    }

    #[test]
    fn test_enum_builder_string_display_and_serde() {
        assert_eq!(Fruit::Pear.to_string(), "pear");
        assert_eq!(Fruit::Apple.as_smol_str(), "apple");

        let json = serde_json::to_string(&Fruit::Pear).unwrap();
        assert_eq!(json, r#""pear""#);
        let fruit: Fruit = serde_json::from_str(r#""Apple""#).unwrap();
        assert_eq!(fruit, Fruit::Apple);
    }
}
