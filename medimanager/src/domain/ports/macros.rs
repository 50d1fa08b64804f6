//! Helper macro generating port error enums.
//!
//! Each variant gets a `thiserror` message, a snake_case constructor that
//! accepts `impl Into<_>` for every field, and a stable `kind()` label used
//! as a structured logging field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Stable variant label for logs.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) => {
                            stringify!($variant)
                        }
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors.

    define_port_error! {
        pub enum SamplePortError {
            Offline => "collaborator offline",
            Failed { message: String } => "failed: {message}",
            Rejected { status: u16, message: String } => "rejected ({status}): {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::failed("boom");
        assert_eq!(err.to_string(), "failed: boom");
    }

    #[test]
    fn constructors_preserve_non_string_fields() {
        let err = SamplePortError::rejected(503_u16, "busy");
        assert_eq!(
            err,
            SamplePortError::Rejected {
                status: 503,
                message: "busy".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "rejected (503): busy");
    }

    #[test]
    fn kind_names_the_variant() {
        assert_eq!(SamplePortError::offline().kind(), "Offline");
        assert_eq!(SamplePortError::failed("x").kind(), "Failed");
    }
}
