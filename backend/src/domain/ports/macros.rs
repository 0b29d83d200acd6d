//! Helper macro for declaring domain port error enums.

/// Declare a thiserror-backed port error enum together with snake_case
/// constructor functions accepting `impl Into<T>` for each field.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Example error for macro coverage.
        pub enum ExamplePortError {
            Broken { message: String } => "broken: {message}",
            Gone {} => "gone",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::broken("pipe");
        assert_eq!(err.to_string(), "broken: pipe");
    }

    #[test]
    fn fieldless_variants_get_constructors_too() {
        assert_eq!(ExamplePortError::gone().to_string(), "gone");
    }
}
