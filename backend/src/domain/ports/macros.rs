//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant carries named fields and a `thiserror` message. For a variant
//! `Query { message: String }` the macro emits `fn query(message: impl
//! Into<String>) -> Self`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
