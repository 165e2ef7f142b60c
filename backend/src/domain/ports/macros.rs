//! `define_port_error!`, the declaration macro shared by port error enums.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Offline => "store offline",
//!         Rejected { reason: String } => "rejected: {reason}",
//!     }
//! }
//!
//! let err = StoreError::rejected("too long");
//! ```
//!
//! Every variant becomes a `thiserror` variant displaying its message, and
//! gains a snake-case constructor. Struct variants take their fields in
//! declaration order as `impl Into<FieldType>`.

macro_rules! define_port_error {
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
                define_port_error!(@constructor $variant $( $($field : $ty),* )?);
            )*
        }
    };

    (@constructor $variant:ident $($field:ident : $ty:ty),*) => {
        ::paste::paste! {
            #[doc = "Build a [`Self::" $variant "`] error."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                define_port_error!(@value $variant $($field),*)
            }
        }
    };

    (@value $variant:ident) => {
        Self::$variant
    };

    (@value $variant:ident $($field:ident),+) => {
        Self::$variant { $($field: $field.into()),+ }
    };
}

pub(crate) use define_port_error;
