//! Macro for declaring phase enums.

/// Declare an enum and implement [`State`](crate::core::State) for it.
///
/// Variants listed under `final:` report `is_final() == true`, variants
/// under `error:` report `is_error() == true`.
///
/// # Example
///
/// ```
/// use wordscend::state_enum;
/// use wordscend::core::State;
///
/// state_enum! {
///     pub enum RunPhase {
///         Climbing,
///         Finished,
///     }
///     final: [Finished]
/// }
///
/// assert!(RunPhase::Finished.is_final());
/// assert_eq!(RunPhase::Climbing.name(), "Climbing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
