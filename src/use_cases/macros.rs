//! Helper macro for generating single-operation use cases.

/// Declares `<Name>UseCase`, a cloneable wrapper whose `execute` forwards to
/// one repository method.
macro_rules! define_use_case {
    (
        $(#[$outer:meta])*
        $name:ident => $repository:ident :: $method:ident ( $( $arg:ident : $ty:ty ),* $(,)? ) -> $output:ty
    ) => {
        ::paste::paste! {
            $(#[$outer])*
            #[derive(Clone)]
            pub struct [<$name UseCase>] {
                repository: ::std::sync::Arc<dyn $repository>,
            }

            impl [<$name UseCase>] {
                pub fn new(repository: ::std::sync::Arc<dyn $repository>) -> Self {
                    Self { repository }
                }

                pub fn execute(&self $(, $arg: $ty)*) -> $crate::framework::ResourceStream<$output> {
                    self.repository.$method($($arg),*)
                }
            }
        }
    };
}

pub(crate) use define_use_case;
