//! Helper macros for export generation.
//!
//! Provides the `abi_fn!` macro that generates `pub unsafe extern "C" fn`
//! wrappers under either a bare or a type-annotated symbol name.

/// Generate an `extern "C"` export.
///
/// # Usage
///
/// ```ignore
/// abi_fn! {
///     /// Exported as `my_func`.
///     fn my_func(arg1: Type1) -> ReturnType {
///         // implementation body
///     }
/// }
///
/// abi_fn! {
///     /// Exported under an explicit symbol name.
///     export "$int_myfunc_const_char"
///     fn my_func2(arg1: *const c_char) -> c_int {
///         // implementation body
///     }
/// }
/// ```
///
/// The bare form uses `#[unsafe(no_mangle)]`; the `export` form uses
/// `#[unsafe(export_name = ...)]` so the symbol may contain characters that
/// are not valid in a Rust identifier.
macro_rules! abi_fn {
    (
        $(#[$meta:meta])*
        export $sym:literal
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        $body:block
    ) => {
        $(#[$meta])*
        #[unsafe(export_name = $sym)]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) -> $ret {
            unsafe { $body }
        }
    };

    (
        $(#[$meta:meta])*
        export $sym:literal
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? )
        $body:block
    ) => {
        $(#[$meta])*
        #[unsafe(export_name = $sym)]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) {
            unsafe { $body }
        }
    };

    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        $body:block
    ) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) -> $ret {
            unsafe { $body }
        }
    };

    // Variant without return type (returns ())
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? )
        $body:block
    ) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) {
            unsafe { $body }
        }
    };
}
