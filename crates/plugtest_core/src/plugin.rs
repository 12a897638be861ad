//! The contract between a plugin library and the driver that loads it.
//!
//! A plugin exports one function, named [`PLUGIN_ENTRY_SYMBOL`], with the [`PlugInEntryPoint`] signature. The
//! returned interface lives in the plugin's static storage and stays valid until the library is unloaded.
//! [`export_test_plugin!`](crate::export_test_plugin) generates that function.
//!
//! ## Panics across the library boundary
//!
//! A plugin library carries its own copy of the standard library. A panic raised by plugin code can only be
//! caught by a `catch_unwind` compiled into the plugin; the driver's copy treats it as a foreign exception and
//! aborts. The provided methods of [`TestPlugIn`] and the generated entry point are instantiated inside the
//! plugin, so the driver calls plugin code through them and gets panics back as `Err(message)`.

use std::panic::{self, AssertUnwindSafe};

use crate::result::panic_message;
use crate::test::Test;

/// Case-exact name of the exported entry point.
pub const PLUGIN_ENTRY_SYMBOL: &str = "get_test_plugin_interface";

/// Signature of the exported entry point. `Err` carries the message of a panic raised while building the plugin.
pub type PlugInEntryPoint = fn() -> Result<&'static dyn TestPlugIn, String>;

/// What a plugin library offers the driver.
///
/// Implementors write [`make_test`](TestPlugIn::make_test) only. Overriding the provided methods defeats
/// the panic handling described in the module docs.
pub trait TestPlugIn: Send + Sync {
    /// The root of the plugin's test tree.
    fn make_test(&self) -> &dyn Test;

    /// [`make_test`](TestPlugIn::make_test), with a panic returned as its message.
    fn try_make_test(&self) -> Result<&dyn Test, String> {
        panic::catch_unwind(AssertUnwindSafe(|| self.make_test())).map_err(|payload| panic_message(payload.as_ref()))
    }

    /// Run `step`, returning the message of any panic raised by this plugin's code inside it.
    fn protect(&self, step: &mut dyn FnMut()) -> Result<(), String> {
        panic::catch_unwind(AssertUnwindSafe(step)).map_err(|payload| panic_message(payload.as_ref()))
    }

    /// Replace the plugin's panic hook. `hook` receives the rendered panic report.
    fn set_panic_hook(&self, hook: Box<dyn Fn(&str) + Send + Sync>) {
        panic::set_hook(Box::new(move |info| hook(&info.to_string())));
    }
}

/// Export `$plugin` (any expression producing a [`TestPlugIn`]) as this library's test plugin.
///
/// The expression is evaluated once, on the first successful call to the entry point. A panic while
/// evaluating it is returned as `Err`.
///
/// ```ignore
/// struct MathPlugIn { root: TestSuite }
///
/// impl TestPlugIn for MathPlugIn {
///     fn make_test(&self) -> &dyn Test { &self.root }
/// }
///
/// plugtest_core::export_test_plugin!(MathPlugIn { root: build_suite() });
/// ```
#[macro_export]
macro_rules! export_test_plugin {
    ($plugin:expr) => {
        #[unsafe(no_mangle)]
        pub fn get_test_plugin_interface()
        -> ::std::result::Result<&'static dyn $crate::TestPlugIn, ::std::string::String> {
            static INTERFACE: ::std::sync::OnceLock<::std::boxed::Box<dyn $crate::TestPlugIn>> =
                ::std::sync::OnceLock::new();
            ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| {
                &**INTERFACE.get_or_init(|| {
                    ::std::boxed::Box::new($plugin) as ::std::boxed::Box<dyn $crate::TestPlugIn>
                })
            }))
            .map_err(|payload| $crate::panic_message(payload.as_ref()))
        }

        const _: $crate::PlugInEntryPoint = get_test_plugin_interface;
    };
}
