mod driver;

pub use driver::{render_driver, PACKAGE_PLACEHOLDER, TESTMODS_PLACEHOLDER};
