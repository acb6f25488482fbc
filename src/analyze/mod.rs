mod imports;

pub use imports::{extract_imports, mask_non_code};
