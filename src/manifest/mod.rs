mod assemble;
mod key;
mod map;

pub use assemble::{
    assemble, Creation, CreationKeys, FixedBinding, Manifest, ManifestDefaults, CONSOLE_MODULE,
};
pub use key::{module_path, resolve_key};
pub use map::{CollisionPolicy, KeyCollision, ModuleMap};
