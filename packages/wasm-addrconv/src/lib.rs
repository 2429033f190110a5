pub mod address;
pub mod migrate;
pub mod wasm;

#[cfg(test)]
mod test_utils;

pub use address::{
    convert_address, decode_address, public_key_to_implicit_address, AddressError, Discriminant,
    RawAddress,
};

pub use migrate::{migrate, MigrateConfig, MigrateError, MigrationReport, Migrator};
pub use wasm::AddressNamespace;
