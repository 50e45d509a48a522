pub(crate) mod extensions;

pub(crate) mod fp;

// the extensions below are DRY'd through `extensions::FieldExtension`, only the
// multiplicative structure is written per level
pub(crate) mod fp12;
pub(crate) mod fp2;
pub(crate) mod fp6;

pub(crate) mod utils;
