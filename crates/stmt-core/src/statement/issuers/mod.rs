//! Built-in issuer layouts.
//!
//! Each module holds one issuer's descriptor as plain data. Rules for a field
//! are listed most specific first; later rules are fallbacks for terse or
//! alternate renderings and must stay behind the specific ones.

mod axis;
mod bob;
mod kotak;
mod sbi;
mod yes;

use super::descriptor::DescriptorSpec;

/// Specs for every built-in issuer.
pub fn builtin_specs() -> Vec<DescriptorSpec> {
    vec![axis::spec(), bob::spec(), kotak::spec(), sbi::spec(), yes::spec()]
}
