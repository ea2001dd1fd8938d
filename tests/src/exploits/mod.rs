//! Attack simulations.
//!
//! - `dupe` - relog and disconnect races aimed at duplicating vault contents
//! - `smuggling` - moving blacklisted items into vaults by indirect paths

#[cfg(test)]
mod smuggling;
