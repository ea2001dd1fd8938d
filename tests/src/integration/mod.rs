//! Acceptance scenarios and session lifecycle properties.

#[cfg(test)]
mod lifecycle;
#[cfg(test)]
mod scenarios;
