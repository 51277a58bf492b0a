pub mod dispatch;
pub mod entry_point;
pub mod intake;
pub mod interaction;
pub mod lifecycle;
pub mod provisioning;

#[cfg(test)]
pub(crate) mod testing;
