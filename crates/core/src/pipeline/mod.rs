pub mod effect_picker;
pub mod processor_cache;
pub mod processor_reconciler;
pub mod selection_dispatcher;

#[cfg(test)]
pub(crate) mod test_doubles;
