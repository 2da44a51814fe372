use crate::tree::{ConfigValue, Tree};

/// Deep-merge `overlay` on top of `base`.
/// If both sides have a Table for the same key, recurse.
/// If both sides have a List for the same key, append overlay's items.
/// Otherwise, `overlay`'s value wins.
pub fn deep_merge(mut base: Tree, overlay: Tree) -> Tree {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (Some(ConfigValue::Table(base_tbl)), ConfigValue::Table(overlay_tbl)) => {
                base.insert(key, ConfigValue::Table(deep_merge(base_tbl, overlay_tbl)));
            }
            (Some(ConfigValue::List(mut base_items)), ConfigValue::List(overlay_items)) => {
                base_items.extend(overlay_items);
                base.insert(key, ConfigValue::List(base_items));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}
