//! A record whose `base_file_record_segment` is non-zero only extends a
//! base record's attribute list (typically because the base ran out of
//! room for another hard-linked name). This pass folds each extension
//! record's name/parent back into its base after the full MFT sweep.

use std::collections::BTreeMap;

use crate::record::DecodedRecord;

/// Applies extension->base linking in place. `records` is indexed by MFT
/// entry number; extension records have their own name/parent cleared
/// once copied to the base, so callers see one logical name per entry.
pub fn link(records: &mut BTreeMap<u64, DecodedRecord>) {
    let extensions: Vec<(u64, u64)> = records
        .values()
        .filter_map(|r| r.base_entry.map(|base| (r.entry, base)))
        .collect();

    for (extension_entry, base_entry) in extensions {
        let (name, parent) = match records.get(&extension_entry) {
            Some(ext) => (ext.name.clone(), ext.parent_entry),
            None => continue,
        };

        if let Some(name) = name {
            if let Some(base) = records.get_mut(&base_entry) {
                if base.name.is_none() {
                    base.name = Some(name);
                    base.parent_entry = parent;
                }
            }
        }

        if let Some(ext) = records.get_mut(&extension_entry) {
            ext.parent_entry = None;
        }
    }
}
