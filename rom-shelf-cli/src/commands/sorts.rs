use rom_shelf_core::sort::SORT_TYPES;

/// Print the sort registry labels.
pub(crate) fn run_sorts() {
    println!("Available sort orders:");
    for sort in SORT_TYPES {
        println!("  {}", sort.label);
    }
}
