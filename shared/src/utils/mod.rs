// Helpers shared by the engine and any front end: lenient number handling in the
// Brazilian convention and natural ordering of SKUs.
pub mod brazilian_format;
pub mod natural_sort;
