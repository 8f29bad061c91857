pub mod percentile {
    include!(concat!(env!("OUT_DIR"), "/percentile_table.rs"));
}
