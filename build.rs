use version_check::supports_feature;

fn main() {
    // `Sid` fat pointers are built with `core::ptr::from_raw_parts` when the
    // toolchain has it, and with a slice-cast polyfill otherwise.
    check_feature(
        "ptr_metadata",
        "core::ptr::Pointee",
        "has_ptr_metadata",
    );
}

fn check_feature(feature_name: &str, probe_trait: &str, cfg_str: &str) {
    let support_by_feature = emit_need_feature(feature_name);

    let ac = autocfg::new();
    let support_by_default = ac.probe_trait(probe_trait);

    autocfg::emit_possibility(cfg_str);
    if support_by_default || support_by_feature {
        autocfg::emit(cfg_str);
    }
}

fn emit_need_feature(feature: &str) -> bool {
    let cfg_str = format!("needs_{feature}_feature");
    autocfg::emit_possibility(&cfg_str);
    let support_this_feature = supports_feature(feature).unwrap_or(false);
    if support_this_feature {
        autocfg::emit(&cfg_str);
    }
    support_this_feature
}
