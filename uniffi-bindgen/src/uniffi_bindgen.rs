//! Generates Swift and Kotlin bindings for `passkey39-core`.

fn main() {
    uniffi::uniffi_bindgen_main();
}
